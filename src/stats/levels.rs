use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Rounds `value` to two decimal places.
///
/// Rounding looks at the exact binary value of the double and breaks exact
/// ties toward the even hundredth, so `2.675` (stored just below the tie)
/// becomes `2.67` while `0.125` becomes `0.12`. The result is the double
/// nearest to the rounded decimal. Exact for magnitudes below 2^53 / 100.
pub fn round_hundredths(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);
    // value = mantissa * 2^exponent
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };
    if exponent >= 0 {
        return value;
    }

    let shift = exponent.unsigned_abs();
    // mantissa * 100 < 2^60, so anything shifted further rounds to zero
    if shift > 64 {
        return 0.0f64.copysign(value);
    }
    let scaled = mantissa as u128 * 100;
    let mut hundredths = scaled >> shift;
    let remainder = scaled & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    if remainder > half || (remainder == half && hundredths & 1 == 1) {
        hundredths += 1;
    }

    (hundredths as f64 / 100.0).copysign(value)
}

/// Number of vertices sharing one rounded coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelCount {
    pub value: f64,
    pub count: usize,
}

/// Frequency table of rounded coordinates along one axis.
///
/// Buckets remember the order in which they were first seen; ranking is a
/// stable sort on that order, so equal counts keep first-seen order.
#[derive(Clone, Debug, Default)]
pub struct LevelHistogram {
    index: HashMap<u64, usize>,
    levels: Vec<LevelCount>,
}

// -0.0 shares the 0.0 bucket and all NaNs share one bucket
fn bucket_key(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

impl LevelHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coordinate: f64) {
        let value = round_hundredths(coordinate);
        let slot = *self
            .index
            .entry(bucket_key(value))
            .or_insert_with(|| {
                self.levels.push(LevelCount { value, count: 0 });
                self.levels.len() - 1
            });
        self.levels[slot].count += 1;
    }

    /// Distinct rounded values seen so far.
    pub fn distinct_levels(&self) -> usize {
        self.levels.len()
    }

    /// The `top` most common levels, highest count first.
    pub fn ranked(&self, top: usize) -> Vec<LevelCount> {
        let mut ranked = self.levels.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(top);
        ranked
    }
}

impl FromIterator<f64> for LevelHistogram {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut histogram = LevelHistogram::new();
        for coordinate in iter {
            histogram.insert(coordinate);
        }
        histogram
    }
}
