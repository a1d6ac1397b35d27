use serde::{Deserialize, Serialize};

/// Tunables for an analysis run. Also the settings type of
/// [`StlAssetLoader`](crate::StlAssetLoader), so it can come from `.meta` files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// How many of the most common levels to keep per axis.
    pub top_levels: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self { top_levels: 10 }
    }
}
