use wasm_bindgen::prelude::*;

use crate::{analyze_bytes, AnalysisSettings};

/// Text report for an STL file held in `bytes`.
#[wasm_bindgen]
pub fn analyze_stl(bytes: &[u8]) -> Result<String, JsError> {
    let report = analyze_bytes(bytes, &AnalysisSettings::default())?;
    Ok(report.to_string())
}

/// Report for an STL file held in `bytes`, as a JSON string.
#[wasm_bindgen]
pub fn analyze_stl_json(bytes: &[u8]) -> Result<String, JsError> {
    let report = analyze_bytes(bytes, &AnalysisSettings::default())?;
    Ok(serde_json::to_string(&report)?)
}

/// Writes the text report into the element with id `element_id`.
#[wasm_bindgen]
pub fn render_stl_report(element_id: &str, bytes: &[u8]) -> Result<(), JsError> {
    let text = analyze_stl(bytes)?;

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;
    let element = document
        .get_element_by_id(element_id)
        .ok_or_else(|| JsError::new(&format!("no element with id {}", element_id)))?;

    element.set_text_content(Some(&text));
    Ok(())
}
