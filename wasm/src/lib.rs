use research_canvas::config::DEFAULT_STUDY_TYPE;
use research_canvas::{
    DocumentKind, InsightsDataset, PlacedArtifact, Point, next_position, resolve_layout_config,
    select, snap_to_grid,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementRequest {
    #[serde(default)]
    existing: Vec<PlacedArtifact>,
    width: f32,
    height: f32,
    #[serde(default)]
    document_kind: DocumentKind,
    #[serde(default)]
    viewport: Point,
}

fn to_js(error: impl ToString) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn recommend(dataset_json: &str, study_type: Option<&str>) -> Result<String, String> {
    let dataset: InsightsDataset =
        serde_json::from_str(dataset_json).map_err(|error| error.to_string())?;
    let ranked = select(&dataset, study_type.unwrap_or(DEFAULT_STUDY_TYPE));
    serde_json::to_string(&ranked).map_err(|error| error.to_string())
}

fn place(request_json: &str) -> Result<String, String> {
    let request: PlacementRequest =
        serde_json::from_str(request_json).map_err(|error| error.to_string())?;
    let config = resolve_layout_config(request.document_kind);
    let position = next_position(
        &request.existing,
        request.width,
        request.height,
        request.viewport,
        &config,
    );
    serde_json::to_string(&position).map_err(|error| error.to_string())
}

fn snap(x: f32, y: f32, document_kind: &str) -> Result<String, String> {
    let kind: DocumentKind = serde_json::from_value(serde_json::Value::String(
        document_kind.to_string(),
    ))
    .map_err(|error| error.to_string())?;
    let snapped = snap_to_grid(Point::new(x, y), &resolve_layout_config(kind));
    serde_json::to_string(&snapped).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn recommend_visualizations(
    dataset_json: &str,
    study_type: Option<String>,
) -> Result<String, JsValue> {
    recommend(dataset_json, study_type.as_deref()).map_err(to_js)
}

#[wasm_bindgen]
pub fn next_placement(request_json: &str) -> Result<String, JsValue> {
    place(request_json).map_err(to_js)
}

#[wasm_bindgen]
pub fn snap_point(x: f32, y: f32, document_kind: &str) -> Result<String, JsValue> {
    snap(x, y, document_kind).map_err(to_js)
}
