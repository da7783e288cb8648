//! Request handlers. Per-request failures never change the HTTP status.

use super::form::{render_page, PredictForm};
use super::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    response::Html,
    Form, Json,
};
use serde_json::{json, Value};

/// `POST /predict`: JSON record in, `{"CTR": 0|1}` or `{"error": ..}` out.
pub async fn predict(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let parsed: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return Json(json!({ "error": format!("invalid JSON body: {e}") })),
    };
    match state.predictor.predict_value(&parsed) {
        Ok(decision) => Json(json!({ "CTR": decision.label.as_flag() })),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "threshold": state.predictor.threshold(),
        "model": state.model_path.display().to_string(),
    }))
}

/// `GET /`: empty form
pub async fn form_page() -> Html<String> {
    Html(render_page(None).into_string())
}

/// `POST /`: predict from the submitted form and show Yes/No
pub async fn form_submit(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Html<String> {
    let record = form.into_record();
    let outcome = match state.predictor.predict(&record) {
        Ok(decision) => format!("Will the user click the ad? {}", decision.label.as_text()),
        Err(e) => format!("Error: {e}"),
    };
    Html(render_page(Some(&outcome)).into_string())
}
