//! SMILES form and JSON evaluation endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::error;

use druglens_molecules::EvaluationResult;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SmilesForm {
    #[serde(default)]
    pub smiles: String,
}

#[derive(Deserialize)]
pub struct SmilesQuery {
    pub smiles: String,
}

pub async fn index_page(State(state): State<SharedState>) -> Response {
    render_index(&state, "", None)
}

/// An empty field re-renders the blank form without evaluating anything.
pub async fn index_submit(
    State(state): State<SharedState>,
    Form(form): Form<SmilesForm>,
) -> Response {
    if form.smiles.is_empty() {
        return render_index(&state, "", None);
    }
    let results = state.evaluator.evaluate(&form.smiles).await;
    render_index(&state, &form.smiles, Some(&results))
}

pub async fn api_evaluate(
    State(state): State<SharedState>,
    Query(query): Query<SmilesQuery>,
) -> Json<EvaluationResult> {
    Json(state.evaluator.evaluate(&query.smiles).await)
}

fn render_index(state: &SharedState, smiles: &str, results: Option<&EvaluationResult>) -> Response {
    match state.render_index(smiles, results) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render {}: {}", crate::state::INDEX_TEMPLATE, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}
