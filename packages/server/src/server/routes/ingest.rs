use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::ApiResult;
use crate::domains::suppliers::actions::{ingest_supplier, IngestOutcome};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub url: String,
}

/// `POST /api/ingest-supplier` - scrape a supplier website, extract its
/// identity and products, and persist both halves of the hybrid write.
pub async fn ingest_supplier_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<IngestRequest>,
) -> ApiResult<Json<IngestOutcome>> {
    let deps = &state.deps;
    let outcome = ingest_supplier(
        deps.fetcher.as_ref(),
        deps.extractor.as_ref(),
        deps.suppliers.as_ref(),
        deps.products.as_ref(),
        &request.url,
    )
    .await?;

    Ok(Json(outcome))
}
