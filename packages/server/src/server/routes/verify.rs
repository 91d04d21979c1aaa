use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::ApiResult;
use crate::kernel::verifier::{verify_document, DocumentVerification};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDocumentRequest {
    pub file_url: String,
    pub document_id: String,
}

/// `POST /api/verify-document` - OCR an uploaded certificate and scan it
/// for LEED/FSC wording and an expiry date.
pub async fn verify_document_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<VerifyDocumentRequest>,
) -> ApiResult<Json<DocumentVerification>> {
    let verification = verify_document(
        state.deps.blobs.as_ref(),
        state.deps.ocr.as_ref(),
        &request.file_url,
        &request.document_id,
    )
    .await?;

    Ok(Json(verification))
}
