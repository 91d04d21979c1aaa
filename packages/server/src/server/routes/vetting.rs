use axum::extract::{Extension, Query};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ApiResult;
use crate::domains::suppliers::models::Supplier;
use crate::domains::vetting::actions::{apply_vetting_action, VettingActionRequest};
use crate::domains::vetting::models::VettingReview;
use crate::server::app::AppState;

/// `PATCH /api/admin/vetting` - apply an admin vetting action to a
/// supplier and append an audit row.
pub async fn vetting_action_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<VettingActionRequest>,
) -> ApiResult<Json<Supplier>> {
    let supplier = apply_vetting_action(
        state.deps.suppliers.as_ref(),
        state.deps.reviews.as_ref(),
        &request,
    )
    .await?;

    Ok(Json(supplier))
}

#[derive(Debug, Deserialize)]
pub struct VettingHistoryParams {
    pub supplier_id: Uuid,
}

#[derive(Serialize)]
pub struct VettingHistory {
    pub supplier_id: Uuid,
    pub reviews: Vec<VettingReview>,
}

/// `GET /api/admin/vetting?supplier_id=` - audit trail for one supplier,
/// newest first.
pub async fn vetting_history_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<VettingHistoryParams>,
) -> ApiResult<Json<VettingHistory>> {
    let reviews = state
        .deps
        .reviews
        .list_for_supplier(params.supplier_id)
        .await?;
    Ok(Json(VettingHistory {
        supplier_id: params.supplier_id,
        reviews,
    }))
}
