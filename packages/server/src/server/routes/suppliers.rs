use axum::extract::{Extension, Query};
use axum::Json;
use serde::Serialize;

use crate::common::ApiResult;
use crate::domains::suppliers::actions::search::{
    search_suppliers, SearchResponse, SupplierSearchParams,
};
use crate::domains::suppliers::models::Supplier;
use crate::server::app::AppState;

/// `GET /api/suppliers` - public search/filter over the directory.
/// Unverified suppliers are hidden unless `includeUnverified=true`.
pub async fn search_suppliers_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<SupplierSearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let response = search_suppliers(state.deps.suppliers.as_ref(), params).await?;
    Ok(Json(response))
}

#[derive(Serialize)]
pub struct AdminSupplierList {
    pub suppliers: Vec<Supplier>,
    pub total: usize,
}

/// `GET /api/admin/suppliers` - full directory for the vetting queue,
/// including unverified and rejected rows.
pub async fn admin_suppliers_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<AdminSupplierList>> {
    let suppliers = state.deps.suppliers.list_all().await?;
    let total = suppliers.len();
    Ok(Json(AdminSupplierList { suppliers, total }))
}
