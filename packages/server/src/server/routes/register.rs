use axum::{extract::Extension, http::StatusCode, Json};

use crate::common::ApiResult;
use crate::domains::suppliers::actions::register_supplier;
use crate::domains::suppliers::models::{NewSupplier, Supplier};
use crate::server::app::AppState;

/// `POST /api/register-supplier` - self-service registration form.
/// New suppliers land pending with a computed sustainability score.
pub async fn register_supplier_handler(
    Extension(state): Extension<AppState>,
    Json(form): Json<NewSupplier>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    let supplier = register_supplier(state.deps.suppliers.as_ref(), &form).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}
