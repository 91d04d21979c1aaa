//! Search/filter read path.

use serde::{Deserialize, Serialize};

use crate::common::ApiResult;
use crate::domains::suppliers::models::{DataSource, Supplier, VerificationStatus};
use crate::domains::suppliers::store::{SupplierFilters, SupplierStore};

fn default_limit() -> i64 {
    50
}

/// Query parameters for `GET /api/suppliers`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_score: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default)]
    pub data_source: Option<DataSource>,
    #[serde(default)]
    pub include_unverified: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl From<SupplierSearchParams> for SupplierFilters {
    fn from(p: SupplierSearchParams) -> Self {
        SupplierFilters {
            q: p.q,
            category: p.category,
            min_score: p.min_score,
            location: p.location,
            certification: p.certification,
            verification_status: p.verification_status,
            data_source: p.data_source,
            include_unverified: p.include_unverified,
            featured: p.featured,
            limit: p.limit.clamp(1, 200),
            offset: p.offset.max(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub suppliers: Vec<Supplier>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

pub async fn search_suppliers(
    suppliers: &dyn SupplierStore,
    params: SupplierSearchParams,
) -> ApiResult<SearchResponse> {
    let filters: SupplierFilters = params.into();
    let page = suppliers.search(&filters).await?;

    Ok(SearchResponse {
        suppliers: page.suppliers,
        total: page.total,
        limit: filters.limit,
        offset: filters.offset,
    })
}
