//! Supplier registration form handling.

use tracing::info;

use crate::common::{ApiError, ApiResult};
use crate::domains::suppliers::models::{NewSupplier, Supplier};
use crate::domains::suppliers::store::SupplierStore;

/// Compute a sustainability score when the form did not supply one.
///
/// Base 50, plus bonuses for self-reported metrics, clamped to 0-100.
pub fn compute_score(new: &NewSupplier) -> i32 {
    if let Some(score) = new.sustainability_score {
        return score;
    }

    let mut score = 50;

    if new
        .certifications
        .as_deref()
        .is_some_and(|c| !c.is_empty())
    {
        score += 15;
    }
    if new.renewable_energy == Some(true) {
        score += 10;
    }
    if new.waste_recycled.is_some_and(|w| w > 50.0) {
        score += 10;
    }
    if new.carbon_footprint.is_some_and(|c| c < 100.0) {
        score += 10;
    }
    if new.water_usage.is_some_and(|w| w < 1000.0) {
        score += 5;
    }

    score.clamp(0, 100)
}

pub async fn register_supplier(
    suppliers: &dyn SupplierStore,
    new: &NewSupplier,
) -> ApiResult<Supplier> {
    for (field, value) in [
        ("name", &new.name),
        ("description", &new.description),
        ("category", &new.category),
        ("location", &new.location),
        ("contact_email", &new.contact_email),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{} is required", field)));
        }
    }

    let score = compute_score(new);
    let supplier = suppliers.insert_registered(new, score).await?;

    info!(
        supplier_id = %supplier.id,
        name = %supplier.name,
        score,
        "supplier registered, pending admin approval"
    );

    Ok(supplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> NewSupplier {
        NewSupplier {
            name: "EcoBuild".into(),
            description: "Recycled materials".into(),
            category: "Insulation".into(),
            location: "Portland, OR".into(),
            contact_email: "hello@ecobuild.example".into(),
            website: None,
            contact_phone: None,
            employee_count: None,
            certifications: None,
            sustainability_score: None,
            carbon_footprint: None,
            water_usage: None,
            waste_recycled: None,
            renewable_energy: None,
        }
    }

    #[test]
    fn test_explicit_score_wins() {
        let mut form = base_form();
        form.sustainability_score = Some(72);
        assert_eq!(compute_score(&form), 72);
    }

    #[test]
    fn test_base_score_with_no_metrics() {
        assert_eq!(compute_score(&base_form()), 50);
    }

    #[test]
    fn test_all_bonuses_clamp_to_100() {
        let mut form = base_form();
        form.certifications = Some(vec!["FSC".into()]);
        form.renewable_energy = Some(true);
        form.waste_recycled = Some(80.0);
        form.carbon_footprint = Some(20.0);
        form.water_usage = Some(500.0);
        // 50 + 15 + 10 + 10 + 10 + 5 = 100
        assert_eq!(compute_score(&form), 100);
    }

    #[test]
    fn test_threshold_edges_earn_no_bonus() {
        let mut form = base_form();
        form.waste_recycled = Some(50.0);
        form.carbon_footprint = Some(100.0);
        form.water_usage = Some(1000.0);
        form.certifications = Some(vec![]);
        assert_eq!(compute_score(&form), 50);
    }
}
