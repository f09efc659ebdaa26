//! Plan, usage and invoice history

use crate::error::{ApiError, core_error};
use crate::extractors::ValidatedQuery;
use crate::handlers::build_filter;
use crate::state::AppState;
use axum::{
    extract::State,
    response::Json,
};
use callboard_core::filter::{AppliedFilters, InvoiceFacets};
use callboard_core::presenter::{InvoiceRow, Table};
use callboard_core::types::Plan;
use callboard_core::utils::format_number;
use callboard_core::{UsageMeter, UsageSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Query parameters for the invoice table
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BillingQuery {
    /// Free-text search over invoice number
    #[validate(length(max = 100))]
    pub q: Option<String>,

    /// Settlement state
    #[validate(length(max = 50))]
    pub status: Option<String>,
}

/// Plan card view model
#[derive(Debug, Serialize)]
pub struct PlanView {
    /// Plan name
    pub name: String,
    /// Marketing blurb
    pub description: String,
    /// e.g. `$149/month`
    pub price: String,
    /// Feature bullet points
    pub features: Vec<String>,
    /// Reset date
    pub resets_on: String,
    /// e.g. `Visa ending in 4242`
    pub payment_method: String,
    /// e.g. `Expires 12/2025`
    pub payment_expires: String,
}

impl From<&Plan> for PlanView {
    fn from(plan: &Plan) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone(),
            price: format!("{}{}", plan.price, plan.period),
            features: vec![
                format!("{} messages/month", format_number(plan.messages_included)),
                format!("{} phone numbers", plan.phone_numbers),
                format!("{} team seats", plan.seats),
            ],
            resets_on: plan.resets_on.clone(),
            payment_method: format!(
                "{} ending in {}",
                plan.payment_method.brand, plan.payment_method.last4
            ),
            payment_expires: format!("Expires {}", plan.payment_method.expires),
        }
    }
}

/// Billing page response
#[derive(Debug, Serialize)]
pub struct BillingResponse {
    /// Current plan
    pub plan: PlanView,
    /// Message usage this period
    pub usage: UsageSummary,
    /// Invoice history
    pub invoices: Table<InvoiceRow>,
    /// Restrictions applied to the invoice table
    pub filters: AppliedFilters,
}

/// Plan, usage meter and filtered invoices
///
/// # Errors
///
/// * `BAD_REQUEST` - Invalid query parameters
/// * `INTERNAL_SERVER_ERROR` - The plan has no message allowance
pub async fn get_billing(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<BillingQuery>,
) -> Result<Json<BillingResponse>, ApiError> {
    let plan = &state.dataset.plan;
    let usage = UsageMeter::new(plan.messages_used, plan.messages_included)
        .map_err(|e| core_error(&e))?
        .summary(state.warning_threshold(), "messages");

    let filter = build_filter::<InvoiceFacets>(
        query.q.as_deref(),
        &[("status", query.status.as_deref())],
    );
    let visible = filter.apply(state.dataset.invoices.records());

    info!(
        "Billing: usage={}%, invoices={}",
        usage.display_percent,
        visible.len()
    );

    Ok(Json(BillingResponse {
        plan: PlanView::from(plan),
        usage,
        invoices: state.presenter.table(&visible),
        filters: filter.describe(),
    }))
}
