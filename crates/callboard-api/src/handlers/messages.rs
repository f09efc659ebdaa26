//! Message log listing with delivery summary

use crate::error::ApiError;
use crate::extractors::ValidatedQuery;
use crate::handlers::build_filter;
use crate::pagination::{Page, PaginationInfo};
use crate::state::AppState;
use axum::{
    extract::State,
    response::Json,
};
use callboard_core::StatusBreakdown;
use callboard_core::filter::{AppliedFilters, MessageFacets};
use callboard_core::presenter::MessageRow;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Query parameters for listing messages
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListMessagesQuery {
    /// Free-text search over phone number and message id
    #[validate(length(max = 100))]
    pub q: Option<String>,

    /// Delivery state (`delivered`, `failed`, `pending`, or `all`)
    #[validate(length(max = 50))]
    pub status: Option<String>,

    /// Channel (`WhatsApp`, `SMS`, or `all-channels`)
    #[validate(length(max = 50))]
    pub channel: Option<String>,

    /// Number of messages to return (max 500)
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,

    /// Offset for pagination
    pub offset: Option<u32>,
}

/// Delivery counters shown above the message table
#[derive(Debug, Serialize)]
pub struct MessageSummary {
    /// Counts by status across the whole log
    #[serde(flatten)]
    pub breakdown: StatusBreakdown,
    /// Total messages
    pub total: usize,
    /// Delivered share in percent; absent for an empty log
    pub delivery_rate: Option<f64>,
}

/// Response for listing messages
#[derive(Debug, Serialize)]
pub struct ListMessagesResponse {
    /// Delivery counters
    pub summary: MessageSummary,

    /// Column headers
    pub columns: Vec<&'static str>,

    /// Rows on this page
    pub messages: Vec<MessageRow>,

    /// Number of messages matching filters
    pub total: usize,

    /// Number of messages returned
    pub count: usize,

    /// Current offset
    pub offset: usize,

    /// Restrictions that were applied
    pub filters: AppliedFilters,

    /// Pagination info
    pub pagination: PaginationInfo,
}

/// List messages with search, filters and pagination
///
/// # Errors
///
/// * `BAD_REQUEST` - Invalid query parameters (validation failures)
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ListMessagesQuery>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let filter = build_filter::<MessageFacets>(
        query.q.as_deref(),
        &[
            ("status", query.status.as_deref()),
            ("channel", query.channel.as_deref()),
        ],
    );
    let page = Page::new(query.limit, query.offset);

    let records = state.dataset.messages.records();
    let breakdown = StatusBreakdown::from_messages(records);
    let summary = MessageSummary {
        total: breakdown.total(),
        delivery_rate: breakdown.delivery_rate(),
        breakdown,
    };

    let visible = filter.apply(records);
    let total = visible.len();
    let table = state.presenter.table(page.slice(&visible));
    let count = table.rows.len();

    info!(
        "Listing messages: total={}, count={}, offset={}",
        total, count, page.offset
    );

    Ok(Json(ListMessagesResponse {
        summary,
        columns: table.columns,
        messages: table.rows,
        total,
        count,
        offset: page.offset,
        filters: filter.describe(),
        pagination: page.info(total),
    }))
}
