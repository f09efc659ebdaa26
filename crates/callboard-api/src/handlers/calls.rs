//! Call log listing and lookup

use crate::error::{ApiError, core_error};
use crate::extractors::ValidatedQuery;
use crate::handlers::build_filter;
use crate::pagination::{Page, PaginationInfo};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use callboard_core::filter::{AppliedFilters, CallFacets};
use callboard_core::presenter::{CallRow, RowPresenter};
use callboard_core::{CallRecord, Error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Query parameters for listing calls
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListCallsQuery {
    /// Free-text search over phone number and call id
    #[validate(length(max = 100))]
    pub q: Option<String>,

    /// Call outcome (`completed`, `missed`, or `all`)
    #[validate(length(max = 50))]
    pub status: Option<String>,

    /// Follow-up message state
    #[validate(length(max = 50))]
    pub message_status: Option<String>,

    /// Follow-up channel
    #[validate(length(max = 50))]
    pub channel: Option<String>,

    /// Number of calls to return (max 500)
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,

    /// Offset for pagination
    pub offset: Option<u32>,
}

/// Response for listing calls
#[derive(Debug, Serialize)]
pub struct ListCallsResponse {
    /// Column headers
    pub columns: Vec<&'static str>,

    /// Rows on this page
    pub calls: Vec<CallRow>,

    /// Number of calls matching filters
    pub total: usize,

    /// Number of calls returned
    pub count: usize,

    /// Current offset
    pub offset: usize,

    /// Restrictions that were applied
    pub filters: AppliedFilters,

    /// Pagination info
    pub pagination: PaginationInfo,
}

/// List calls with search, filters and pagination
///
/// # Errors
///
/// * `BAD_REQUEST` - Invalid query parameters (validation failures)
///
/// # Example
///
/// ```text
/// GET /api/calls?q=555&status=completed&channel=WhatsApp&limit=20
/// ```
pub async fn list_calls(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ListCallsQuery>,
) -> Result<Json<ListCallsResponse>, ApiError> {
    let filter = build_filter::<CallFacets>(
        query.q.as_deref(),
        &[
            ("status", query.status.as_deref()),
            ("message_status", query.message_status.as_deref()),
            ("channel", query.channel.as_deref()),
        ],
    );
    let page = Page::new(query.limit, query.offset);

    let visible = filter.apply(state.dataset.calls.records());
    let total = visible.len();
    let table = state.presenter.table(page.slice(&visible));
    let count = table.rows.len();

    info!(
        "Listing calls: total={}, count={}, offset={}",
        total, count, page.offset
    );

    Ok(Json(ListCallsResponse {
        columns: table.columns,
        calls: table.rows,
        total,
        count,
        offset: page.offset,
        filters: filter.describe(),
        pagination: page.info(total),
    }))
}

/// Response for a single call
#[derive(Debug, Serialize)]
pub struct CallDetailResponse {
    /// Column headers
    pub columns: Vec<&'static str>,
    /// The presented call
    pub call: CallRow,
}

/// Get a single call by id
///
/// # Errors
///
/// * `NOT_FOUND` - No call with this id
pub async fn get_call(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CallDetailResponse>, ApiError> {
    let Some(call) = state.dataset.calls.get(&id) else {
        warn!("Call not found: {}", id);
        return Err(core_error(&Error::not_found(format!("call {id}"))));
    };

    Ok(Json(CallDetailResponse {
        columns: CallRecord::COLUMNS.to_vec(),
        call: state.presenter.row(call),
    }))
}
