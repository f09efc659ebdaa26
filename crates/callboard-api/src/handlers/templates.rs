//! Message template gallery

use crate::error::ApiError;
use crate::extractors::ValidatedQuery;
use crate::handlers::build_filter;
use crate::state::AppState;
use axum::{
    extract::State,
    response::Json,
};
use callboard_core::filter::{AppliedFilters, TemplateFacets};
use callboard_core::presenter::TemplateCard;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Query parameters for the template gallery
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TemplatesQuery {
    /// Free-text search over template name
    #[validate(length(max = 100))]
    pub q: Option<String>,

    /// Publication state
    #[validate(length(max = 50))]
    pub status: Option<String>,

    /// Channel
    #[validate(length(max = 50))]
    pub channel: Option<String>,
}

/// Template gallery response
#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    /// Matching template cards
    pub templates: Vec<TemplateCard>,
    /// Number of templates matching filters
    pub total: usize,
    /// Restrictions that were applied
    pub filters: AppliedFilters,
}

/// List message templates
///
/// # Errors
///
/// * `BAD_REQUEST` - Invalid query parameters
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<TemplatesQuery>,
) -> Result<Json<TemplatesResponse>, ApiError> {
    let filter = build_filter::<TemplateFacets>(
        query.q.as_deref(),
        &[
            ("status", query.status.as_deref()),
            ("channel", query.channel.as_deref()),
        ],
    );
    let visible = filter.apply(&state.dataset.templates);
    let templates = state.presenter.table(&visible).rows;

    Ok(Json(TemplatesResponse {
        total: templates.len(),
        templates,
        filters: filter.describe(),
    }))
}
