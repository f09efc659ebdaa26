//! Overview page: stat cards, activity chart and recent activity

use crate::state::AppState;
use axum::{extract::State, response::Json};
use callboard_core::metrics::StatCardView;
use callboard_core::presenter::{ActivityRow, Table};
use callboard_core::types::{ActivityEvent, ActivityPoint};
use serde::Serialize;
use std::sync::Arc;

/// Overview page response
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Headline numbers
    pub stat_cards: Vec<StatCardView>,
    /// Calls and messages per time slot, in chart order
    pub hourly_activity: Vec<ActivityPoint>,
    /// Latest calls and messages
    pub recent_activity: Table<ActivityRow>,
}

/// Overview page view model
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let dataset = &state.dataset;
    let activity: Vec<&ActivityEvent> = dataset.activity.iter().collect();

    Json(DashboardResponse {
        stat_cards: dataset.stat_cards.iter().map(StatCardView::from).collect(),
        hourly_activity: dataset.hourly_activity.clone(),
        recent_activity: state.presenter.table(&activity),
    })
}
