use crate::errors::AppError;
use crate::models::{DashboardResponse, RangeQuery, RangeResponse};
use crate::range::{DateRange, select_range};
use crate::state::AppState;
use crate::stats::{build_dashboard, rider_totals};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let (start, end) = state.bounds;
    let totals = rider_totals(&state.dataset.daily);
    Html(render_index(DateRange { start, end }, &totals))
}

pub async fn get_range(State(state): State<AppState>) -> Json<RangeResponse> {
    let (min_date, max_date) = state.bounds;
    Json(RangeResponse {
        min_date: min_date.to_string(),
        max_date: max_date.to_string(),
        daily_records: state.dataset.daily.len(),
        hourly_records: state.dataset.hourly.len(),
    })
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let range = select_range(&query, state.bounds)?;
    debug!(start = %range.start, end = %range.end, "building dashboard");
    Ok(Json(build_dashboard(&state.dataset, range)))
}
