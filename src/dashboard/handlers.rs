use axum::{extract::State, response::Html};
use tracing::{error, instrument};

use super::dto::{DashboardPage, RoutineView};
use crate::{
    auth::extractors::CurrentUser, error::AppError, state::AppState, store::DashboardCounts,
    views::render,
};

const ROUTINE_LIMIT: i64 = 6;

#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let page = match load(&state).await {
        Ok((stats, routines)) => DashboardPage {
            title: "Dashboard",
            current_user,
            stats,
            routines,
            error: None,
        },
        Err(e) => {
            error!(error = %e, "loading dashboard data failed");
            DashboardPage {
                title: "Dashboard",
                current_user,
                stats: DashboardCounts::default(),
                routines: Vec::new(),
                error: Some("Unable to load stats from the database."),
            }
        }
    };
    render(&page)
}

async fn load(state: &AppState) -> anyhow::Result<(DashboardCounts, Vec<RoutineView>)> {
    let stats = state.store.dashboard_counts().await?;
    let routines = state.store.recent_routines(ROUTINE_LIMIT).await?;
    Ok((stats, routines.into_iter().map(RoutineView::from).collect()))
}
