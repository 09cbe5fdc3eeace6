use axum::{extract::State, response::Html};
use tracing::{error, instrument};

use super::dto::{AppointmentView, AppointmentsPage};
use crate::{
    auth::extractors::CurrentUser, error::AppError, state::AppState, store::NamedRef,
    views::render,
};

#[instrument(skip_all)]
pub async fn list_appointments(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let page = match load(&state).await {
        Ok((appointments, users, derms)) => AppointmentsPage {
            title: "Appointments",
            current_user,
            appointments,
            users,
            derms,
            message: None,
        },
        Err(e) => {
            error!(error = %e, "loading appointments failed");
            AppointmentsPage {
                title: "Appointments",
                current_user,
                appointments: Vec::new(),
                users: Vec::new(),
                derms: Vec::new(),
                message: Some("Unable to load appointments right now."),
            }
        }
    };
    render(&page)
}

async fn load(
    state: &AppState,
) -> anyhow::Result<(Vec<AppointmentView>, Vec<NamedRef>, Vec<NamedRef>)> {
    let appointments = state.store.appointments().await?;
    let users = state.store.user_directory().await?;
    let derms = state.store.dermatologists().await?;
    Ok((
        appointments.into_iter().map(AppointmentView::from).collect(),
        users,
        derms,
    ))
}
