use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tower_cookies::Cookies;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, LoginPage},
        extractors::CurrentUser,
        password::verify_password,
        services::{
            clear_session_cookie, session_id_from_cookies, set_session_cookie, SessionKeys,
        },
        session::SessionUser,
    },
    error::AppError,
    state::AppState,
    views::render,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const LOGIN_UNAVAILABLE: &str = "Unable to login right now.";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

#[instrument(skip_all)]
pub async fn login_page(CurrentUser(user): CurrentUser) -> Result<Response, AppError> {
    if user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(render(&LoginPage::new(None, String::new(), None))?.into_response())
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(current_user): CurrentUser,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_lowercase();
    let retry = |message| render(&LoginPage::new(current_user.clone(), email.clone(), Some(message)));

    if email.is_empty() {
        warn!("login without email");
        return Ok(retry(INVALID_CREDENTIALS)?.into_response());
    }

    let user = match state.store.find_user_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return Ok(retry(INVALID_CREDENTIALS)?.into_response());
        }
        Err(e) => {
            error!(error = %e, "find_user_by_email failed");
            return Ok(retry(LOGIN_UNAVAILABLE)?.into_response());
        }
    };

    match verify_password(&form.password, &user.password) {
        Ok(true) => {}
        Ok(false) => {
            warn!(email = %email, user_id = user.user_id, "login invalid password");
            return Ok(retry(INVALID_CREDENTIALS)?.into_response());
        }
        Err(e) => {
            error!(error = %e, user_id = user.user_id, "verify_password failed");
            return Ok(retry(LOGIN_UNAVAILABLE)?.into_response());
        }
    }

    let keys = SessionKeys::from_ref(&state);
    if let Some(previous) = session_id_from_cookies(&cookies, &keys) {
        state.sessions.destroy(&previous);
    }
    let session_id = state.sessions.create(SessionUser {
        id: user.user_id,
        name: user.name,
        email: user.email,
    });
    let token = keys.sign(session_id)?;
    set_session_cookie(&cookies, token, keys.ttl());

    info!(user_id = user.user_id, session_id = %session_id, "user logged in");
    Ok(Redirect::to("/").into_response())
}

#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    let keys = SessionKeys::from_ref(&state);
    if let Some(session_id) = session_id_from_cookies(&cookies, &keys) {
        state.sessions.destroy(&session_id);
        info!(session_id = %session_id, "user logged out");
    }
    clear_session_cookie(&cookies);
    Redirect::to("/login")
}
