use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tower_cookies::Cookies;

use super::services::{session_id_from_cookies, SessionKeys};
use super::session::SessionUser;
use crate::state::AppState;

/// The signed-in user, or `None` for anonymous visitors.
pub struct CurrentUser(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        let keys = SessionKeys::from_ref(state);
        let user = session_id_from_cookies(&cookies, &keys).and_then(|sid| state.sessions.get(&sid));
        Ok(CurrentUser(user))
    }
}
