use askama::Template;
use serde::Deserialize;

use super::session::SessionUser;

/// Urlencoded body of `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub title: &'static str,
    pub current_user: Option<SessionUser>,
    pub email: String,
    pub message: Option<&'static str>,
}

impl LoginPage {
    pub fn new(current_user: Option<SessionUser>, email: String, message: Option<&'static str>) -> Self {
        Self {
            title: "Login",
            current_user,
            email,
            message,
        }
    }
}
