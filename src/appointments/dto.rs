use askama::Template;

use crate::auth::session::SessionUser;
use crate::store::{AppointmentRow, NamedRef};
use crate::views::{format_date, format_time};

#[derive(Debug, Clone)]
pub struct AppointmentView {
    pub date: String,
    pub time: String,
    pub user_name: String,
    pub derm_name: String,
    pub notes: String,
}

impl From<AppointmentRow> for AppointmentView {
    fn from(a: AppointmentRow) -> Self {
        Self {
            date: format_date(a.date),
            time: format_time(a.time),
            user_name: a.user_name,
            derm_name: a.derm_name,
            notes: a.notes.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "appointments.html")]
pub struct AppointmentsPage {
    pub title: &'static str,
    pub current_user: Option<SessionUser>,
    pub appointments: Vec<AppointmentView>,
    pub users: Vec<NamedRef>,
    pub derms: Vec<NamedRef>,
    pub message: Option<&'static str>,
}
