use askama::Template;

use crate::auth::session::SessionUser;
use crate::store::{DashboardCounts, RoutineSummary};

#[derive(Debug, Clone)]
pub struct RoutineView {
    pub name: String,
    pub time_of_day: String,
    pub user_name: String,
    pub products: String,
}

impl From<RoutineSummary> for RoutineView {
    fn from(r: RoutineSummary) -> Self {
        Self {
            name: r.routine_name,
            time_of_day: r.time_of_day.unwrap_or_else(|| "Any time".into()),
            user_name: r.user_name,
            products: r.products,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct DashboardPage {
    pub title: &'static str,
    pub current_user: Option<SessionUser>,
    pub stats: DashboardCounts,
    pub routines: Vec<RoutineView>,
    pub error: Option<&'static str>,
}
