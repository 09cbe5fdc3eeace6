use serde::Serialize;
use sqlx::FromRow;
use time::{Date, Time};

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub products: i64,
    pub users: i64,
    pub routines: i64,
}

/// A routine with its products flattened in step order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoutineSummary {
    pub routine_id: i32,
    pub routine_name: String,
    pub time_of_day: Option<String>,
    pub user_name: String,
    pub products: String, // ", " separated, "Custom blend" when empty
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductRow {
    pub product_id: i32,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    pub category_name: Option<String>,
    pub type_name: Option<String>,
    pub concern_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuizQuestion {
    pub question_id: i32,
    pub question_text: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuizOption {
    pub option_id: i32,
    pub question_id: i32,
    pub option_text: String,
    pub score_value: Option<i32>,
}

/// Product returned by a recommendation rule.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecommendedProduct {
    pub product_id: i32,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AppointmentRow {
    pub appointment_id: i32,
    pub date: Date,
    pub time: Time,
    pub notes: Option<String>,
    pub user_name: String,
    pub derm_name: String,
}

/// Id and display name, used for the user and dermatologist directories.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NamedRef {
    pub id: i32,
    pub name: String,
}

/// User record as needed by login.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password: String, // plaintext or argon2 PHC string
}
