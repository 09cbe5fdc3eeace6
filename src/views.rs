use askama::Template;
use axum::response::Html;
use time::macros::format_description;
use time::{Date, Time};

use crate::error::AppError;

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_else(|_| date.to_string())
}

pub fn format_time(time: Time) -> String {
    time.format(format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| time.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn prices_have_two_decimals() {
        assert_eq!(format_price(14.5), "$14.50");
        assert_eq!(format_price(24.999), "$25.00");
    }

    #[test]
    fn dates_and_times_are_human_readable() {
        assert_eq!(format_date(date!(2025 - 03 - 02)), "Mar 2, 2025");
        assert_eq!(format_time(time!(9:05)), "09:05");
    }
}
