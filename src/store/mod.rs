//! Data access for every page of the site.
//!
//! Handlers only talk to the [`Store`] trait. [`PgStore`] runs the real
//! queries; [`MemoryStore`] answers the same calls from fixture data.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use models::*;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn dashboard_counts(&self) -> anyhow::Result<DashboardCounts>;

    /// First `limit` routines ordered by id.
    async fn recent_routines(&self, limit: i64) -> anyhow::Result<Vec<RoutineSummary>>;

    /// All products ordered by name.
    async fn products(&self) -> anyhow::Result<Vec<ProductRow>>;

    async fn quiz_questions(&self) -> anyhow::Result<Vec<QuizQuestion>>;

    /// Options ordered by question, then option id.
    async fn quiz_options(&self) -> anyhow::Result<Vec<QuizOption>>;

    /// Score of every existing option among `option_ids`, one entry per option.
    async fn option_scores(&self, option_ids: &[i32]) -> anyhow::Result<Vec<Option<i32>>>;

    async fn user_skin_type(&self, user_id: i32) -> anyhow::Result<Option<i32>>;

    /// Products whose rule interval contains `total` and whose rule type is
    /// NULL or equal to `type_id`.
    async fn recommendations(
        &self,
        total: i64,
        type_id: Option<i32>,
    ) -> anyhow::Result<Vec<RecommendedProduct>>;

    /// Appointments ordered by date and time.
    async fn appointments(&self) -> anyhow::Result<Vec<AppointmentRow>>;

    async fn user_directory(&self) -> anyhow::Result<Vec<NamedRef>>;

    async fn dermatologists(&self) -> anyhow::Result<Vec<NamedRef>>;

    /// Case-insensitive email lookup.
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>>;
}
