use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{
    AppointmentRow, DashboardCounts, NamedRef, ProductRow, QuizOption, QuizQuestion,
    RecommendedProduct, RoutineSummary, Store, UserCredentials,
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn dashboard_counts(&self) -> anyhow::Result<DashboardCounts> {
        let (products, users, routines) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT (SELECT COUNT(*) FROM product),
                   (SELECT COUNT(*) FROM users),
                   (SELECT COUNT(*) FROM routines)
            "#,
        )
        .fetch_one(&self.db)
        .await
        .context("count dashboard rows")?;
        Ok(DashboardCounts {
            products,
            users,
            routines,
        })
    }

    async fn recent_routines(&self, limit: i64) -> anyhow::Result<Vec<RoutineSummary>> {
        let rows = sqlx::query_as::<_, RoutineSummary>(
            r#"
            SELECT r.routine_id,
                   r.routine_name,
                   r.time_of_day,
                   u.name AS user_name,
                   COALESCE(string_agg(p.name, ', ' ORDER BY rp.step_order), 'Custom blend')
                       AS products
              FROM routines r
              JOIN users u ON r.user_id = u.user_id
              LEFT JOIN routine_product rp ON r.routine_id = rp.routine_id
              LEFT JOIN product p ON rp.product_id = p.product_id
             GROUP BY r.routine_id, r.routine_name, r.time_of_day, u.name
             ORDER BY r.routine_id
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list routines")?;
        Ok(rows)
    }

    async fn products(&self) -> anyhow::Result<Vec<ProductRow>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.product_id,
                   p.name,
                   p.brand,
                   p.price::FLOAT8 AS price,
                   c.category_name,
                   st.type_name,
                   sc.concern_name
              FROM product p
              LEFT JOIN p_category c ON p.category_id = c.category_id
              LEFT JOIN skin_type st ON p.type_id = st.type_id
              LEFT JOIN skin_concern sc ON p.concern_id = sc.concern_id
             ORDER BY p.name
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list products")?;
        Ok(rows)
    }

    async fn quiz_questions(&self) -> anyhow::Result<Vec<QuizQuestion>> {
        let rows = sqlx::query_as::<_, QuizQuestion>(
            r#"
            SELECT question_id, question_text
              FROM quiz_question
             ORDER BY question_id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list quiz questions")?;
        Ok(rows)
    }

    async fn quiz_options(&self) -> anyhow::Result<Vec<QuizOption>> {
        let rows = sqlx::query_as::<_, QuizOption>(
            r#"
            SELECT option_id, question_id, option_text, score_value
              FROM quiz_option
             ORDER BY question_id, option_id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list quiz options")?;
        Ok(rows)
    }

    async fn option_scores(&self, option_ids: &[i32]) -> anyhow::Result<Vec<Option<i32>>> {
        let rows = sqlx::query_as::<_, (Option<i32>,)>(
            r#"
            SELECT score_value
              FROM quiz_option
             WHERE option_id = ANY($1)
            "#,
        )
        .bind(option_ids)
        .fetch_all(&self.db)
        .await
        .context("load option scores")?;
        Ok(rows.into_iter().map(|(score,)| score).collect())
    }

    async fn user_skin_type(&self, user_id: i32) -> anyhow::Result<Option<i32>> {
        let row = sqlx::query_as::<_, (Option<i32>,)>(
            r#"SELECT type_id FROM users WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("load user skin type")?;
        Ok(row.and_then(|(type_id,)| type_id))
    }

    async fn recommendations(
        &self,
        total: i64,
        type_id: Option<i32>,
    ) -> anyhow::Result<Vec<RecommendedProduct>> {
        let rows = sqlx::query_as::<_, RecommendedProduct>(
            r#"
            SELECT p.product_id, p.name, p.price::FLOAT8 AS price
              FROM quiz_recommendation qr
              JOIN product p ON qr.product_id = p.product_id
             WHERE $1 BETWEEN qr.min_score AND qr.max_score
               AND (qr.type_id IS NULL OR qr.type_id = $2)
             ORDER BY qr.min_score, p.name
            "#,
        )
        .bind(total)
        .bind(type_id) // NULL matches only type-less rules
        .fetch_all(&self.db)
        .await
        .context("look up recommendations")?;
        Ok(rows)
    }

    async fn appointments(&self) -> anyhow::Result<Vec<AppointmentRow>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT a.appointment_id,
                   a.date,
                   a.time,
                   a.notes,
                   u.name AS user_name,
                   d.name AS derm_name
              FROM appointment a
              JOIN users u ON a.user_id = u.user_id
              JOIN dermat d ON a.derm_id = d.derm_id
             ORDER BY a.date, a.time
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list appointments")?;
        Ok(rows)
    }

    async fn user_directory(&self) -> anyhow::Result<Vec<NamedRef>> {
        let rows = sqlx::query_as::<_, NamedRef>(
            r#"SELECT user_id AS id, name FROM users ORDER BY name"#,
        )
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        Ok(rows)
    }

    async fn dermatologists(&self) -> anyhow::Result<Vec<NamedRef>> {
        let rows = sqlx::query_as::<_, NamedRef>(
            r#"SELECT derm_id AS id, name FROM dermat ORDER BY name"#,
        )
        .fetch_all(&self.db)
        .await
        .context("list dermatologists")?;
        Ok(rows)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let user = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT user_id, name, email, password
              FROM users
             WHERE lower(email) = lower($1)
             LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }
}
