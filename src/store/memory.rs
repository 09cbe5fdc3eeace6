//! In-memory [`Store`] backed by fixture data.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use time::macros::{date, time};
use time::{Date, Time};

use super::{
    AppointmentRow, DashboardCounts, NamedRef, ProductRow, QuizOption, QuizQuestion,
    RecommendedProduct, RoutineSummary, Store, UserCredentials,
};

#[derive(Debug, Clone)]
pub struct MemUser {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub type_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct MemRoutine {
    pub routine_id: i32,
    pub routine_name: String,
    pub time_of_day: Option<String>,
    pub user_id: i32,
    /// `(step_order, product_id)` pairs, in any order.
    pub steps: Vec<(i32, i32)>,
}

#[derive(Debug, Clone)]
pub struct MemRule {
    pub min_score: i32,
    pub max_score: i32,
    pub type_id: Option<i32>,
    pub product_id: i32,
}

#[derive(Debug, Clone)]
pub struct MemAppointment {
    pub appointment_id: i32,
    pub user_id: i32,
    pub derm_id: i32,
    pub date: Date,
    pub time: Time,
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Vec<MemUser>,
    products: Vec<ProductRow>,
    routines: Vec<MemRoutine>,
    questions: Vec<QuizQuestion>,
    options: Vec<QuizOption>,
    rules: Vec<MemRule>,
    dermatologists: Vec<NamedRef>,
    appointments: Vec<MemAppointment>,
    failing: AtomicBool,
    recommendation_lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small catalog with users, routines, a three question quiz and two
    /// appointments.
    pub fn seeded() -> Self {
        let mut store = Self::new()
            .with_user(1, "Amara Okafor", "amara@cutiscura.test", "glow123", Some(2))
            .with_user(2, "Ben Carter", "ben@cutiscura.test", "sunscreen", None)
            .with_product(product(1, "Gentle Foam Cleanser", "Lumiere", 14.5, "Cleanser", Some("Oily"), Some("Acne")))
            .with_product(product(2, "Barrier Repair Cream", "Dermalab", 32.0, "Moisturizer", Some("Dry"), Some("Dryness")))
            .with_product(product(3, "Daily Mineral SPF 50", "Solis", 24.99, "Sunscreen", None, None))
            .with_product(product(4, "Niacinamide Serum", "Dermalab", 19.0, "Serum", Some("Combination"), Some("Pigmentation")))
            .with_routine(1, "Morning Glow", Some("morning"), 1, &[(1, 1), (2, 4), (3, 3)])
            .with_routine(2, "Night Reset", Some("evening"), 1, &[(2, 2), (1, 1)])
            .with_routine(3, "Weekend Minimal", None, 2, &[])
            .with_question(1, "How does your skin feel by midday?")
            .with_question(2, "How often do you get breakouts?")
            .with_question(3, "How does your skin react to new products?")
            .with_option(1, 1, "Tight or flaky", Some(2))
            .with_option(2, 1, "Comfortable", Some(1))
            .with_option(3, 1, "Shiny in places", Some(3))
            .with_option(4, 2, "Rarely", Some(1))
            .with_option(5, 2, "Sometimes", Some(3))
            .with_option(6, 2, "Often", Some(5))
            .with_option(7, 3, "No reaction", Some(1))
            .with_option(8, 3, "Mild redness", Some(2))
            .with_option(9, 3, "Stings or itches", None)
            .with_rule(2, 5, None, 2)
            .with_rule(6, 9, None, 4)
            .with_rule(6, 9, Some(1), 1)
            .with_rule(2, 13, Some(2), 3)
            .with_rule(10, 13, None, 1)
            .with_dermatologist(1, "Dr. Ines Moreau")
            .with_dermatologist(2, "Dr. Samuel Reyes");
        store.appointments = vec![
            MemAppointment {
                appointment_id: 1,
                user_id: 1,
                derm_id: 2,
                date: date!(2025 - 03 - 14),
                time: time!(10:30),
                notes: Some("Follow-up on barrier repair".into()),
            },
            MemAppointment {
                appointment_id: 2,
                user_id: 2,
                derm_id: 1,
                date: date!(2025 - 03 - 02),
                time: time!(9:00),
                notes: None,
            },
        ];
        store
    }

    pub fn with_user(
        mut self,
        user_id: i32,
        name: &str,
        email: &str,
        password: &str,
        type_id: Option<i32>,
    ) -> Self {
        self.users.push(MemUser {
            user_id,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            type_id,
        });
        self
    }

    pub fn with_product(mut self, product: ProductRow) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_routine(
        mut self,
        routine_id: i32,
        routine_name: &str,
        time_of_day: Option<&str>,
        user_id: i32,
        steps: &[(i32, i32)],
    ) -> Self {
        self.routines.push(MemRoutine {
            routine_id,
            routine_name: routine_name.into(),
            time_of_day: time_of_day.map(Into::into),
            user_id,
            steps: steps.to_vec(),
        });
        self
    }

    pub fn with_question(mut self, question_id: i32, text: &str) -> Self {
        self.questions.push(QuizQuestion {
            question_id,
            question_text: text.into(),
        });
        self
    }

    pub fn with_option(
        mut self,
        option_id: i32,
        question_id: i32,
        text: &str,
        score_value: Option<i32>,
    ) -> Self {
        self.options.push(QuizOption {
            option_id,
            question_id,
            option_text: text.into(),
            score_value,
        });
        self
    }

    pub fn with_rule(
        mut self,
        min_score: i32,
        max_score: i32,
        type_id: Option<i32>,
        product_id: i32,
    ) -> Self {
        self.rules.push(MemRule {
            min_score,
            max_score,
            type_id,
            product_id,
        });
        self
    }

    pub fn with_dermatologist(mut self, id: i32, name: &str) -> Self {
        self.dermatologists.push(NamedRef {
            id,
            name: name.into(),
        });
        self
    }

    pub fn with_appointment(mut self, appointment: MemAppointment) -> Self {
        self.appointments.push(appointment);
        self
    }

    /// Make every subsequent call fail as if the database were down.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// How many times [`Store::recommendations`] has been called.
    pub fn recommendation_lookups(&self) -> usize {
        self.recommendation_lookups.load(Ordering::SeqCst)
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("memory store is unavailable");
        }
        Ok(())
    }

    fn user_name(&self, user_id: i32) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .map(|u| u.name.as_str())
    }

    fn product(&self, product_id: i32) -> Option<&ProductRow> {
        self.products.iter().find(|p| p.product_id == product_id)
    }
}

/// Shorthand for building catalog rows in fixtures.
pub fn product(
    product_id: i32,
    name: &str,
    brand: &str,
    price: f64,
    category: &str,
    skin_type: Option<&str>,
    concern: Option<&str>,
) -> ProductRow {
    ProductRow {
        product_id,
        name: name.into(),
        brand: Some(brand.into()),
        price,
        category_name: Some(category.into()),
        type_name: skin_type.map(Into::into),
        concern_name: concern.map(Into::into),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn dashboard_counts(&self) -> anyhow::Result<DashboardCounts> {
        self.check()?;
        Ok(DashboardCounts {
            products: self.products.len() as i64,
            users: self.users.len() as i64,
            routines: self.routines.len() as i64,
        })
    }

    async fn recent_routines(&self, limit: i64) -> anyhow::Result<Vec<RoutineSummary>> {
        self.check()?;
        let mut routines: Vec<&MemRoutine> = self
            .routines
            .iter()
            .filter(|r| self.user_name(r.user_id).is_some())
            .collect();
        routines.sort_by_key(|r| r.routine_id);
        Ok(routines
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|r| {
                let mut steps = r.steps.clone();
                steps.sort_by_key(|(order, _)| *order);
                let names: Vec<&str> = steps
                    .iter()
                    .filter_map(|(_, id)| self.product(*id).map(|p| p.name.as_str()))
                    .collect();
                RoutineSummary {
                    routine_id: r.routine_id,
                    routine_name: r.routine_name.clone(),
                    time_of_day: r.time_of_day.clone(),
                    user_name: self.user_name(r.user_id).unwrap_or_default().to_string(),
                    products: if names.is_empty() {
                        "Custom blend".to_string()
                    } else {
                        names.join(", ")
                    },
                }
            })
            .collect())
    }

    async fn products(&self) -> anyhow::Result<Vec<ProductRow>> {
        self.check()?;
        let mut rows = self.products.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn quiz_questions(&self) -> anyhow::Result<Vec<QuizQuestion>> {
        self.check()?;
        let mut rows = self.questions.clone();
        rows.sort_by_key(|q| q.question_id);
        Ok(rows)
    }

    async fn quiz_options(&self) -> anyhow::Result<Vec<QuizOption>> {
        self.check()?;
        let mut rows = self.options.clone();
        rows.sort_by_key(|o| (o.question_id, o.option_id));
        Ok(rows)
    }

    async fn option_scores(&self, option_ids: &[i32]) -> anyhow::Result<Vec<Option<i32>>> {
        self.check()?;
        Ok(self
            .options
            .iter()
            .filter(|o| option_ids.contains(&o.option_id))
            .map(|o| o.score_value)
            .collect())
    }

    async fn user_skin_type(&self, user_id: i32) -> anyhow::Result<Option<i32>> {
        self.check()?;
        Ok(self
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .and_then(|u| u.type_id))
    }

    async fn recommendations(
        &self,
        total: i64,
        type_id: Option<i32>,
    ) -> anyhow::Result<Vec<RecommendedProduct>> {
        self.recommendation_lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut matched: Vec<(i32, &ProductRow)> = self
            .rules
            .iter()
            .filter(|r| i64::from(r.min_score) <= total && total <= i64::from(r.max_score))
            .filter(|r| r.type_id.is_none() || (type_id.is_some() && r.type_id == type_id))
            .filter_map(|r| self.product(r.product_id).map(|p| (r.min_score, p)))
            .collect();
        matched.sort_by(|(a_min, a), (b_min, b)| a_min.cmp(b_min).then_with(|| a.name.cmp(&b.name)));
        Ok(matched
            .into_iter()
            .map(|(_, p)| RecommendedProduct {
                product_id: p.product_id,
                name: p.name.clone(),
                price: p.price,
            })
            .collect())
    }

    async fn appointments(&self) -> anyhow::Result<Vec<AppointmentRow>> {
        self.check()?;
        let mut rows: Vec<AppointmentRow> = self
            .appointments
            .iter()
            .filter_map(|a| {
                let user_name = self.user_name(a.user_id)?;
                let derm = self.dermatologists.iter().find(|d| d.id == a.derm_id)?;
                Some(AppointmentRow {
                    appointment_id: a.appointment_id,
                    date: a.date,
                    time: a.time,
                    notes: a.notes.clone(),
                    user_name: user_name.to_string(),
                    derm_name: derm.name.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|a| (a.date, a.time));
        Ok(rows)
    }

    async fn user_directory(&self) -> anyhow::Result<Vec<NamedRef>> {
        self.check()?;
        let mut rows: Vec<NamedRef> = self
            .users
            .iter()
            .map(|u| NamedRef {
                id: u.user_id,
                name: u.name.clone(),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn dermatologists(&self) -> anyhow::Result<Vec<NamedRef>> {
        self.check()?;
        let mut rows = self.dermatologists.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        self.check()?;
        Ok(self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| UserCredentials {
                user_id: u.user_id,
                name: u.name.clone(),
                email: u.email.clone(),
                password: u.password.clone(),
            }))
    }
}
