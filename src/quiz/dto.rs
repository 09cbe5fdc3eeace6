use askama::Template;

use crate::auth::session::SessionUser;
use crate::store::RecommendedProduct;
use crate::views::format_price;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub id: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: i32,
    pub text: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone)]
pub struct RecommendationView {
    pub name: String,
    pub price: String,
}

impl From<RecommendedProduct> for RecommendationView {
    fn from(p: RecommendedProduct) -> Self {
        Self {
            name: p.name,
            price: format_price(p.price),
        }
    }
}

#[derive(Template)]
#[template(path = "quiz.html")]
pub struct QuizPage {
    pub title: &'static str,
    pub current_user: Option<SessionUser>,
    pub questions: Vec<QuestionView>,
    pub recommendations: Option<Vec<RecommendationView>>,
    pub score: Option<i64>,
    pub message: Option<&'static str>,
}

impl QuizPage {
    pub fn new(current_user: Option<SessionUser>, questions: Vec<QuestionView>) -> Self {
        Self {
            title: "Skin Quiz",
            current_user,
            questions,
            recommendations: None,
            score: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}
