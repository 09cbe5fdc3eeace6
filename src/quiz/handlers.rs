use axum::{extract::State, response::Html, Form};
use tracing::{error, info, instrument};

use super::dto::{QuestionView, QuizPage, RecommendationView};
use super::services::{load_questions, parse_selection, score_answers, QuizResult, Selection};
use crate::{
    auth::{extractors::CurrentUser, session::SessionUser},
    error::AppError,
    state::AppState,
    views::render,
};

const UNANSWERED: &str = "Please answer all questions before submitting.";
const NO_MATCH: &str = "No recommendations found for this score.";
const LOAD_FAILED: &str = "Unable to load quiz at the moment.";
const SCORING_FAILED: &str = "Something went wrong calculating your results.";

#[instrument(skip_all)]
pub async fn quiz_page(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let page = match load_questions(state.store.as_ref()).await {
        Ok(questions) => QuizPage::new(current_user, questions),
        Err(e) => {
            error!(error = %e, "loading quiz failed");
            QuizPage::new(current_user, Vec::new()).with_message(LOAD_FAILED)
        }
    };
    render(&page)
}

enum Submission {
    Unanswered(Vec<QuestionView>),
    Scored(Vec<QuestionView>, QuizResult),
}

/// Every form field is an answer; field names are ignored.
#[instrument(skip_all)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let selection = parse_selection(fields.iter().map(|(_, value)| value.as_str()));

    let page = match evaluate(&state, current_user.as_ref(), &selection).await {
        Ok(Submission::Unanswered(questions)) => {
            QuizPage::new(current_user, questions).with_message(UNANSWERED)
        }
        Ok(Submission::Scored(questions, result)) => {
            info!(score = result.score, matches = result.recommendations.len(), "quiz submitted");
            let mut page = QuizPage::new(current_user, questions);
            if result.recommendations.is_empty() {
                page.message = Some(NO_MATCH);
            }
            page.score = Some(result.score);
            page.recommendations = Some(
                result
                    .recommendations
                    .into_iter()
                    .map(RecommendationView::from)
                    .collect(),
            );
            page
        }
        Err(e) => {
            error!(error = %e, "submitting quiz failed");
            let questions = load_questions(state.store.as_ref())
                .await
                .unwrap_or_default();
            QuizPage::new(current_user, questions).with_message(SCORING_FAILED)
        }
    };
    render(&page)
}

async fn evaluate(
    state: &AppState,
    user: Option<&SessionUser>,
    selection: &Selection,
) -> anyhow::Result<Submission> {
    let store = state.store.as_ref();
    let questions = load_questions(store).await?;
    if !selection.answered {
        return Ok(Submission::Unanswered(questions));
    }
    let skin_type = match user {
        Some(user) => store.user_skin_type(user.id).await?,
        None => None,
    };
    let result = score_answers(store, &selection.option_ids, skin_type).await?;
    Ok(Submission::Scored(questions, result))
}
