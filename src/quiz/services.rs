use std::collections::HashSet;

use tracing::debug;

use super::dto::{OptionView, QuestionView};
use crate::store::{QuizOption, QuizQuestion, RecommendedProduct, Store};

/// Answers picked out of the submitted form values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Selection {
    /// Distinct option ids, in first-seen order.
    pub option_ids: Vec<i32>,
    /// Some value was a non-zero number, whether or not it names an option.
    pub answered: bool,
}

/// Values that are not numbers, or are zero, are dropped. Fractional numbers
/// count as answers but never name an option. Repeated ids are kept once.
pub fn parse_selection<'a>(values: impl IntoIterator<Item = &'a str>) -> Selection {
    let mut seen = HashSet::new();
    let mut selection = Selection::default();
    for value in values {
        let number = match value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n != 0.0 => n,
            _ => continue,
        };
        selection.answered = true;
        if number.fract() == 0.0 && number >= f64::from(i32::MIN) && number <= f64::from(i32::MAX) {
            let id = number as i32;
            if seen.insert(id) {
                selection.option_ids.push(id);
            }
        }
    }
    selection
}

/// Sum of option scores; a NULL score counts as zero.
pub fn tally(scores: &[Option<i32>]) -> i64 {
    scores.iter().map(|s| i64::from(s.unwrap_or(0))).sum()
}

pub fn group_questions(questions: Vec<QuizQuestion>, options: Vec<QuizOption>) -> Vec<QuestionView> {
    questions
        .into_iter()
        .map(|q| QuestionView {
            id: q.question_id,
            text: q.question_text,
            options: options
                .iter()
                .filter(|o| o.question_id == q.question_id)
                .map(|o| OptionView {
                    id: o.option_id,
                    text: o.option_text.clone(),
                })
                .collect(),
        })
        .collect()
}

pub async fn load_questions(store: &dyn Store) -> anyhow::Result<Vec<QuestionView>> {
    let questions = store.quiz_questions().await?;
    let options = store.quiz_options().await?;
    Ok(group_questions(questions, options))
}

#[derive(Debug, Clone)]
pub struct QuizResult {
    pub score: i64,
    pub recommendations: Vec<RecommendedProduct>,
}

/// Score the selected options and find the products whose rule covers it.
pub async fn score_answers(
    store: &dyn Store,
    option_ids: &[i32],
    skin_type: Option<i32>,
) -> anyhow::Result<QuizResult> {
    let scores = store.option_scores(option_ids).await?;
    let score = tally(&scores);
    let recommendations = store.recommendations(score, skin_type).await?;
    debug!(
        selected = option_ids.len(),
        matched = scores.len(),
        score,
        recommendations = recommendations.len(),
        "quiz scored"
    );
    Ok(QuizResult {
        score,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn non_numeric_and_zero_values_are_dropped() {
        let selection = parse_selection(["3", "abc", "", "0", " 7 ", "1.5", "-2", "NaN"]);
        assert_eq!(selection.option_ids, vec![3, 7, -2]);
        assert!(selection.answered);
    }

    #[test]
    fn repeated_ids_count_once() {
        assert_eq!(parse_selection(["4", "4", "2", "4"]).option_ids, vec![4, 2]);
    }

    #[test]
    fn lone_fraction_is_answered_without_ids() {
        let selection = parse_selection(["1.5"]);
        assert!(selection.answered);
        assert!(selection.option_ids.is_empty());
    }

    #[test]
    fn only_blank_and_zero_is_unanswered() {
        assert_eq!(parse_selection(["", "0", "abc", "0.0"]), Selection::default());
    }

    #[test]
    fn tally_treats_null_scores_as_zero() {
        assert_eq!(tally(&[Some(2), None, Some(5)]), 7);
        assert_eq!(tally(&[]), 0);
    }

    #[tokio::test]
    async fn options_are_grouped_under_their_question() {
        let store = MemoryStore::seeded();
        let questions = load_questions(&store).await.unwrap();
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.options.len() == 3));
        assert_eq!(questions[1].options[0].text, "Rarely");
    }

    #[tokio::test]
    async fn unknown_ids_contribute_nothing() {
        let store = MemoryStore::new()
            .with_option(1, 1, "Tight", Some(2))
            .with_option(2, 1, "Oily", Some(5));
        let scores = store.option_scores(&[1, 2, 99]).await.unwrap();
        assert_eq!(tally(&scores), 7);
    }

    #[tokio::test]
    async fn total_inside_interval_returns_product() {
        let store = MemoryStore::new()
            .with_product(crate::store::memory::product(10, "Calm Gel", "Dermalab", 12.0, "Gel", None, None))
            .with_option(1, 1, "Tight", Some(2))
            .with_option(2, 2, "Often", Some(5))
            .with_rule(5, 10, None, 10);
        let result = score_answers(&store, &[1, 2], None).await.unwrap();
        assert_eq!(result.score, 7);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].name, "Calm Gel");
    }

    #[tokio::test]
    async fn total_outside_every_interval_finds_nothing() {
        let store = MemoryStore::seeded();
        let result = score_answers(&store, &[9], None).await.unwrap();
        assert_eq!(result.score, 0);
        assert!(result.recommendations.is_empty());
    }
}
