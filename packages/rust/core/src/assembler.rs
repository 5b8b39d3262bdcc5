//! Article assembler.
//!
//! Joins each question with its first answer and its destination category,
//! producing one [`Article`] per question in question order.

use tracing::{debug, info, instrument, warn};

use juicescout_shared::{Answer, Article, CategoryMapping, Question};

/// Assemble articles from questions, answers, and category mappings.
///
/// - The first answer whose `question` equals the question id wins; no answer
///   means an empty body.
/// - The first non-orphan mapping whose `source_id` equals the question's
///   category supplies the single destination category; no mapping means an
///   uncategorized article.
#[instrument(skip_all, fields(questions = questions.len(), answers = answers.len(), mappings = mappings.len()))]
pub fn assemble_articles(
    mappings: &[CategoryMapping],
    questions: &[Question],
    answers: &[Answer],
) -> Vec<Article> {
    let articles: Vec<Article> = questions
        .iter()
        .map(|question| assemble_one(mappings, question, answers))
        .collect();

    info!(articles = articles.len(), "articles assembled");
    articles
}

fn assemble_one(mappings: &[CategoryMapping], question: &Question, answers: &[Answer]) -> Article {
    let text = match answers.iter().find(|a| a.question == question.id) {
        Some(answer) => answer.body.clone(),
        None => {
            debug!(question = question.id, "no answer found, using empty body");
            String::new()
        }
    };

    let categories: Vec<String> = mappings
        .iter()
        .find(|m| !m.is_orphan() && m.source_id == question.category)
        .map(|m| vec![m.destination_id.clone()])
        .unwrap_or_default();

    if categories.is_empty() {
        warn!(
            question = question.id,
            category = question.category,
            name = %question.name,
            "no destination category for question, article will be uncategorized"
        );
    }

    Article {
        name: question.name.clone(),
        text,
        categories,
    }
}
