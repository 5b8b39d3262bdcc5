//! Raw export rows → typed entities.
//!
//! Column layouts by position:
//! - categories: `id, parent, name`
//! - questions: `name, category, id, views`
//! - answers: `question, body`
//!
//! Row 0 is the header and is always skipped. Integer columns are parsed
//! leniently: anything unparsable becomes `0`.

use juicescout_shared::{Answer, Category, Question};
use tracing::{debug, warn};

use crate::reader::Row;

/// Convert category rows into [`Category`] entities, in file order.
pub fn process_categories(rows: &[Row]) -> Vec<Category> {
    rows.iter()
        .enumerate()
        .skip(1)
        .map(|(index, row)| {
            let category = Category {
                id: int_field(row, 0, "id", index),
                parent: int_field(row, 1, "parent", index),
                name: text_field(row, 2),
            };
            debug!(name = %category.name, id = category.id, "processed category");
            category
        })
        .collect()
}

/// Convert question rows into [`Question`] entities, in file order.
pub fn process_questions(rows: &[Row]) -> Vec<Question> {
    rows.iter()
        .enumerate()
        .skip(1)
        .map(|(index, row)| {
            let question = Question {
                name: text_field(row, 0),
                category: int_field(row, 1, "category", index),
                id: int_field(row, 2, "id", index),
                views: int_field(row, 3, "views", index),
            };
            debug!(name = %question.name, id = question.id, "processed question");
            question
        })
        .collect()
}

/// Convert answer rows into [`Answer`] entities, in file order.
pub fn process_answers(rows: &[Row]) -> Vec<Answer> {
    rows.iter()
        .enumerate()
        .skip(1)
        .map(|(index, row)| {
            let answer = Answer {
                question: int_field(row, 0, "question", index),
                body: text_field(row, 1),
            };
            debug!(question = answer.question, "processed answer");
            answer
        })
        .collect()
}

fn text_field(row: &Row, index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

/// Parse an integer column, falling back to `0`.
fn int_field(row: &Row, index: usize, column: &str, row_index: usize) -> i64 {
    let raw = row.get(index).map(String::as_str).unwrap_or("");

    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            if !raw.is_empty() {
                warn!(column, row = row_index, value = raw, "not an integer, using 0");
            }
            0
        }
    }
}
