//! Source export parsing for JuiceScout.
//!
//! This crate provides:
//! - [`reader`] — comma-separated export files → raw rows (header included)
//! - [`normalize`] — raw rows → [`Category`], [`Question`], [`Answer`] entities
//!
//! [`Category`]: juicescout_shared::Category
//! [`Question`]: juicescout_shared::Question
//! [`Answer`]: juicescout_shared::Answer

pub mod normalize;
pub mod reader;

pub use normalize::{process_answers, process_categories, process_questions};
pub use reader::{Row, parse_records, read_records};
