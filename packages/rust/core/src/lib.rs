//! Core migration logic for JuiceScout.
//!
//! This crate ties together export parsing, category mapping, article
//! assembly, and destination creation into one sequential run
//! ([`pipeline::run_migration`]).

pub mod articles;
pub mod assembler;
pub mod categories;
pub mod pipeline;
