//! Destination Docs API client.
//!
//! This crate provides:
//! - [`ScoutClient`] — authenticated listing and creation calls
//! - [`models`] — listing envelopes and [`CreateResponse`] classification
//! - [`payload`] — JSON creation payloads and line-break conversion

pub mod client;
pub mod models;
pub mod payload;

pub use client::ScoutClient;
pub use models::{Collection, CreateResponse, RemoteCategory};
pub use payload::{ArticlePayload, CategoryPayload, encode, to_line_breaks};
