//! Creation payloads sent to the destination.
//!
//! Payloads are serialized once with `serde_json` and the exact bytes are both
//! sent and kept for error reports.

use juicescout_shared::{Article, MigrationError, Result};
use serde::Serialize;

/// Inline line-break markup understood by the destination editor.
const LINE_BREAK: &str = "<br>";

/// `POST /v1/categories` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload<'a> {
    pub collection_id: &'a str,
    pub name: &'a str,
}

/// `POST /v1/articles` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload<'a> {
    pub collection_id: &'a str,
    pub name: String,
    pub categories: &'a [String],
    pub text: String,
}

impl<'a> ArticlePayload<'a> {
    /// Build the payload for `article`, converting newlines to line-break markup.
    pub fn from_article(article: &'a Article, collection_id: &'a str) -> Self {
        Self {
            collection_id,
            name: to_line_breaks(&article.name),
            categories: &article.categories,
            text: to_line_breaks(&article.text),
        }
    }
}

/// Replace `\r\n` and `\n` with [`LINE_BREAK`].
pub fn to_line_breaks(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\n', LINE_BREAK)
}

/// Serialize a payload to the JSON string that goes on the wire.
pub fn encode<T: Serialize>(payload: &T) -> Result<String> {
    serde_json::to_string(payload)
        .map_err(|e| MigrationError::validation(format!("failed to encode payload: {e}")))
}
