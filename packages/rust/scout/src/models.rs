//! Wire types for the destination Docs API.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// A destination collection (top-level container for categories and articles).
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A category as listed by the destination.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCategory {
    pub id: String,
    pub name: String,
}

/// `GET /v1/collections` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsEnvelope {
    pub collections: Page<Collection>,
}

/// `GET /v1/collections/{id}/categories` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    pub categories: Page<RemoteCategory>,
}

/// One page of a listing. A missing page count means a single page.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default = "first_page")]
    pub pages: u32,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

fn first_page() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Creation responses
// ---------------------------------------------------------------------------

/// Error signatures the API returns when the request itself was built wrong.
const MALFORMED_SIGNATURES: [&str; 2] = [
    "Invalid Json",
    "Content-Type must be set to 'application/json'",
];

/// Error body returned by the API on 4xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    error: Option<String>,
}

/// Raw outcome of a creation call. Any HTTP response is an outcome; only
/// transport failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResponse {
    pub status: u16,
    pub body: String,
}

impl CreateResponse {
    /// The resource was created.
    pub fn is_created(&self) -> bool {
        self.status == 201
    }

    /// The API rejected the request as unparsable JSON or wrong content type.
    pub fn is_malformed_payload(&self) -> bool {
        if self.status != 400 {
            return false;
        }

        match serde_json::from_str::<ApiErrorBody>(&self.body) {
            Ok(ApiErrorBody {
                code,
                error: Some(error),
            }) => {
                code.is_none_or(|c| c == 400) && MALFORMED_SIGNATURES.contains(&error.as_str())
            }
            _ => false,
        }
    }
}
