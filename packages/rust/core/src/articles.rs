//! Article migration with a per-response continue/abort policy.

use tracing::{error, info, instrument, warn};

use juicescout_scout::{ArticlePayload, CreateResponse, ScoutClient, encode};
use juicescout_shared::{Article, MigrationError, Result};

use crate::pipeline::ProgressReporter;

/// What the run does after one creation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Move on to the next article.
    Continue,
    /// Stop the run: the request itself is malformed and every later request
    /// would fail the same way.
    Abort,
}

/// Classify an article creation response.
pub fn classify_article_response(response: &CreateResponse) -> Verdict {
    if response.is_malformed_payload() {
        Verdict::Abort
    } else {
        Verdict::Continue
    }
}

/// Result of [`migrate_articles`].
#[derive(Debug, Clone, Default)]
pub struct ArticleMigration {
    /// Articles the destination acknowledged with 201.
    pub created: usize,
    /// Articles the destination rejected.
    pub failed: usize,
}

/// Create each article in `collection_id`, one request at a time.
///
/// Rejections are logged and skipped, except a malformed-payload rejection,
/// which returns [`MigrationError::MalformedPayload`] carrying the payload.
#[instrument(skip_all, fields(articles = articles.len(), %collection_id))]
pub async fn migrate_articles(
    client: &ScoutClient,
    articles: &[Article],
    collection_id: &str,
    progress: &dyn ProgressReporter,
) -> Result<ArticleMigration> {
    let total = articles.len();
    let mut outcome = ArticleMigration::default();

    for (i, article) in articles.iter().enumerate() {
        progress.item("article", &article.name, i + 1, total);

        let payload = encode(&ArticlePayload::from_article(article, collection_id))?;
        let response = client.create_article(&payload).await?;

        if response.is_created() {
            outcome.created += 1;
            info!(name = %article.name, "article created");
            continue;
        }

        match classify_article_response(&response) {
            Verdict::Abort => {
                error!(
                    name = %article.name,
                    status = response.status,
                    body = %response.body,
                    %payload,
                    "destination rejected article payload as malformed, stopping"
                );
                return Err(MigrationError::MalformedPayload {
                    status: response.status,
                    body: response.body,
                    payload,
                });
            }
            Verdict::Continue => {
                outcome.failed += 1;
                warn!(
                    name = %article.name,
                    status = response.status,
                    body = %response.body,
                    "article creation rejected"
                );
            }
        }
    }

    info!(
        created = outcome.created,
        failed = outcome.failed,
        "article migration complete"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SilentProgress;
    use juicescout_shared::{DestinationConfig, DestinationSection};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INVALID_JSON: &str = r#"{"code":400,"error":"Invalid Json"}"#;

    fn client_for(server: &MockServer) -> ScoutClient {
        let section = DestinationSection {
            base_url: server.uri(),
            ..DestinationSection::default()
        };
        ScoutClient::new(&DestinationConfig::new(&section, "key").unwrap()).unwrap()
    }

    fn article(name: &str) -> Article {
        Article {
            name: name.into(),
            text: "body".into(),
            categories: vec!["cat-1".into()],
        }
    }

    #[test]
    fn classification() {
        let abort = CreateResponse {
            status: 400,
            body: INVALID_JSON.into(),
        };
        assert_eq!(classify_article_response(&abort), Verdict::Abort);

        let dup = CreateResponse {
            status: 400,
            body: r#"{"code":400,"error":"Article name already exists"}"#.into(),
        };
        assert_eq!(classify_article_response(&dup), Verdict::Continue);

        let server_error = CreateResponse {
            status: 503,
            body: String::new(),
        };
        assert_eq!(classify_article_response(&server_error), Verdict::Continue);
    }

    #[tokio::test]
    async fn malformed_payload_halts_the_run() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/articles"))
            .respond_with(ResponseTemplate::new(400).set_body_string(INVALID_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let articles = vec![article("First"), article("Second")];
        let err = migrate_articles(&client_for(&server), &articles, "col-1", &SilentProgress)
            .await
            .unwrap_err();

        match err {
            MigrationError::MalformedPayload {
                status, payload, ..
            } => {
                assert_eq!(status, 400);
                assert!(payload.contains(r#""name":"First""#));
                assert!(payload.contains(r#""collectionId":"col-1""#));
            }
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_rejections_continue() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/articles"))
            .and(body_partial_json(serde_json::json!({"name": "Duplicate"})))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"code":400,"error":"Name already exists"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/articles"))
            .and(body_partial_json(serde_json::json!({"name": "Fresh"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let articles = vec![article("Duplicate"), article("Fresh")];
        let outcome = migrate_articles(&client_for(&server), &articles, "col-1", &SilentProgress)
            .await
            .unwrap();

        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.failed, 1);
    }
}
