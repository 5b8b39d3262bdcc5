//! Category migration: create destination categories and map them back to
//! source categories.
//!
//! Destination categories are linked to source categories by exact,
//! case-sensitive name. The destination API does not echo source ids, so
//! category names must be unique within one export.

use std::collections::HashSet;

use tracing::{info, instrument, warn};

use juicescout_scout::{Collection, RemoteCategory, ScoutClient};
use juicescout_shared::{Category, CategoryMapping, MigrationError, Result};

use crate::pipeline::ProgressReporter;

/// Result of [`migrate_categories`].
#[derive(Debug, Clone)]
pub struct CategoryMigration {
    /// Collection every category and article is attached to.
    pub collection_id: String,
    /// Mapping table built from the post-creation listing.
    pub mappings: Vec<CategoryMapping>,
    /// Categories the destination acknowledged with 201.
    pub created: usize,
    /// Categories the destination rejected.
    pub failed: usize,
}

/// Create every source category in the selected collection and build the
/// source ↔ destination mapping table.
///
/// Listing failures abort; rejected creations are logged and skipped.
#[instrument(skip_all, fields(categories = categories.len()))]
pub async fn migrate_categories(
    client: &ScoutClient,
    categories: &[Category],
    preferred_collection: Option<&str>,
    progress: &dyn ProgressReporter,
) -> Result<CategoryMigration> {
    let collections = client.list_collections().await?;
    let collection_id = select_collection(&collections, preferred_collection)?;
    info!(%collection_id, "selected destination collection");

    for name in duplicate_names(categories) {
        warn!(name, "duplicate source category name, articles may land in the wrong category");
    }

    let total = categories.len();
    let mut created = 0;
    let mut failed = 0;

    for (i, category) in categories.iter().enumerate() {
        progress.item("category", &category.name, i + 1, total);

        let response = client.create_category(&collection_id, &category.name).await?;
        if response.is_created() {
            created += 1;
            info!(name = %category.name, "category created");
        } else {
            failed += 1;
            warn!(
                name = %category.name,
                status = response.status,
                body = %response.body,
                "category creation rejected"
            );
        }
    }

    let remote = client.list_categories(&collection_id).await?;
    let mappings = build_mappings(&remote, categories);

    info!(
        created,
        failed,
        mappings = mappings.len(),
        "category migration complete"
    );

    Ok(CategoryMigration {
        collection_id,
        mappings,
        created,
        failed,
    })
}

/// Pick the target collection: the preferred id if given, else the first listed.
pub fn select_collection(collections: &[Collection], preferred: Option<&str>) -> Result<String> {
    if collections.is_empty() {
        return Err(MigrationError::NoCollections);
    }

    match preferred {
        Some(id) => collections
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.id.clone())
            .ok_or_else(|| {
                MigrationError::validation(format!("collection '{id}' not found on destination"))
            }),
        None => Ok(collections[0].id.clone()),
    }
}

/// Map each destination category to the last source category with the same name.
///
/// Destination categories without a source counterpart keep `source_id = 0`.
pub fn build_mappings(remote: &[RemoteCategory], source: &[Category]) -> Vec<CategoryMapping> {
    remote
        .iter()
        .map(|rc| {
            let source_id = source
                .iter()
                .rev()
                .find(|c| c.name == rc.name)
                .map(|c| c.id)
                .unwrap_or(0);

            if source_id == 0 {
                warn!(name = %rc.name, id = %rc.id, "destination category has no source counterpart");
            }

            CategoryMapping {
                source_id,
                destination_id: rc.id.clone(),
                name: rc.name.clone(),
            }
        })
        .collect()
}

/// Names that occur more than once in the source batch, in first-seen order.
pub fn duplicate_names(categories: &[Category]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for category in categories {
        let name = category.name.as_str();
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name);
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SilentProgress;
    use juicescout_shared::{DestinationConfig, DestinationSection};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            parent: 0,
            name: name.into(),
        }
    }

    fn remote(id: &str, name: &str) -> RemoteCategory {
        RemoteCategory {
            id: id.into(),
            name: name.into(),
        }
    }

    fn collection(id: &str) -> Collection {
        Collection {
            id: id.into(),
            name: None,
        }
    }

    #[test]
    fn first_collection_selected_by_default() {
        let collections = vec![collection("a"), collection("b")];
        assert_eq!(select_collection(&collections, None).unwrap(), "a");
        assert_eq!(select_collection(&collections, Some("b")).unwrap(), "b");
    }

    #[test]
    fn empty_collection_listing_is_fatal() {
        let err = select_collection(&[], None).unwrap_err();
        assert!(matches!(err, MigrationError::NoCollections));
    }

    #[test]
    fn unknown_preferred_collection_is_rejected() {
        let err = select_collection(&[collection("a")], Some("zzz")).unwrap_err();
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn mappings_join_on_exact_name() {
        let source = vec![
            category(1, "General"),
            category(2, "Billing"),
            category(3, "Dup"),
            category(4, "Dup"),
        ];
        let listed = vec![
            remote("d2", "Billing"),
            remote("d1", "General"),
            remote("d3", "general"),
            remote("d4", "Dup"),
        ];

        let mappings = build_mappings(&listed, &source);
        assert_eq!(mappings.len(), 4);
        assert_eq!(mappings[0].source_id, 2);
        assert_eq!(mappings[1].source_id, 1);
        // Case-sensitive: no match.
        assert!(mappings[2].is_orphan());
        // Duplicate names: the last source category wins.
        assert_eq!(mappings[3].source_id, 4);

        // Every non-orphan mapping names a real source category.
        for m in mappings.iter().filter(|m| !m.is_orphan()) {
            assert!(source.iter().any(|c| c.id == m.source_id && c.name == m.name));
        }
    }

    #[test]
    fn duplicate_names_reported_once() {
        let source = vec![
            category(1, "A"),
            category(2, "B"),
            category(3, "A"),
            category(4, "A"),
        ];
        assert_eq!(duplicate_names(&source), vec!["A"]);
        assert!(duplicate_names(&source[..2]).is_empty());
    }

    fn client_for(server: &MockServer) -> ScoutClient {
        let section = DestinationSection {
            base_url: server.uri(),
            ..DestinationSection::default()
        };
        ScoutClient::new(&DestinationConfig::new(&section, "key").unwrap()).unwrap()
    }

    async fn mount_collections(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1/collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn rejected_category_does_not_abort() {
        let server = MockServer::start().await;
        mount_collections(
            &server,
            serde_json::json!({"collections": {"items": [{"id": "col-1"}]}}),
        )
        .await;

        Mock::given(method("POST"))
            .and(path("/v1/categories"))
            .and(body_json(serde_json::json!({"collectionId": "col-1", "name": "Taken"})))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"code":400,"error":"Name taken"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/categories"))
            .and(body_json(serde_json::json!({"collectionId": "col-1", "name": "Fresh"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/collections/col-1/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "categories": {"items": [
                    {"id": "d-fresh", "name": "Fresh"},
                    {"id": "d-old", "name": "Older"}
                ]}
            })))
            .mount(&server)
            .await;

        let source = vec![category(1, "Taken"), category(2, "Fresh")];
        let result = migrate_categories(&client_for(&server), &source, None, &SilentProgress)
            .await
            .unwrap();

        assert_eq!(result.collection_id, "col-1");
        assert_eq!(result.created, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.mappings.len(), 2);
        assert_eq!(result.mappings[0].source_id, 2);
        assert_eq!(result.mappings[0].destination_id, "d-fresh");
        assert!(result.mappings[1].is_orphan());
    }

    #[tokio::test]
    async fn no_collections_aborts_before_creating() {
        let server = MockServer::start().await;
        mount_collections(&server, serde_json::json!({"collections": {"items": []}})).await;

        Mock::given(method("POST"))
            .and(path("/v1/categories"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = migrate_categories(
            &client_for(&server),
            &[category(1, "General")],
            None,
            &SilentProgress,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MigrationError::NoCollections));
    }
}
