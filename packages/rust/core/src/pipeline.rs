//! End-to-end migration pipeline:
//! categories → destination categories → questions + answers → articles → destination articles.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use juicescout_records::{process_answers, process_categories, process_questions, read_records};
use juicescout_scout::ScoutClient;
use juicescout_shared::{DestinationConfig, Result};

use crate::articles::migrate_articles;
use crate::assembler::assemble_articles;
use crate::categories::migrate_categories;

/// Configuration for [`run_migration`].
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Categories export (`id,parent,name`).
    pub categories_path: PathBuf,
    /// Questions export (`name,category,id,views`).
    pub questions_path: PathBuf,
    /// Answers export (`question,body`).
    pub answers_path: PathBuf,
    /// Label of the source help desk.
    pub source_name: String,
    /// Collection to migrate into; the first listed one when `None`.
    pub collection_id: Option<String>,
    /// Destination API settings.
    pub destination: DestinationConfig,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Source help desk label.
    pub source_name: String,
    /// Collection everything was attached to.
    pub collection_id: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Source categories parsed.
    pub categories: usize,
    /// Categories created on the destination.
    pub categories_created: usize,
    /// Category creations the destination rejected.
    pub categories_failed: usize,
    /// Mappings built from the destination listing.
    pub mappings: usize,
    /// Mappings without a source counterpart.
    pub orphan_mappings: usize,
    /// Articles assembled (one per question).
    pub articles: usize,
    /// Articles created on the destination.
    pub articles_created: usize,
    /// Article creations the destination rejected.
    pub articles_failed: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each creation request.
    fn item(&self, kind: &str, name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &MigrationReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn item(&self, _kind: &str, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &MigrationReport) {}
}

/// Run the full migration, one step after another.
///
/// 1. Parse and normalize categories
/// 2. Create destination categories and build the mapping table
/// 3. Parse and normalize questions and answers
/// 4. Assemble articles
/// 5. Create destination articles
///
/// Nothing is retried. Any fatal error ends the run; whatever was already
/// created on the destination stays there.
#[instrument(skip_all, fields(source = %config.source_name))]
pub async fn run_migration(
    config: &MigrationConfig,
    progress: &dyn ProgressReporter,
) -> Result<MigrationReport> {
    let start = Instant::now();
    let started_at = Utc::now();

    info!(source = %config.source_name, "beginning migration");

    let client = ScoutClient::new(&config.destination)?;

    // --- Phase 1: Categories ---
    progress.phase("Parsing categories");
    let categories = process_categories(&read_records(&config.categories_path)?);

    // --- Phase 2: Destination categories ---
    progress.phase("Migrating categories");
    let category_migration = migrate_categories(
        &client,
        &categories,
        config.collection_id.as_deref(),
        progress,
    )
    .await?;

    // --- Phase 3: Questions and answers ---
    progress.phase("Parsing questions and answers");
    let questions = process_questions(&read_records(&config.questions_path)?);
    let answers = process_answers(&read_records(&config.answers_path)?);

    // --- Phase 4: Assemble ---
    progress.phase("Assembling articles");
    let articles = assemble_articles(&category_migration.mappings, &questions, &answers);

    // --- Phase 5: Destination articles ---
    progress.phase("Migrating articles");
    let article_migration = migrate_articles(
        &client,
        &articles,
        &category_migration.collection_id,
        progress,
    )
    .await?;

    let report = MigrationReport {
        source_name: config.source_name.clone(),
        collection_id: category_migration.collection_id,
        started_at,
        categories: categories.len(),
        categories_created: category_migration.created,
        categories_failed: category_migration.failed,
        mappings: category_migration.mappings.len(),
        orphan_mappings: category_migration
            .mappings
            .iter()
            .filter(|m| m.is_orphan())
            .count(),
        articles: articles.len(),
        articles_created: article_migration.created,
        articles_failed: article_migration.failed,
        elapsed: start.elapsed(),
    };

    progress.done(&report);

    info!(
        collection_id = %report.collection_id,
        categories_created = report.categories_created,
        articles_created = report.articles_created,
        articles_failed = report.articles_failed,
        elapsed_ms = report.elapsed.as_millis(),
        "migration complete"
    );

    Ok(report)
}
