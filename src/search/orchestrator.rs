//! Multi-variant search orchestration.
//!
//! One listing request per query variant, merged by file id, scored against
//! the original query, sorted, truncated. Requests fan out concurrently but
//! are joined in variant-generation order, so dedup (first occurrence wins)
//! is deterministic regardless of response arrival order.

use crate::drive::{DriveApi, DriveFile, ListParams, LIST_FIELDS};
use crate::drive::query::search_filter;
use crate::error::DriveError;
use crate::search::scoring::relevance_score;
use crate::search::variants::generate_variants;
use ahash::AHashSet;
use futures::future::join_all;

/// Raw results requested per variant: headroom for re-ranking, capped at
/// the Drive page maximum.
const PAGE_CAP: usize = 100;

const DEFAULT_ORDER: &str = "modifiedTime desc";

/// A candidate file with its composite relevance score.
#[derive(Debug, Clone)]
pub struct ScoredFile {
    pub file: DriveFile,
    pub score: f64,
}

/// Knobs for one search invocation.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_results: usize,
    pub file_type: Option<String>,
    pub order_by: Option<String>,
    pub include_trashed: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 20,
            file_type: None,
            order_by: None,
            include_trashed: false,
        }
    }
}

/// Runs the ranked search.
///
/// Individual variant failures are logged and skipped; the search only fails
/// when *every* variant fails, in which case the last underlying error is
/// surfaced. The returned list never exceeds `max_results` and contains each
/// file id at most once.
pub async fn search_files(
    api: &dyn DriveApi,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<ScoredFile>, DriveError> {
    let variants = generate_variants(query);
    tracing::debug!(query, variant_count = variants.len(), "generated search variants");

    let page_size = (options.max_results * 2).min(PAGE_CAP) as u32;
    let order_by = options
        .order_by
        .clone()
        .unwrap_or_else(|| DEFAULT_ORDER.to_string());

    let pages = join_all(variants.iter().map(|variant| {
        api.list_files(ListParams {
            query: Some(search_filter(
                variant,
                options.file_type.as_deref(),
                options.include_trashed,
            )),
            page_size,
            page_token: None,
            order_by: Some(order_by.clone()),
            drive_id: None,
            fields: LIST_FIELDS,
        })
    }))
    .await;

    let mut seen = AHashSet::new();
    let mut merged: Vec<DriveFile> = Vec::new();
    let mut succeeded = false;
    let mut last_error = None;

    for (variant, page) in variants.iter().zip(pages) {
        match page {
            Ok(list) => {
                succeeded = true;
                for file in list.files {
                    if seen.insert(file.id.clone()) {
                        merged.push(file);
                    }
                }
            }
            Err(err) => {
                tracing::warn!(variant = %variant, error = %err, "search variant failed, continuing");
                last_error = Some(err);
            }
        }
    }

    if !succeeded {
        // Variants are never empty, so a fully failed search always has an
        // error to surface.
        return Err(last_error
            .unwrap_or_else(|| DriveError::Decode("no search variants produced".to_string())));
    }

    let total_candidates = merged.len();

    let mut scored: Vec<ScoredFile> = merged
        .into_iter()
        .map(|file| ScoredFile {
            score: relevance_score(&file.name, query),
            file,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.file.modified_time.cmp(&a.file.modified_time))
    });
    scored.truncate(options.max_results);

    tracing::info!(
        query,
        returned = scored.len(),
        candidates = total_candidates,
        "search complete"
    );

    Ok(scored)
}
