//! Ranked file search: the one tool with real engineering behind it.

use crate::context::DriveContext;
use crate::error::Result;
use crate::search::{search_files, ScoredFile, SearchOptions};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;
use std::time::Duration;

/// Search responses go stale fast; cache them for a minute only.
const SEARCH_CACHE_TTL: Duration = Duration::from_secs(60);

const DEFAULT_MAX_RESULTS: usize = 20;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilesRequest {
    /// Free-text search query for file names in Google Drive
    pub query: String,
    /// Maximum number of results to return (default: 20)
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Filter by file type (e.g. 'application/vnd.google-apps.spreadsheet')
    #[serde(default)]
    pub file_type: Option<String>,
    /// Order candidate listing by field (e.g. 'name', 'modifiedTime desc')
    #[serde(default)]
    pub order_by: Option<String>,
    /// Include trashed files
    #[serde(default)]
    pub include_trashed: bool,
}

/// Execute the ranked search, consulting the response cache first.
pub async fn handle_search_files(
    context: &DriveContext,
    request: SearchFilesRequest,
) -> Result<String> {
    if request.query.trim().is_empty() {
        anyhow::bail!("search query must not be empty");
    }

    let max_results = request.max_results.unwrap_or(DEFAULT_MAX_RESULTS).max(1);
    let cache_key = format!(
        "search:{}:{}:{}:{}:{}",
        request.query,
        max_results,
        request.file_type.as_deref().unwrap_or(""),
        request.order_by.as_deref().unwrap_or(""),
        request.include_trashed,
    );

    if let Some(cached) = context.cache().get(&cache_key).await {
        tracing::debug!(query = %request.query, "returning cached search response");
        return Ok(cached);
    }

    let options = SearchOptions {
        max_results,
        file_type: request.file_type.clone(),
        order_by: request.order_by.clone(),
        include_trashed: request.include_trashed,
    };

    let results = search_files(context.api(), &request.query, &options).await?;
    let report = format_search_results(&results, &request.query);

    context
        .cache()
        .put_with_ttl(cache_key, report.clone(), SEARCH_CACHE_TTL)
        .await;

    Ok(report)
}

/// Renders the ranked list as a numbered report.
fn format_search_results(results: &[ScoredFile], original_query: &str) -> String {
    if results.is_empty() {
        return format!("No files found for query: \"{original_query}\"");
    }

    let mut output = format!(
        "Found {} files for query: \"{original_query}\"\n",
        results.len()
    );

    for (index, result) in results.iter().enumerate() {
        let file = &result.file;
        let size = file.size.map_or_else(
            || "N/A".to_string(),
            |bytes| format!("{}KB", (bytes as f64 / 1024.0).round() as u64),
        );
        let modified = file.modified_time.map_or_else(
            || "N/A".to_string(),
            |dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        let link = file.web_view_link.as_deref().unwrap_or("N/A");
        let mime_type = file.mime_type.as_deref().unwrap_or("N/A");

        output
            .write_fmt(format_args!(
                "\n{}. **{}** (Score: {}) (ID: `{}`)\n   - Type: {}\n   - Size: {}\n   - Modified: {}\n   - Link: {}\n",
                index + 1,
                file.name,
                result.score.round() as i64,
                file.id,
                mime_type,
                size,
                modified,
                link,
            ))
            .expect("writing to a String cannot fail");
    }

    output
}
