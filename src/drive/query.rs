//! Drive query-language filter construction.
//!
//! Filters are conjunctions of clauses in Drive's query mini-language
//! (`name contains 'x' and trashed = false`). Every user-influenced string
//! passes through [`escape`] so a variant can never terminate the quoted
//! literal it is embedded in.

/// Escapes a string for embedding in a single-quoted Drive query literal.
///
/// Backslashes are doubled first, then single quotes are escaped, per the
/// Drive query grammar.
pub fn escape(term: &str) -> String {
    term.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Builder for a conjunction of filter clauses.
#[derive(Debug, Default)]
pub struct Filter {
    clauses: Vec<String>,
}

impl Filter {
    /// Match file names containing `term` as a literal substring.
    pub fn name_contains(mut self, term: &str) -> Self {
        self.clauses.push(format!("name contains '{}'", escape(term)));
        self
    }

    /// Restrict to an exact MIME type.
    pub fn mime_type(mut self, mime_type: &str) -> Self {
        self.clauses
            .push(format!("mimeType = '{}'", escape(mime_type)));
        self
    }

    /// Exclude trashed files.
    pub fn not_trashed(mut self) -> Self {
        self.clauses.push("trashed = false".to_string());
        self
    }

    /// Renders the conjunction, or `None` when no clause was added.
    pub fn build(self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(self.clauses.join(" and "))
        }
    }
}

/// The per-variant search filter: name match, optional MIME restriction,
/// trash exclusion unless explicitly included.
pub fn search_filter(variant: &str, file_type: Option<&str>, include_trashed: bool) -> String {
    let mut filter = Filter::default().name_contains(variant);
    if let Some(mime) = file_type {
        filter = filter.mime_type(mime);
    }
    if !include_trashed {
        filter = filter.not_trashed();
    }
    // At least the name clause is always present.
    filter.build().unwrap_or_default()
}
