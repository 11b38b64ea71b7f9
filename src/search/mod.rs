//! Fuzzy multi-variant search and relevance ranking.
//!
//! Drive's native search is a literal substring match over file names. This
//! module routes around that: expand the query into variants, fan the
//! variants out as independent listing calls, merge by file id, then rank by
//! a composite relevance score against the original query.

pub(crate) mod levenshtein;
pub(crate) mod normalize;
pub(crate) mod orchestrator;
pub(crate) mod scoring;
pub(crate) mod variants;

// Public re-exports (used via lib.rs and the integration tests)
pub use levenshtein::distance;
pub use normalize::normalize;
pub use orchestrator::{search_files, ScoredFile, SearchOptions};
pub use scoring::relevance_score;
pub use variants::generate_variants;
