//! Shared per-process context handed to every tool handler.

use crate::cache::ResponseCache;
use crate::drive::DriveApi;
use std::sync::Arc;

/// Everything a tool handler needs: the Drive collaborator and the
/// short-lived response cache.
///
/// Constructed once in `main` (or per test) and passed explicitly — there is
/// no module-global client and no initialization ordering to get wrong.
/// Cloning is cheap; all state is behind `Arc`.
#[derive(Clone)]
pub struct DriveContext {
    api: Arc<dyn DriveApi>,
    cache: Arc<ResponseCache>,
}

impl std::fmt::Debug for DriveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveContext").finish_non_exhaustive()
    }
}

impl DriveContext {
    pub fn new(api: Arc<dyn DriveApi>) -> Self {
        Self {
            api,
            cache: Arc::new(ResponseCache::new()),
        }
    }

    pub fn api(&self) -> &dyn DriveApi {
        self.api.as_ref()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}
