//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::ClientStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// client store and display settings. It is built once at startup and never
/// mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn ClientStore>,
    shop_name: String,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence handle used by every handler
    /// * `shop_name` - Name shown in the page header
    pub fn new(store: Arc<dyn ClientStore>, shop_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                shop_name: shop_name.into(),
            }),
        }
    }

    /// Get a reference to the client store.
    #[must_use]
    pub fn store(&self) -> &dyn ClientStore {
        self.inner.store.as_ref()
    }

    /// Get the shop name shown in the page header.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.inner.shop_name
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("shop_name", &self.inner.shop_name)
            .finish_non_exhaustive()
    }
}
