//! Shared application state for all routes.

use crate::config::ApiMode;
use crate::store::CatalogStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub mode: ApiMode,
    /// Realm advertised in the `WWW-Authenticate` challenge.
    pub auth_realm: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, mode: ApiMode, auth_realm: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            mode,
            auth_realm: auth_realm.into(),
        }
    }
}
