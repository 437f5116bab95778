//! Application state for the web layer.

use std::sync::Arc;

use crate::geocode::CachedGeocoder;
use crate::planner::Router;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Router over the loaded transit network
    pub router: Arc<Router>,

    /// Cached place-name geocoder
    pub geocoder: Arc<CachedGeocoder>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(router: Router, geocoder: CachedGeocoder) -> Self {
        Self {
            router: Arc::new(router),
            geocoder: Arc::new(geocoder),
        }
    }
}
