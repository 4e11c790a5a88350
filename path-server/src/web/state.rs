//! Application state for the web layer.

use std::sync::Arc;

use crate::arrivals::ArrivalsClient;
use crate::cache::CachedArrivalsClient;
use crate::commute::CommuteStore;
use crate::planner::Planner;
use crate::topology::Topology;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<S = ArrivalsClient> {
    /// Route planner over the network topology
    pub planner: Planner,

    /// Cached arrivals feed
    pub arrivals: Arc<CachedArrivalsClient<S>>,

    /// Saved home/work pair
    pub commute_store: Arc<CommuteStore>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(
        planner: Planner,
        arrivals: Arc<CachedArrivalsClient<S>>,
        commute_store: CommuteStore,
    ) -> Self {
        Self {
            planner,
            arrivals,
            commute_store: Arc::new(commute_store),
        }
    }

    pub fn topology(&self) -> &Topology {
        self.planner.topology()
    }
}

// Manual impl so `S` itself needn't be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            planner: self.planner.clone(),
            arrivals: Arc::clone(&self.arrivals),
            commute_store: Arc::clone(&self.commute_store),
        }
    }
}
