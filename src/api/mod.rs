pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::grouping::GroupingConfig;
use crate::search::SearchService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: SearchService,
    pub grouping: Arc<GroupingConfig>,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self {
            search,
            grouping: Arc::new(GroupingConfig::default()),
        }
    }

    /// Set the grouping defaults used by grouped searches
    pub fn with_grouping(mut self, grouping: GroupingConfig) -> Self {
        self.grouping = Arc::new(grouping);
        self
    }
}
