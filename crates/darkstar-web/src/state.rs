use std::sync::Arc;

use darkstar_core::{
    CoreContext,
    FanOutAggregator,
};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<FanOutAggregator>,
}

impl AppState {
    pub fn new(core: &CoreContext) -> Self {
        Self {
            aggregator: core.aggregator.clone(),
        }
    }
}
