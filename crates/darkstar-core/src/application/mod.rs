pub mod aggregator;

pub use aggregator::{
    resolve_status,
    FanOutAggregator,
};
