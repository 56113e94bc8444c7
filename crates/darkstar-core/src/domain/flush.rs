use darkstar_plugin_api::{
    FlushParams,
    ProviderKind,
    ProviderResponse,
};
use indexmap::IndexMap;
use serde::Serialize;

/// Top-level message of an aggregate response with at least one failure
pub const AGGREGATE_ERROR_MESSAGE: &str = "A remote error occurred on one of the caches to flush";

/// Validated multi-provider flush, in the order the providers were given
#[derive(Debug, Clone, Default)]
pub struct FlushRequest {
    entries: IndexMap<ProviderKind, FlushParams>,
}

impl FlushRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: ProviderKind, params: FlushParams) -> Self {
        self.insert(provider, params);
        self
    }

    /// A provider given twice keeps its first position
    pub fn insert(&mut self, provider: ProviderKind, params: FlushParams) {
        self.entries.insert(provider, params);
    }

}

impl IntoIterator for FlushRequest {
    type Item = (ProviderKind, FlushParams);
    type IntoIter = indexmap::map::IntoIter<ProviderKind, FlushParams>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Body of an aggregate flush response
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// One entry per requested provider, in request order
    pub status: IndexMap<ProviderKind, ProviderResponse>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub http_status: u16,
    pub body: AggregateBody,
}
