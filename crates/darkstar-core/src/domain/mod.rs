pub mod flush;
pub mod validation;

pub use flush::{
    AggregateBody,
    AggregateResult,
    FlushRequest,
    AGGREGATE_ERROR_MESSAGE,
};
pub use validation::{
    validate_aggregate,
    validate_flush,
    ScopeKind,
    ValidationError,
    ValidationResult,
};
