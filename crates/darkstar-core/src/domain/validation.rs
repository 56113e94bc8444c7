//! Request payload validation
//!
//! Payloads are checked against each plugin's credential schema and
//! capabilities before anything reaches the aggregator. Error messages
//! follow one format: `"<key>" <problem>`, wrapped in
//! `child "<key>" fails because [...]` for every enclosing object, and
//! `keys` holds the dotted path of the offending value.

use darkstar_plugin_api::utils::parse_http_url;
use darkstar_plugin_api::{
    FlushParams,
    FlushScope,
    Plugin,
    PluginMetadata,
    PluginRegistry,
    ProviderKind,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use super::flush::FlushRequest;

/// Key holding the zone id in aggregate payload entries
pub const ZONE_ID_KEY: &str = "zoneID";

const ROOT: &str = "value";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub keys: Vec<String>,
}

impl ValidationError {
    /// Problem with the payload as a whole
    fn root(problem: &str) -> Self {
        Self {
            message: format!("\"{ROOT}\" {problem}"),
            keys: vec![ROOT.to_string()],
        }
    }

    fn not_allowed(key: &str) -> Self {
        Self {
            message: format!("\"{key}\" is not allowed"),
            keys: vec![key.to_string()],
        }
    }

    /// Problem with a member of an object
    fn field(key: &str, problem: &str) -> Self {
        Self {
            message: format!("child \"{key}\" fails because [\"{key}\" {problem}]"),
            keys: vec![key.to_string()],
        }
    }

    /// Problem with the item at `index` of an array member
    fn item(key: &str, index: usize, problem: &str) -> Self {
        Self {
            message: format!(
                "child \"{key}\" fails because [\"{key}\" at position {index} fails because [\"{index}\" {problem}]]"
            ),
            keys: vec![format!("{key}.{index}")],
        }
    }

    /// Wraps the error of an object nested under `key`
    fn nested(key: &str, inner: Self) -> Self {
        Self {
            message: format!("child \"{key}\" fails because [{}]", inner.message),
            keys: inner
                .keys
                .into_iter()
                .map(|k| format!("{key}.{k}"))
                .collect(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shape of the flush a route asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Zone,
    Urls,
    Directories,
}

impl ScopeKind {
    /// Payload key holding the targets
    pub fn targets_key(&self) -> Option<&'static str> {
        match self {
            Self::Zone => None,
            Self::Urls => Some("urls"),
            Self::Directories => Some("directories"),
        }
    }

    fn scope(&self, targets: Vec<String>) -> FlushScope {
        match self {
            Self::Zone => FlushScope::Zone,
            Self::Urls => FlushScope::Urls(targets),
            Self::Directories => FlushScope::Directories(targets),
        }
    }

    pub fn supported_by(&self, metadata: &PluginMetadata) -> bool {
        let capabilities = metadata.capabilities;
        match self {
            Self::Zone => capabilities.zone,
            Self::Urls => capabilities.urls,
            Self::Directories => capabilities.directories,
        }
    }
}

/// Validates the body of a single-provider route; the zone id comes from
/// the path.
pub fn validate_flush(
    metadata: &PluginMetadata, zone_id: &str, kind: ScopeKind, payload: &Value,
) -> ValidationResult<FlushParams> {
    let object = as_object(payload)?;
    validate_entry(metadata, Some(zone_id), kind, object)
}

/// Validates the body of an aggregate route: provider id to credentials
/// plus `zoneID`, at least one provider, each able to flush `kind`.
pub fn validate_aggregate(
    registry: &PluginRegistry, kind: ScopeKind, payload: &Value,
) -> ValidationResult<FlushRequest> {
    let object = as_object(payload)?;
    if object.is_empty() {
        return Err(ValidationError::root("must have at least 1 children"));
    }

    let mut request = FlushRequest::new();

    for (key, entry) in object {
        let metadata = key
            .parse::<ProviderKind>()
            .ok()
            .and_then(|provider| registry.get(provider))
            .map(|plugin| plugin.metadata())
            .filter(|metadata| kind.supported_by(metadata))
            .ok_or_else(|| ValidationError::not_allowed(key))?;

        let params = match entry {
            Value::Object(fields) => validate_entry(metadata, None, kind, fields)
                .map_err(|e| ValidationError::nested(key, e))?,
            _ => return Err(ValidationError::field(key, "must be an object")),
        };

        request.insert(metadata.provider_type, params);
    }

    Ok(request)
}

fn as_object(payload: &Value) -> ValidationResult<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::root("must be an object"))
}

fn validate_entry(
    metadata: &PluginMetadata, zone_id: Option<&str>, kind: ScopeKind, object: &Map<String, Value>,
) -> ValidationResult<FlushParams> {
    let mut allowed: Vec<&str> = Vec::new();
    let mut credentials = Vec::new();

    for field in &metadata.config_schema.fields {
        allowed.push(&field.key);
        match (object.get(&field.key), field.required) {
            (None | Some(Value::Null), false) => {}
            _ => credentials.push((field.key.clone(), string_field(object, &field.key)?)),
        }
    }

    let zone_id = match zone_id {
        Some(zone_id) => zone_id.to_string(),
        None => {
            allowed.push(ZONE_ID_KEY);
            string_field(object, ZONE_ID_KEY)?
        }
    };

    let targets = match kind.targets_key() {
        Some(key) => {
            allowed.push(key);
            url_list(object, key)?
        }
        None => Vec::new(),
    };

    if let Some(unknown) = object.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(ValidationError::not_allowed(unknown));
    }

    let params = credentials
        .into_iter()
        .fold(FlushParams::new(zone_id, kind.scope(targets)), |params, (key, value)| {
            params.with_credential(key, value)
        });

    Ok(params)
}

fn string_field(object: &Map<String, Value>, key: &str) -> ValidationResult<String> {
    match object.get(key) {
        None | Some(Value::Null) => Err(ValidationError::field(key, "is required")),
        Some(Value::String(value)) if value.is_empty() => {
            Err(ValidationError::field(key, "is not allowed to be empty"))
        }
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ValidationError::field(key, "must be a string")),
    }
}

fn url_list(object: &Map<String, Value>, key: &str) -> ValidationResult<Vec<String>> {
    let items = match object.get(key) {
        None | Some(Value::Null) => return Err(ValidationError::field(key, "is required")),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::field(key, "must be an array")),
    };

    if items.is_empty() {
        return Err(ValidationError::field(key, "must contain at least 1 items"));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(url) if parse_http_url(url).is_ok() => Ok(url.clone()),
            Value::String(_) => Err(ValidationError::item(
                key,
                index,
                "must be a valid uri with a scheme matching the http|https pattern",
            )),
            _ => Err(ValidationError::item(key, index, "must be a string")),
        })
        .collect()
}
