use serde::{
    Deserialize,
    Serialize,
};

/// Kind of a credential field, mostly for documentation consumers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigFieldType {
    /// Plain identifier
    Text,
    /// Secret value
    Password,
}

/// A single credential field expected in a flush payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    /// Payload key (e.g. "authorizationToken")
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Field description/help text
    pub description: Option<String>,
    /// Field type
    pub field_type: ConfigFieldType,
    /// Whether the field is required
    pub required: bool,
    /// Example value shown in the API listing
    pub example: Option<String>,
}

/// Credential schema for a plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    /// Schema fields
    pub fields: Vec<ConfigField>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn add_field(mut self, field: ConfigField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, key: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
    }
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::new()
    }
}
