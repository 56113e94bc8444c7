use darkstar_plugin_api::*;

pub(crate) const AUTHORIZATION_TOKEN: &str = "authorizationToken";

pub fn create_metadata() -> PluginMetadata {
    PluginMetadata {
        name: "Fastly".to_string(),
        provider_type: ProviderKind::Fastly,
        version: "0.1.0".to_string(),
        description: "Purge Fastly services and URLs".to_string(),
        documentation_url: Some("https://developer.fastly.com/reference/api/purging/".to_string()),
        zone_label: "Fastly Service to flush".to_string(),
        config_schema: create_config_schema(),
        capabilities: create_capabilities(),
    }
}

fn create_config_schema() -> ConfigSchema {
    ConfigSchema::new().add_field(ConfigField {
        key: AUTHORIZATION_TOKEN.to_string(),
        label: "API Token".to_string(),
        description: Some("Fastly API Key".to_string()),
        field_type: ConfigFieldType::Password,
        required: true,
        example: Some("U2FsdGVkX18D8TD+GD3REqc8cdjRikR6socyNOVSrN0=".to_string()),
    })
}

fn create_capabilities() -> PluginCapabilities {
    PluginCapabilities {
        zone: true,
        urls: true,
        directories: false,
    }
}
