use darkstar_plugin_api::*;

pub(crate) const AUTHORIZATION_TOKEN: &str = "authorizationToken";

pub fn create_metadata() -> PluginMetadata {
    PluginMetadata {
        name: "Fasterize".to_string(),
        provider_type: ProviderKind::Fasterize,
        version: "0.1.0".to_string(),
        description: "Flush Fasterize configs".to_string(),
        documentation_url: Some("https://api.fasterize.com".to_string()),
        zone_label: "Fasterize config ID to flush".to_string(),
        config_schema: create_config_schema(),
        capabilities: create_capabilities(),
    }
}

fn create_config_schema() -> ConfigSchema {
    ConfigSchema::new().add_field(ConfigField {
        key: AUTHORIZATION_TOKEN.to_string(),
        label: "API Token".to_string(),
        description: Some("Fasterize API Key".to_string()),
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
