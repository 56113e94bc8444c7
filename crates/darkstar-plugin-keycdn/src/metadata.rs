use darkstar_plugin_api::*;

pub(crate) const AUTHORIZATION_TOKEN: &str = "authorizationToken";

pub fn create_metadata() -> PluginMetadata {
    PluginMetadata {
        name: "KeyCDN".to_string(),
        provider_type: ProviderKind::KeyCdn,
        version: "0.1.0".to_string(),
        description: "Flush KeyCDN pull zones".to_string(),
        documentation_url: Some("https://www.keycdn.com/api".to_string()),
        zone_label: "KeyCDN zone ID to flush".to_string(),
        config_schema: create_config_schema(),
        capabilities: create_capabilities(),
    }
}

fn create_config_schema() -> ConfigSchema {
    ConfigSchema::new().add_field(ConfigField {
        key: AUTHORIZATION_TOKEN.to_string(),
        label: "API Key".to_string(),
        description: Some("KeyCDN API Key".to_string()),
        field_type: ConfigFieldType::Password,
        required: true,
        example: Some("sk_prod_XXX".to_string()),
    })
}

fn create_capabilities() -> PluginCapabilities {
    PluginCapabilities {
        zone: true,
        urls: true,
        directories: false,
    }
}
