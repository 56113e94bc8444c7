use darkstar_plugin_api::*;

pub(crate) const API_ID: &str = "incapsulaApiID";
pub(crate) const API_KEY: &str = "incapsulaApiKey";

pub fn create_metadata() -> PluginMetadata {
    PluginMetadata {
        name: "Incapsula".to_string(),
        provider_type: ProviderKind::Incapsula,
        version: "0.1.0".to_string(),
        description: "Purge the Incapsula cache of a site, by URL or by directory".to_string(),
        documentation_url: Some(
            "https://docs.imperva.com/bundle/cloud-application-security/page/settings/caching-settings.htm"
                .to_string(),
        ),
        zone_label: "Incapsula site to flush".to_string(),
        config_schema: create_config_schema(),
        capabilities: create_capabilities(),
    }
}

fn create_config_schema() -> ConfigSchema {
    ConfigSchema::new()
        .add_field(ConfigField {
            key: API_ID.to_string(),
            label: "API ID".to_string(),
            description: Some("Incapsula API ID".to_string()),
            field_type: ConfigFieldType::Text,
            required: true,
            example: Some("1234".to_string()),
        })
        .add_field(ConfigField {
            key: API_KEY.to_string(),
            label: "API Key".to_string(),
            description: Some("Incapsula API Key".to_string()),
            field_type: ConfigFieldType::Password,
            required: true,
            example: Some("4321".to_string()),
        })
}

fn create_capabilities() -> PluginCapabilities {
    PluginCapabilities {
        zone: true,
        urls: true,
        directories: true,
    }
}
