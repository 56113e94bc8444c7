use darkstar_plugin_api::*;

pub(crate) const ACCESS_KEY_ID: &str = "awsAccessKeyID";
pub(crate) const SECRET_ACCESS_KEY: &str = "awsSecretAccessKey";

pub fn create_metadata() -> PluginMetadata {
    PluginMetadata {
        name: "CloudFront".to_string(),
        provider_type: ProviderKind::CloudFront,
        version: "0.1.0".to_string(),
        description: "Create invalidations on Amazon CloudFront distributions".to_string(),
        documentation_url: Some(
            "https://docs.aws.amazon.com/cloudfront/latest/APIReference/API_CreateInvalidation.html"
                .to_string(),
        ),
        zone_label: "CloudFront distribution ID to flush".to_string(),
        config_schema: create_config_schema(),
        capabilities: create_capabilities(),
    }
}

fn create_config_schema() -> ConfigSchema {
    ConfigSchema::new()
        .add_field(ConfigField {
            key: ACCESS_KEY_ID.to_string(),
            label: "Access Key ID".to_string(),
            description: Some("AWS access key ID".to_string()),
            field_type: ConfigFieldType::Text,
            required: true,
            example: Some("xxx".to_string()),
        })
        .add_field(ConfigField {
            key: SECRET_ACCESS_KEY.to_string(),
            label: "Secret Access Key".to_string(),
            description: Some("AWS secret access key".to_string()),
            field_type: ConfigFieldType::Password,
            required: true,
            example: Some("xxx".to_string()),
        })
}

fn create_capabilities() -> PluginCapabilities {
    PluginCapabilities {
        zone: true,
        urls: true,
        directories: true,
    }
}
