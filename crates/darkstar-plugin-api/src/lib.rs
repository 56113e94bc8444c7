pub mod error;
pub mod outcome;
pub mod plugin;
pub mod registry;
pub mod schema;
pub mod types;
pub mod utils;

pub use error::{
    PluginError,
    PluginResult,
};
pub use outcome::{
    classify,
    reduce_outcomes,
    ProviderOutcome,
    ProviderResponse,
    RawOutcome,
    REMOTE_ERROR_MESSAGE,
};
pub use plugin::{
    Plugin,
    PluginCapabilities,
    PluginMetadata,
};
pub use registry::PluginRegistry;
pub use schema::{
    ConfigField,
    ConfigFieldType,
    ConfigSchema,
};
pub use types::{
    FlushParams,
    FlushScope,
    ProviderKind,
};

/// Generates `register(registry, client, base_url)` for a plugin exposing
/// `new(client: reqwest::Client)` and `with_base_url(self, &str)`.
#[macro_export]
macro_rules! register_plugin {
    ($plugin_type:ty) => {
        pub fn register(
            registry: &mut $crate::PluginRegistry, client: ::reqwest::Client,
            base_url: Option<&str>,
        ) {
            let plugin = <$plugin_type>::new(client);
            let plugin = match base_url {
                Some(base_url) => plugin.with_base_url(base_url),
                None => plugin,
            };
            registry.register(Box::new(plugin));
        }
    };
}
