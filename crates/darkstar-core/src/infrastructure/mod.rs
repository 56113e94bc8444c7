pub mod config;
pub mod http_client;

pub use config::{
    ConfigLoadError,
    ConfigLoader,
    GatewayConfig,
    HttpSettings,
};
pub use http_client::build_client;
