//! Amazon CloudFront plugin for Darkstar
//!
//! Every flush is a single CloudFront invalidation created with the AWS
//! SDK: the whole distribution (`/*`), a set of paths, or directory
//! wildcards. CloudFront invalidates by path only, so the host part of the
//! submitted URLs is ignored.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use darkstar_plugin_api::PluginRegistry;
//!
//! let mut registry = PluginRegistry::new();
//! darkstar_plugin_cloudfront::register(&mut registry, Duration::from_secs(30), None);
//! ```

use std::time::Duration;

use darkstar_plugin_api::PluginRegistry;

mod client;
mod metadata;
mod paths;
mod plugin;

pub use plugin::CloudFrontPlugin;

/// Registers the plugin; `endpoint_url` replaces the AWS endpoint
pub fn register(registry: &mut PluginRegistry, timeout: Duration, endpoint_url: Option<&str>) {
    let plugin = CloudFrontPlugin::new(timeout);
    let plugin = match endpoint_url {
        Some(endpoint_url) => plugin.with_endpoint_url(endpoint_url),
        None => plugin,
    };
    registry.register(Box::new(plugin));
}
