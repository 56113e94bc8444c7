//! KeyCDN plugin for Darkstar
//!
//! Flushes a whole KeyCDN zone or a list of URLs through the KeyCDN API
//! (<https://www.keycdn.com/api>). Requests authenticate with the account
//! API key sent as the basic-auth user name.
//!
//! # Example Usage
//!
//! ```no_run
//! use darkstar_plugin_api::PluginRegistry;
//!
//! let mut registry = PluginRegistry::new();
//! darkstar_plugin_keycdn::register(&mut registry, reqwest::Client::new(), None);
//! ```

mod client;
mod metadata;
mod plugin;

pub use plugin::KeyCdnPlugin;

darkstar_plugin_api::register_plugin!(KeyCdnPlugin);
