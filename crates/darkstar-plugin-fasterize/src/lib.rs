//! Fasterize plugin for Darkstar
//!
//! Flushes the whole cache of a Fasterize config, or single URLs of it
//! with one request per URL.

mod client;
mod metadata;
mod plugin;

pub use plugin::FasterizePlugin;

darkstar_plugin_api::register_plugin!(FasterizePlugin);
