//! Fastly plugin for Darkstar
//!
//! Flushes a Fastly service with `purge_all`, or single URLs with the
//! `PURGE` HTTP method sent to the URL itself. Every request carries the
//! API token in the `Fastly-Key` header.
//!
//! # Architecture
//!
//! - `plugin` - Main plugin implementation
//! - `client` - HTTP client and API methods
//! - `metadata` - Credential schema and capabilities

mod client;
mod metadata;
mod plugin;

pub use plugin::FastlyPlugin;

darkstar_plugin_api::register_plugin!(FastlyPlugin);
