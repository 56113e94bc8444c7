//! Incapsula plugin for Darkstar
//!
//! Purges the Incapsula (Imperva Cloud WAF) cache of a site, either
//! entirely or one purge pattern at a time for URLs and directories.
//! Documentation: <https://docs.imperva.com/bundle/cloud-application-security/page/settings/caching-settings.htm#Purgethecache>

mod client;
mod metadata;
mod plugin;

pub use plugin::IncapsulaPlugin;

darkstar_plugin_api::register_plugin!(IncapsulaPlugin);
