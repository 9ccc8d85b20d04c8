//! # Lead Relay Library
//!
//! Receives form submissions, obtains an OAuth2 password-grant token,
//! reshapes the submission into a CRM lead record and forwards it.
//!
//! Modules:
//! - `config`: relay configuration, YAML loader, CLI arguments
//! - `sources`: password-grant token acquisition
//! - `cache`: optional access-token cache
//! - `lead`: form submission and lead record mapping
//! - `relay`: the `/submit` handler and its error relay
//! - `server`: shared state, router, listener

pub mod config;
pub mod cache;
pub mod sources;
pub mod lead;
pub mod relay;
pub mod tests;
pub mod observability;
pub mod server;
pub mod helpers;
pub mod utils;


pub use crate::config::settings::RelayConfig;
pub use crate::relay::error::RelayError;
