//! # ChatKit Session Library
//!
//! Creates sessions for a hosted ChatKit workflow and relays the
//! session's client secret to the browser.
//!
//! Modules:
//! - `config` — service configuration, validation and the vendor credential
//! - `vendor` — the session issuer boundary and the ChatKit HTTP client
//! - `session` — the `POST /api/chatkit/session` handler
//! - `server` — router assembly and serving

pub mod config;
pub mod vendor;
pub mod session;
pub mod observability;
pub mod server;
pub mod utils;
#[cfg(test)]
mod tests;


pub use crate::config::service::ServiceConfig;
pub use crate::vendor::SessionIssuer;
