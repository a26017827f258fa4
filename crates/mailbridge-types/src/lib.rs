//! # mailbridge-types
//!
//! Core type definitions for the mailbridge mail-intent plugin.
//!
//! This crate is the foundation of the dependency graph -- the platform,
//! plugin, and CLI crates all depend on it. It contains:
//!
//! - **[`error`]** -- [`BridgeError`] and the crate-wide [`Result`] alias
//! - **[`app`]** -- [`MailApp`], the wire representation of an installed
//!   mail application
//! - **[`compose`]** -- [`ComposeRequest`] and `mailto:` URI construction
//! - **[`method`]** -- [`MethodCall`] / [`MethodResponse`], the channel
//!   envelope exchanged with the host runtime
//! - **[`config`]** -- Configuration schema for the dispatcher and the
//!   handler registry

pub mod app;
pub mod compose;
pub mod config;
pub mod error;
pub mod method;

pub use app::MailApp;
pub use compose::ComposeRequest;
pub use config::{BridgeConfig, RegistryConfig};
pub use error::{BridgeError, Result};
pub use method::{MethodCall, MethodResponse};
