//! The wire representation of an installed mail application.
//!
//! [`MailApp`] carries exactly one attribute, the user-visible label the
//! OS reports for the application. Instances are rebuilt on every query
//! and never persisted; identity is label identity.

use serde::{Deserialize, Serialize};

/// An installed mail-capable application, as reported by the OS.
///
/// The serialized field name `name` is part of the channel contract and
/// must not change: host-side callers decode `getMainApps` results into
/// records keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MailApp {
    /// User-visible display name (the OS label).
    pub name: String,
}

impl MailApp {
    /// Create a mail app record from a label.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
