//! The mail-handler registry seam.
//!
//! [`MailAppRegistry`] is the single trait the dispatcher talks to. The
//! native implementation ([`crate::freedesktop::FreedesktopRegistry`])
//! queries the freedesktop application database; [`crate::StaticRegistry`]
//! serves fixed fixtures for tests and headless setups. Ports to other
//! desktop stacks implement this trait and nothing else.

use async_trait::async_trait;
use mailbridge_types::ComposeRequest;
use thiserror::Error;

/// Errors from handler discovery and launching.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RegistryError {
    /// The registry could not enumerate handlers at all.
    #[error("handler query failed: {0}")]
    QueryFailed(String),

    /// The handler exists but carries no usable entry point.
    #[error("handler `{0}` has no launchable entry point")]
    NotLaunchable(String),

    /// Spawning the handler process failed.
    #[error("launching `{id}` failed: {reason}")]
    LaunchFailed {
        /// Registry identifier of the handler.
        id: String,
        /// What went wrong.
        reason: String,
    },

    /// A registry operation exceeded its deadline.
    #[error("{operation} timed out")]
    Timeout {
        /// The operation that was cut off.
        operation: &'static str,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A launchable entry point for a mail handler.
///
/// `exec` is the registry-native command template (for freedesktop, the
/// raw `Exec=` line with field codes still in place). It is `None` for
/// handlers that are registered but cannot be started directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    /// Stable registry identifier (e.g. `org.gnome.Evolution.desktop`).
    pub id: String,
    /// Command template used to start the handler.
    pub exec: Option<String>,
    /// Whether the handler must run inside a terminal emulator.
    pub needs_terminal: bool,
}

impl LaunchTarget {
    /// Build a target for a plainly launchable handler.
    pub fn new(id: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exec: Some(exec.into()),
            needs_terminal: false,
        }
    }
}

/// A mail-capable application as the registry sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailHandler {
    /// Human-readable application name, shown to users and matched by
    /// the open-by-name operation.
    pub label: String,
    /// How to start this handler.
    pub target: LaunchTarget,
}

impl MailHandler {
    /// Build a handler with a plainly launchable target.
    pub fn new(label: impl Into<String>, id: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: LaunchTarget::new(id, exec),
        }
    }
}

/// Platform-agnostic access to the OS set of mail-capable applications.
///
/// Discovery and launching are the only two capabilities the dispatcher
/// needs; everything else (ordering, localization, path lookup) is an
/// implementation concern behind this trait.
#[async_trait]
pub trait MailAppRegistry: Send + Sync {
    /// Enumerate the installed mail-capable handlers.
    ///
    /// The returned order is meaningful: the first handler is the one the
    /// platform considers the user's preferred mail application.
    async fn query_handlers(&self) -> Result<Vec<MailHandler>, RegistryError>;

    /// Start `target`, addressing it with `compose`.
    ///
    /// Returns once the handler process has been handed off to the OS;
    /// implementations do not wait for the application to exit.
    async fn launch(
        &self,
        target: &LaunchTarget,
        compose: &ComposeRequest,
    ) -> Result<(), RegistryError>;
}
