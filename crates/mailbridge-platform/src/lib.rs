//! Platform layer for mailbridge.
//!
//! Everything OS-dependent lives here, behind the
//! [`MailAppRegistry`](registry::MailAppRegistry) trait: discovering which
//! installed applications handle mail, and starting one of them. The
//! dispatcher in `mailbridge-plugin` is written against the trait alone,
//! so porting to another desktop stack means implementing one trait.
//!
//! # Implementations
//!
//! * [`freedesktop::FreedesktopRegistry`]: the native backend. Scans XDG
//!   application directories for desktop entries associated with the
//!   `mailto` URI scheme, honors `mimeapps.list` preferences, and spawns
//!   handlers detached via [`tokio::process`].
//! * [`StaticRegistry`]: a fixed in-memory inventory for tests and
//!   embeddings that supply their own handler list.
//!
//! Environment access is routed through the [`env::Environment`] trait so
//! directory resolution and config discovery stay testable without
//! touching process-global state.

pub mod config_loader;
pub mod env;
pub mod freedesktop;
pub mod registry;
pub mod static_registry;

pub use env::{Environment, MapEnvironment, NativeEnvironment};
pub use freedesktop::{FreedesktopRegistry, XdgDirs};
pub use registry::{LaunchTarget, MailAppRegistry, MailHandler, RegistryError};
pub use static_registry::StaticRegistry;
