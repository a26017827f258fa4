//! Mail-intent dispatcher and method-channel surface.
//!
//! The crate has two layers:
//!
//! * [`dispatcher::MailAppPlugin`]: the typed operations (list installed
//!   mail apps, open the preferred one, open one by name) over any
//!   [`MailAppRegistry`](mailbridge_platform::MailAppRegistry), with
//!   failure normalization and per-operation deadlines.
//! * [`channel::MethodHandler`]: the wire contract. Named methods map to
//!   the typed operations; unknown names produce the distinguishable
//!   not-implemented response so hosts can probe for capabilities.
//!
//! ```rust
//! use mailbridge_platform::{MailHandler, StaticRegistry};
//! use mailbridge_plugin::MailAppPlugin;
//! use mailbridge_types::ComposeRequest;
//!
//! # async fn example() {
//! let registry = StaticRegistry::new(vec![MailHandler::new(
//!     "Acme Mail",
//!     "acme.desktop",
//!     "acme %u",
//! )]);
//! let plugin = MailAppPlugin::new(registry);
//!
//! let apps = plugin.list_mail_apps().await;
//! assert_eq!(apps[0].name, "Acme Mail");
//! assert!(plugin.open_mail_app(&ComposeRequest::to("x@y.com")).await);
//! # }
//! ```

pub mod channel;
pub mod dispatcher;

pub use channel::{
    METHOD_GET_MAIN_APPS, METHOD_OPEN_MAIL_APP, METHOD_OPEN_SPECIFIC_MAIL_APP, MethodHandler,
};
pub use dispatcher::{DEFAULT_TIMEOUT, MailAppPlugin};
