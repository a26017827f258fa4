//! The method-channel envelope exchanged with the host runtime.
//!
//! A host invokes the plugin with a [`MethodCall`] (operation name plus a
//! JSON argument object) and receives exactly one [`MethodResponse`]. The
//! response contract is three-way, mirroring the host channels this plugin
//! binds to: a success value, an explicit error, or the distinguishable
//! "not implemented" reply for unrecognized operations.

use serde::{Deserialize, Serialize};

/// A single method invocation arriving from the host runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// Operation name (e.g. `"openMailApp"`). Names are part of the wire
    /// contract and are matched exactly.
    pub method: String,

    /// JSON object of arguments. Defaults to an empty object when absent.
    #[serde(default = "empty_args")]
    pub args: serde_json::Value,
}

fn empty_args() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl MethodCall {
    /// Build a call with arguments.
    pub fn new(method: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// Build an argument-less call.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, serde_json::Value::Object(serde_json::Map::new()))
    }
}

/// The reply to a [`MethodCall`].
///
/// `NotImplemented` is deliberately distinct from both `Success` and
/// `Error`: callers probing for optional operations rely on being able to
/// tell "the plugin does not know this method" apart from "the method ran
/// and failed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    /// The operation ran; `value` is its result.
    Success {
        /// Operation result (boolean for the open operations, serialized
        /// app-list text for `getMainApps`).
        value: serde_json::Value,
    },
    /// The operation was recognized but the invocation was invalid.
    Error {
        /// Stable machine-readable code (e.g. `"invalid_argument"`).
        code: String,
        /// Human-readable description.
        message: String,
    },
    /// The operation name is not part of this plugin's surface.
    NotImplemented {
        /// The unrecognized method name, echoed back.
        method: String,
    },
}

impl MethodResponse {
    /// A success reply carrying `value`.
    pub fn ok(value: impl Into<serde_json::Value>) -> Self {
        Self::Success {
            value: value.into(),
        }
    }

    /// An `invalid_argument` error reply.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::Error {
            code: "invalid_argument".into(),
            message: message.into(),
        }
    }

    /// The not-implemented reply for `method`.
    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }

    /// Returns `true` for a success reply.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The success value, if this is a success reply.
    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success { value } => Some(value),
            _ => None,
        }
    }
}
