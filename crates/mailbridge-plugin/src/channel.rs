//! The method-channel surface.
//!
//! Binds the dispatcher to the host-facing wire contract: three named
//! operations, exact name matching, and the three-way response shape.
//! `getMainApps` answers with the app list serialized to a JSON string
//! (not an inline array); hosts deserialize that text themselves, and
//! existing callers depend on it staying that way.
//!
//! Argument rules:
//! * `to` is required for `openMailApp` but may be the empty string,
//!   which means "no recipient". For `openSpecificMailApp` it is
//!   optional.
//! * `name` is required and non-empty for `openSpecificMailApp`.
//! * `cc` and `bcc` are optional string arrays; `subject` and `body`
//!   optional strings.
//!
//! A malformed argument is the caller's bug and comes back as an
//! explicit `invalid_argument` error, never as a silent `false`.

use async_trait::async_trait;
use mailbridge_platform::MailAppRegistry;
use mailbridge_types::{BridgeError, ComposeRequest, MethodCall, MethodResponse};
use serde_json::Value;
use tracing::debug;

use crate::dispatcher::MailAppPlugin;

/// Wire name of the open-preferred-app operation.
pub const METHOD_OPEN_MAIL_APP: &str = "openMailApp";
/// Wire name of the open-by-name operation.
pub const METHOD_OPEN_SPECIFIC_MAIL_APP: &str = "openSpecificMailApp";
/// Wire name of the list operation.
pub const METHOD_GET_MAIN_APPS: &str = "getMainApps";

/// A handler for method calls arriving over a host channel.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Handle one call, always producing exactly one response.
    async fn invoke(&self, call: MethodCall) -> MethodResponse;
}

#[async_trait]
impl<R: MailAppRegistry> MethodHandler for MailAppPlugin<R> {
    async fn invoke(&self, call: MethodCall) -> MethodResponse {
        match call.method.as_str() {
            METHOD_OPEN_MAIL_APP => match compose_from_args(&call.args) {
                Ok(compose) => MethodResponse::ok(self.open_mail_app(&compose).await),
                Err(e) => MethodResponse::invalid_argument(e.to_string()),
            },
            METHOD_OPEN_SPECIFIC_MAIL_APP => match specific_args(&call.args) {
                Ok((name, compose)) => {
                    MethodResponse::ok(self.open_specific_mail_app(&name, &compose).await)
                }
                Err(e) => MethodResponse::invalid_argument(e.to_string()),
            },
            METHOD_GET_MAIN_APPS => {
                let apps = self.list_mail_apps().await;
                match serde_json::to_string(&apps) {
                    Ok(serialized) => MethodResponse::ok(serialized),
                    Err(e) => MethodResponse::Error {
                        code: "internal".into(),
                        message: BridgeError::from(e).to_string(),
                    },
                }
            }
            other => {
                debug!(method = other, "unknown method");
                MethodResponse::not_implemented(other)
            }
        }
    }
}

/// Extract `to`. The key must exist; an empty value means no recipient.
fn to_argument(args: &Value) -> Result<Option<String>, BridgeError> {
    let to = args
        .get("to")
        .ok_or_else(|| BridgeError::invalid_argument("to", "required (may be empty)"))?
        .as_str()
        .ok_or_else(|| BridgeError::invalid_argument("to", "expected a string"))?;
    Ok((!to.is_empty()).then(|| to.to_string()))
}

fn optional_string(args: &Value, name: &'static str) -> Result<Option<String>, BridgeError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let s = value
                .as_str()
                .ok_or_else(|| BridgeError::invalid_argument(name, "expected a string"))?;
            Ok(Some(s.to_string()))
        }
    }
}

fn string_list(args: &Value, name: &'static str) -> Result<Vec<String>, BridgeError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(String::from).ok_or_else(|| {
                    BridgeError::invalid_argument(name, "expected an array of strings")
                })
            })
            .collect(),
        Some(_) => Err(BridgeError::invalid_argument(
            name,
            "expected an array of strings",
        )),
    }
}

/// Compose request for `openMailApp`: the `to` key must be present.
fn compose_from_args(args: &Value) -> Result<ComposeRequest, BridgeError> {
    build_compose(to_argument(args)?, args)
}

/// Arguments for `openSpecificMailApp`: `name` required, `to` optional.
fn specific_args(args: &Value) -> Result<(String, ComposeRequest), BridgeError> {
    let name = args
        .get("name")
        .ok_or_else(|| BridgeError::invalid_argument("name", "required"))?
        .as_str()
        .ok_or_else(|| BridgeError::invalid_argument("name", "expected a string"))?;
    if name.is_empty() {
        return Err(BridgeError::invalid_argument("name", "must not be empty"));
    }
    let to = optional_string(args, "to")?.filter(|to| !to.is_empty());
    Ok((name.to_string(), build_compose(to, args)?))
}

fn build_compose(to: Option<String>, args: &Value) -> Result<ComposeRequest, BridgeError> {
    let mut compose = ComposeRequest::new();
    compose.to = to;
    compose.cc = string_list(args, "cc")?;
    compose.bcc = string_list(args, "bcc")?;
    compose.subject = optional_string(args, "subject")?;
    compose.body = optional_string(args, "body")?;
    Ok(compose)
}

#[cfg(test)]
mod tests {
    use mailbridge_platform::{MailHandler, StaticRegistry};
    use serde_json::json;

    use super::*;

    fn plugin() -> MailAppPlugin<StaticRegistry> {
        MailAppPlugin::new(StaticRegistry::new(vec![
            MailHandler::new("Acme Mail", "acme.desktop", "acme %u"),
            MailHandler::new("Thunderbird", "thunderbird.desktop", "thunderbird %u"),
        ]))
    }

    #[tokio::test]
    async fn unknown_method_is_not_implemented() {
        let resp = plugin()
            .invoke(MethodCall::bare("composeWithAttachment"))
            .await;
        assert_eq!(
            resp,
            MethodResponse::not_implemented("composeWithAttachment")
        );
    }

    #[tokio::test]
    async fn open_mail_app_launches_and_answers_true() {
        let plugin = plugin();
        let resp = plugin
            .invoke(MethodCall::new(
                "openMailApp",
                json!({"to": "x@y.com"}),
            ))
            .await;
        assert_eq!(resp, MethodResponse::ok(true));

        let launches = plugin.registry().launches();
        assert_eq!(launches[0].0, "acme.desktop");
        assert_eq!(launches[0].1.to.as_deref(), Some("x@y.com"));
    }

    #[tokio::test]
    async fn open_mail_app_requires_the_to_key() {
        let resp = plugin()
            .invoke(MethodCall::new("openMailApp", json!({})))
            .await;
        match resp {
            MethodResponse::Error { code, message } => {
                assert_eq!(code, "invalid_argument");
                assert!(message.contains("`to`"));
            }
            other => panic!("expected an error response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_to_means_no_recipient() {
        let plugin = plugin();
        let resp = plugin
            .invoke(MethodCall::new("openMailApp", json!({"to": ""})))
            .await;
        assert_eq!(resp, MethodResponse::ok(true));
        assert_eq!(plugin.registry().launches()[0].1.to, None);
    }

    #[tokio::test]
    async fn non_string_to_is_an_error() {
        let resp = plugin()
            .invoke(MethodCall::new("openMailApp", json!({"to": 7})))
            .await;
        assert!(matches!(resp, MethodResponse::Error { .. }));
    }

    #[tokio::test]
    async fn compose_fields_reach_the_handler() {
        let plugin = plugin();
        let resp = plugin
            .invoke(MethodCall::new(
                "openMailApp",
                json!({
                    "to": "x@y.com",
                    "cc": ["a@y.com", "b@y.com"],
                    "bcc": ["c@y.com"],
                    "subject": "Hello",
                    "body": "First line",
                }),
            ))
            .await;
        assert_eq!(resp, MethodResponse::ok(true));

        let compose = &plugin.registry().launches()[0].1;
        assert_eq!(compose.cc, vec!["a@y.com", "b@y.com"]);
        assert_eq!(compose.bcc, vec!["c@y.com"]);
        assert_eq!(compose.subject.as_deref(), Some("Hello"));
        assert_eq!(compose.body.as_deref(), Some("First line"));
    }

    #[tokio::test]
    async fn malformed_cc_is_an_error() {
        let resp = plugin()
            .invoke(MethodCall::new(
                "openMailApp",
                json!({"to": "x@y.com", "cc": "a@y.com"}),
            ))
            .await;
        match resp {
            MethodResponse::Error { code, message } => {
                assert_eq!(code, "invalid_argument");
                assert!(message.contains("`cc`"));
            }
            other => panic!("expected an error response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn open_specific_matches_and_launches() {
        let plugin = plugin();
        let resp = plugin
            .invoke(MethodCall::new(
                "openSpecificMailApp",
                json!({"name": "Thunderbird", "to": "x@y.com"}),
            ))
            .await;
        assert_eq!(resp, MethodResponse::ok(true));
        assert_eq!(plugin.registry().launches()[0].0, "thunderbird.desktop");
    }

    #[tokio::test]
    async fn open_specific_works_without_a_to_key() {
        let plugin = plugin();
        let resp = plugin
            .invoke(MethodCall::new(
                "openSpecificMailApp",
                json!({"name": "Acme Mail"}),
            ))
            .await;
        assert_eq!(resp, MethodResponse::ok(true));
        assert_eq!(plugin.registry().launches()[0].1.to, None);
    }

    #[tokio::test]
    async fn open_specific_unknown_name_is_false_not_an_error() {
        let resp = plugin()
            .invoke(MethodCall::new(
                "openSpecificMailApp",
                json!({"name": "Outlook", "to": ""}),
            ))
            .await;
        assert_eq!(resp, MethodResponse::ok(false));
    }

    #[tokio::test]
    async fn open_specific_requires_a_name() {
        let resp = plugin()
            .invoke(MethodCall::new(
                "openSpecificMailApp",
                json!({"to": "x@y.com"}),
            ))
            .await;
        match resp {
            MethodResponse::Error { code, message } => {
                assert_eq!(code, "invalid_argument");
                assert!(message.contains("`name`"));
            }
            other => panic!("expected an error response, got {other:?}"),
        }

        let resp = plugin()
            .invoke(MethodCall::new(
                "openSpecificMailApp",
                json!({"name": "", "to": ""}),
            ))
            .await;
        assert!(matches!(resp, MethodResponse::Error { .. }));
    }

    #[tokio::test]
    async fn get_main_apps_answers_with_serialized_text() {
        let resp = plugin().invoke(MethodCall::bare("getMainApps")).await;
        let MethodResponse::Success { value } = resp else {
            panic!("expected success");
        };
        // The payload is a JSON string, not an inline array.
        let text = value.as_str().expect("value should be a string");
        let apps: Vec<serde_json::Value> = serde_json::from_str(text).unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0]["name"], "Acme Mail");
        assert_eq!(apps[1]["name"], "Thunderbird");
    }

    #[tokio::test]
    async fn get_main_apps_on_a_failing_registry_is_an_empty_list() {
        let plugin = MailAppPlugin::new(StaticRegistry::failing());
        let resp = plugin.invoke(MethodCall::bare("getMainApps")).await;
        assert_eq!(resp, MethodResponse::ok("[]"));
    }

    #[tokio::test]
    async fn extra_args_are_ignored() {
        let resp = plugin()
            .invoke(MethodCall::new(
                "openMailApp",
                json!({"to": "x@y.com", "unexpected": {"nested": true}}),
            ))
            .await;
        assert_eq!(resp, MethodResponse::ok(true));
    }
}
