//! The mail-intent dispatcher.
//!
//! [`MailAppPlugin`] turns the three mail intents (list, open preferred,
//! open by name) into registry calls. Registry failures never escape as
//! errors: the channel contract is boolean success or an empty list, so
//! every failure path logs and normalizes. Each registry call runs under
//! a deadline; a stalled OS query degrades to "nothing installed" rather
//! than hanging the host.

use std::time::Duration;

use mailbridge_platform::{MailAppRegistry, MailHandler, RegistryError};
use mailbridge_types::{BridgeConfig, ComposeRequest, MailApp};
use tracing::{debug, warn};

/// Default deadline for a single registry operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Mail-intent dispatcher over a handler registry.
pub struct MailAppPlugin<R> {
    registry: R,
    timeout: Duration,
}

impl<R: MailAppRegistry> MailAppPlugin<R> {
    /// Dispatcher with the default operation deadline.
    pub fn new(registry: R) -> Self {
        Self::with_timeout(registry, DEFAULT_TIMEOUT)
    }

    /// Dispatcher with an explicit operation deadline.
    pub fn with_timeout(registry: R, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Dispatcher configured from a [`BridgeConfig`].
    pub fn with_config(registry: R, config: &BridgeConfig) -> Self {
        Self::with_timeout(registry, config.query_timeout())
    }

    /// The registry this dispatcher drives.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// The installed mail applications, preferred handler first.
    ///
    /// A failed or timed-out query yields an empty list.
    pub async fn list_mail_apps(&self) -> Vec<MailApp> {
        match self.handlers().await {
            Ok(handlers) => handlers
                .into_iter()
                .map(|h| MailApp::new(h.label))
                .collect(),
            Err(e) => {
                warn!(error = %e, "listing mail apps failed");
                Vec::new()
            }
        }
    }

    /// Open the preferred mail application with `compose`.
    ///
    /// Returns `true` only when a handler was actually started.
    pub async fn open_mail_app(&self, compose: &ComposeRequest) -> bool {
        let handlers = match self.handlers().await {
            Ok(handlers) => handlers,
            Err(e) => {
                warn!(error = %e, "opening mail app failed");
                return false;
            }
        };
        let Some(preferred) = handlers.first() else {
            debug!("no mail apps installed");
            return false;
        };
        self.launch(preferred, compose).await
    }

    /// Open the mail application whose name equals `name`.
    ///
    /// Matching is exact: no case folding, no substrings. With duplicate
    /// names the first (most preferred) match launches.
    pub async fn open_specific_mail_app(&self, name: &str, compose: &ComposeRequest) -> bool {
        let handlers = match self.handlers().await {
            Ok(handlers) => handlers,
            Err(e) => {
                warn!(error = %e, "opening mail app failed");
                return false;
            }
        };
        let Some(matched) = handlers.iter().find(|h| h.label == name) else {
            debug!(name, "no mail app with that name");
            return false;
        };
        self.launch(matched, compose).await
    }

    async fn handlers(&self) -> Result<Vec<MailHandler>, RegistryError> {
        match tokio::time::timeout(self.timeout, self.registry.query_handlers()).await {
            Ok(result) => result,
            Err(_) => Err(RegistryError::Timeout {
                operation: "handler query",
            }),
        }
    }

    async fn launch(&self, handler: &MailHandler, compose: &ComposeRequest) -> bool {
        let result = match tokio::time::timeout(
            self.timeout,
            self.registry.launch(&handler.target, compose),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RegistryError::Timeout {
                operation: "launch",
            }),
        };

        match result {
            Ok(()) => {
                debug!(id = %handler.target.id, "mail app launched");
                true
            }
            Err(e) => {
                warn!(id = %handler.target.id, error = %e, "launching mail app failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mailbridge_platform::{LaunchTarget, StaticRegistry};

    use super::*;

    fn fixture() -> StaticRegistry {
        StaticRegistry::new(vec![
            MailHandler::new("Acme Mail", "acme.desktop", "acme %u"),
            MailHandler::new("Thunderbird", "thunderbird.desktop", "thunderbird %u"),
        ])
    }

    #[tokio::test]
    async fn lists_apps_in_registry_order() {
        let plugin = MailAppPlugin::new(fixture());
        let apps = plugin.list_mail_apps().await;
        assert_eq!(
            apps,
            vec![MailApp::new("Acme Mail"), MailApp::new("Thunderbird")]
        );
    }

    #[tokio::test]
    async fn failed_query_lists_nothing() {
        let plugin = MailAppPlugin::new(StaticRegistry::failing());
        assert!(plugin.list_mail_apps().await.is_empty());
    }

    #[tokio::test]
    async fn open_launches_the_preferred_handler() {
        let plugin = MailAppPlugin::new(fixture());
        let compose = ComposeRequest::to("x@y.com");

        assert!(plugin.open_mail_app(&compose).await);

        let launches = plugin.registry().launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].0, "acme.desktop");
        assert_eq!(launches[0].1.to.as_deref(), Some("x@y.com"));
    }

    #[tokio::test]
    async fn open_with_no_handlers_is_false() {
        let plugin = MailAppPlugin::new(StaticRegistry::empty());
        assert!(!plugin.open_mail_app(&ComposeRequest::new()).await);
    }

    #[tokio::test]
    async fn open_with_failing_query_is_false() {
        let plugin = MailAppPlugin::new(StaticRegistry::failing());
        assert!(!plugin.open_mail_app(&ComposeRequest::new()).await);
    }

    #[tokio::test]
    async fn open_specific_matches_exactly() {
        let plugin = MailAppPlugin::new(fixture());
        let compose = ComposeRequest::new();

        assert!(plugin.open_specific_mail_app("Thunderbird", &compose).await);
        // No case folding, no substring matching.
        assert!(!plugin.open_specific_mail_app("thunderbird", &compose).await);
        assert!(!plugin.open_specific_mail_app("Thunder", &compose).await);
        assert!(!plugin.open_specific_mail_app("", &compose).await);

        let launches = plugin.registry().launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].0, "thunderbird.desktop");
    }

    #[tokio::test]
    async fn duplicate_names_launch_the_most_preferred() {
        let plugin = MailAppPlugin::new(StaticRegistry::new(vec![
            MailHandler::new("Mail", "first.desktop", "first %u"),
            MailHandler::new("Mail", "second.desktop", "second %u"),
        ]));

        assert!(
            plugin
                .open_specific_mail_app("Mail", &ComposeRequest::new())
                .await
        );
        assert_eq!(plugin.registry().launches()[0].0, "first.desktop");
    }

    #[tokio::test]
    async fn failed_launch_is_false() {
        let plugin = MailAppPlugin::new(StaticRegistry::new(vec![MailHandler {
            label: "Ghost".into(),
            target: LaunchTarget {
                id: "ghost.desktop".into(),
                exec: None,
                needs_terminal: false,
            },
        }]));
        assert!(!plugin.open_mail_app(&ComposeRequest::new()).await);
    }

    /// Registry that never answers, for deadline tests.
    struct StalledRegistry;

    #[async_trait]
    impl MailAppRegistry for StalledRegistry {
        async fn query_handlers(&self) -> Result<Vec<MailHandler>, RegistryError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        async fn launch(
            &self,
            _target: &LaunchTarget,
            _compose: &ComposeRequest,
        ) -> Result<(), RegistryError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_query_times_out_to_empty_and_false() {
        let plugin = MailAppPlugin::new(StalledRegistry);
        assert!(plugin.list_mail_apps().await.is_empty());
        assert!(!plugin.open_mail_app(&ComposeRequest::new()).await);
        assert!(
            !plugin
                .open_specific_mail_app("Acme Mail", &ComposeRequest::new())
                .await
        );
    }
}
