//! A fixed-fixture registry implementation.
//!
//! Serves a caller-supplied handler list and records launches instead of
//! spawning anything. Used by dispatcher tests and by embeddings that
//! bring their own handler inventory.

use std::sync::Mutex;

use async_trait::async_trait;
use mailbridge_types::ComposeRequest;

use crate::registry::{LaunchTarget, MailAppRegistry, MailHandler, RegistryError};

/// In-memory [`MailAppRegistry`] with deterministic behavior.
pub struct StaticRegistry {
    handlers: Vec<MailHandler>,
    fail_queries: bool,
    launches: Mutex<Vec<(String, ComposeRequest)>>,
}

impl StaticRegistry {
    /// A registry serving exactly `handlers`, in the given order.
    pub fn new(handlers: Vec<MailHandler>) -> Self {
        Self {
            handlers,
            fail_queries: false,
            launches: Mutex::new(Vec::new()),
        }
    }

    /// A registry with no handlers installed.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A registry whose queries always fail.
    pub fn failing() -> Self {
        Self {
            handlers: Vec::new(),
            fail_queries: true,
            launches: Mutex::new(Vec::new()),
        }
    }

    /// The launches recorded so far, as `(target id, compose)` pairs.
    pub fn launches(&self) -> Vec<(String, ComposeRequest)> {
        self.launches
            .lock()
            .map(|l| l.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MailAppRegistry for StaticRegistry {
    async fn query_handlers(&self) -> Result<Vec<MailHandler>, RegistryError> {
        if self.fail_queries {
            return Err(RegistryError::QueryFailed(
                "static registry configured to fail".into(),
            ));
        }
        Ok(self.handlers.clone())
    }

    async fn launch(
        &self,
        target: &LaunchTarget,
        compose: &ComposeRequest,
    ) -> Result<(), RegistryError> {
        if target.exec.is_none() {
            return Err(RegistryError::NotLaunchable(target.id.clone()));
        }
        if let Ok(mut launches) = self.launches.lock() {
            launches.push((target.id.clone(), compose.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<MailHandler> {
        vec![
            MailHandler::new("Evolution", "org.gnome.Evolution.desktop", "evolution %u"),
            MailHandler::new("Thunderbird", "thunderbird.desktop", "thunderbird %u"),
        ]
    }

    #[tokio::test]
    async fn serves_fixture_in_order() {
        let registry = StaticRegistry::new(fixture());
        let handlers = registry.query_handlers().await.unwrap();
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].label, "Evolution");
        assert_eq!(handlers[1].label, "Thunderbird");
    }

    #[tokio::test]
    async fn failing_registry_errors_on_query() {
        let registry = StaticRegistry::failing();
        let err = registry.query_handlers().await.unwrap_err();
        assert!(matches!(err, RegistryError::QueryFailed(_)));
    }

    #[tokio::test]
    async fn records_launches() {
        let registry = StaticRegistry::new(fixture());
        let handlers = registry.query_handlers().await.unwrap();
        let compose = ComposeRequest::to("x@y.com");

        registry.launch(&handlers[1].target, &compose).await.unwrap();

        let launches = registry.launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].0, "thunderbird.desktop");
        assert_eq!(launches[0].1.to.as_deref(), Some("x@y.com"));
    }

    #[tokio::test]
    async fn execless_target_is_not_launchable() {
        let registry = StaticRegistry::empty();
        let target = LaunchTarget {
            id: "ghost.desktop".into(),
            exec: None,
            needs_terminal: false,
        };
        let err = registry
            .launch(&target, &ComposeRequest::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotLaunchable(_)));
        assert!(registry.launches().is_empty());
    }
}
