//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. `MAILBRIDGE_CONFIG` environment variable (explicit path, used as-is).
//! 2. `<config dir>/mailbridge/config.toml` (on Linux,
//!    `~/.config/mailbridge/config.toml`), if it exists.
//! 3. If neither is present, built-in defaults.
//!
//! An explicit `MAILBRIDGE_CONFIG` path that cannot be read is an error
//! rather than a silent fallback: the caller asked for that file.

use std::path::{Path, PathBuf};

use mailbridge_types::{BridgeConfig, BridgeError, Result};

use crate::env::Environment;

/// Discover the config file path using the fallback chain.
///
/// `config_dir` is the platform config root (injected so tests can point
/// it anywhere; native callers pass [`dirs::config_dir`]). Returns `None`
/// when no candidate exists.
pub fn discover_config_path(
    env: &dyn Environment,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(env_path) = env.get_var("MAILBRIDGE_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    if let Some(dir) = config_dir {
        let candidate = dir.join("mailbridge").join("config.toml");
        if candidate.exists() {
            return Some(candidate);
        }
    }

    None
}

/// Load the configuration using the discovery chain.
///
/// Returns defaults when no config file exists anywhere.
pub async fn load_config(env: &dyn Environment) -> Result<BridgeConfig> {
    match discover_config_path(env, dirs::config_dir()) {
        Some(path) => load_config_from(&path).await,
        None => {
            tracing::info!("no config file found, using defaults");
            Ok(BridgeConfig::default())
        }
    }
}

/// Load and parse the TOML config at `path`.
pub async fn load_config_from(path: &Path) -> Result<BridgeConfig> {
    tracing::debug!(path = %path.display(), "loading config file");
    let contents = tokio::fs::read_to_string(path).await?;
    toml::from_str(&contents).map_err(|e| BridgeError::Config(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::env::MapEnvironment;

    static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Create a unique scratch directory for one test.
    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mailbridge_config_test_{}_{}",
            std::process::id(),
            DIR_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
        dir
    }

    #[test]
    fn env_var_takes_precedence() {
        let env = MapEnvironment::new().with_var("MAILBRIDGE_CONFIG", "/custom/bridge.toml");
        let found = discover_config_path(&env, Some(PathBuf::from("/home/user/.config")));
        assert_eq!(found, Some(PathBuf::from("/custom/bridge.toml")));
    }

    #[test]
    fn no_env_no_config_dir_is_none() {
        let env = MapEnvironment::new();
        assert_eq!(discover_config_path(&env, None), None);
    }

    #[test]
    fn missing_default_file_is_none() {
        let env = MapEnvironment::new();
        let found = discover_config_path(&env, Some(scratch_dir()));
        assert_eq!(found, None);
    }

    #[test]
    fn existing_default_file_is_found() {
        let dir = scratch_dir();
        let bridge_dir = dir.join("mailbridge");
        std::fs::create_dir_all(&bridge_dir).unwrap();
        let path = bridge_dir.join("config.toml");
        std::fs::write(&path, "query_timeout_secs = 2\n").unwrap();

        let env = MapEnvironment::new();
        assert_eq!(discover_config_path(&env, Some(dir)), Some(path));
    }

    #[tokio::test]
    async fn loads_full_config() {
        let path = scratch_dir().join("config.toml");
        std::fs::write(
            &path,
            r#"
query_timeout_secs = 2

[registry]
include_no_display = true
terminal_command = "xterm -e"
extra_application_dirs = ["/opt/mail/applications"]
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).await.unwrap();
        assert_eq!(cfg.query_timeout_secs, 2);
        assert!(cfg.registry.include_no_display);
        assert_eq!(cfg.registry.terminal_command.as_deref(), Some("xterm -e"));
        assert_eq!(
            cfg.registry.extra_application_dirs,
            vec![PathBuf::from("/opt/mail/applications")]
        );
    }

    #[tokio::test]
    async fn invalid_toml_is_a_config_error() {
        let path = scratch_dir().join("config.toml");
        std::fs::write(&path, "query_timeout_secs = \"not a number\"\n").unwrap();

        let err = load_config_from(&path).await.unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
        assert!(err.to_string().contains("config.toml"));
    }

    #[tokio::test]
    async fn unreadable_explicit_path_is_an_io_error() {
        let path = scratch_dir().join("does_not_exist.toml");
        let err = load_config_from(&path).await.unwrap_err();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
