//! Freedesktop implementation of the mail-handler registry.
//!
//! Mail-capable applications are the desktop entries associated with the
//! `x-scheme-handler/mailto` MIME type, either by declaring it in their
//! `MimeType` list or through a `mimeapps.list` association. User-level
//! directories shadow system ones per desktop-file ID, and the merged
//! `mimeapps.list` defaults decide which handler counts as preferred.

pub mod desktop_entry;
pub mod exec;
pub mod mimeapps;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use mailbridge_types::{ComposeRequest, RegistryConfig};
use tracing::{debug, warn};

use crate::env::Environment;
use crate::registry::{LaunchTarget, MailAppRegistry, MailHandler, RegistryError};
use desktop_entry::{DesktopEntry, locale_candidates};
use mimeapps::{Associations, MimeAppsList};

/// MIME type registered by applications that can compose mail.
pub const MAILTO_MIME: &str = "x-scheme-handler/mailto";

// ── XDG base directories ─────────────────────────────────────────────────

/// Resolved XDG search paths and locale preference chain.
///
/// Directories are ordered most preferred first, matching the XDG base
/// directory specification. Built from the process environment in
/// production; tests inject fixture paths directly.
#[derive(Debug, Clone, Default)]
pub struct XdgDirs {
    /// `XDG_CONFIG_HOME` followed by `XDG_CONFIG_DIRS`.
    pub config_dirs: Vec<PathBuf>,
    /// `XDG_DATA_HOME` followed by `XDG_DATA_DIRS`.
    pub data_dirs: Vec<PathBuf>,
    /// `Name` lookup candidates derived from the message locale.
    pub locales: Vec<String>,
}

impl XdgDirs {
    /// Resolve the search paths from `env`, falling back to the XDG
    /// base directory defaults. `home` anchors the user-level fallbacks;
    /// when it is `None` only the explicit variables and system defaults
    /// apply.
    pub fn from_env(env: &dyn Environment, home: Option<PathBuf>) -> Self {
        let mut config_dirs = Vec::new();
        match non_empty_var(env, "XDG_CONFIG_HOME") {
            Some(dir) => config_dirs.push(PathBuf::from(dir)),
            None => {
                if let Some(home) = &home {
                    config_dirs.push(home.join(".config"));
                }
            }
        }
        extend_search_path(
            &mut config_dirs,
            non_empty_var(env, "XDG_CONFIG_DIRS"),
            &["/etc/xdg"],
        );

        let mut data_dirs = Vec::new();
        match non_empty_var(env, "XDG_DATA_HOME") {
            Some(dir) => data_dirs.push(PathBuf::from(dir)),
            None => {
                if let Some(home) = &home {
                    data_dirs.push(home.join(".local").join("share"));
                }
            }
        }
        extend_search_path(
            &mut data_dirs,
            non_empty_var(env, "XDG_DATA_DIRS"),
            &["/usr/local/share", "/usr/share"],
        );

        let locales = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .find_map(|var| non_empty_var(env, var))
            .map(|locale| locale_candidates(&locale))
            .unwrap_or_default();

        Self {
            config_dirs,
            data_dirs,
            locales,
        }
    }
}

fn non_empty_var(env: &dyn Environment, name: &str) -> Option<String> {
    env.get_var(name).filter(|v| !v.is_empty())
}

fn extend_search_path(dirs: &mut Vec<PathBuf>, var: Option<String>, fallback: &[&str]) {
    match var {
        Some(joined) => dirs.extend(
            joined
                .split(':')
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        ),
        None => dirs.extend(fallback.iter().map(PathBuf::from)),
    }
}

// ── Registry ─────────────────────────────────────────────────────────────

/// [`MailAppRegistry`] backed by the freedesktop application database.
pub struct FreedesktopRegistry {
    dirs: XdgDirs,
    config: RegistryConfig,
}

impl FreedesktopRegistry {
    /// Registry over the real process environment.
    pub fn new(config: RegistryConfig) -> Self {
        let dirs = XdgDirs::from_env(&crate::env::NativeEnvironment, dirs::home_dir());
        Self::with_dirs(dirs, config)
    }

    /// Registry over explicit search paths.
    pub fn with_dirs(dirs: XdgDirs, config: RegistryConfig) -> Self {
        Self { dirs, config }
    }

    /// Application directories to scan, most preferred first.
    fn application_dirs(&self) -> Vec<PathBuf> {
        self.config
            .extra_application_dirs
            .iter()
            .cloned()
            .chain(self.dirs.data_dirs.iter().map(|d| d.join("applications")))
            .collect()
    }

    /// `mimeapps.list` locations, most preferred first.
    fn mimeapps_paths(&self) -> Vec<PathBuf> {
        self.dirs
            .config_dirs
            .iter()
            .map(|d| d.join("mimeapps.list"))
            .chain(
                self.dirs
                    .data_dirs
                    .iter()
                    .map(|d| d.join("applications").join("mimeapps.list")),
            )
            .collect()
    }

    async fn load_associations(&self) -> Associations {
        let mut lists = Vec::new();
        for path in self.mimeapps_paths() {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => {
                    debug!(path = %path.display(), "reading mimeapps list");
                    lists.push(MimeAppsList::parse(&contents, MAILTO_MIME));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable mimeapps list");
                }
            }
        }
        mimeapps::merge(lists)
    }

    /// Scan every application directory, keeping the first entry seen for
    /// each desktop-file ID. Hidden entries stay in the map so a user
    /// override can shadow (and thereby delete) a system entry.
    async fn scan_entries(&self) -> HashMap<String, DesktopEntry> {
        let mut entries = HashMap::new();
        for dir in self.application_dirs() {
            self.scan_dir(&dir, &mut entries).await;
        }
        entries
    }

    async fn scan_dir(&self, root: &Path, entries: &mut HashMap<String, DesktopEntry>) {
        // Iterative walk; nested paths map to `-`-joined desktop-file IDs.
        let mut pending = vec![(root.to_path_buf(), String::new())];
        while let Some((dir, prefix)) = pending.pop() {
            let mut read_dir = match tokio::fs::read_dir(&dir).await {
                Ok(read_dir) => read_dir,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping unreadable application dir");
                    continue;
                }
            };

            while let Ok(Some(dir_entry)) = read_dir.next_entry().await {
                let path = dir_entry.path();
                let file_name = dir_entry.file_name().to_string_lossy().into_owned();
                if dir_entry.file_type().await.is_ok_and(|ft| ft.is_dir()) {
                    pending.push((path, format!("{prefix}{file_name}-")));
                    continue;
                }
                if !file_name.ends_with(".desktop") {
                    continue;
                }
                let id = format!("{prefix}{file_name}");
                if entries.contains_key(&id) {
                    continue;
                }
                let contents = match tokio::fs::read_to_string(&path).await {
                    Ok(contents) => contents,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping unreadable desktop entry");
                        continue;
                    }
                };
                match DesktopEntry::parse(&id, &contents, &self.dirs.locales) {
                    Ok(entry) => {
                        entries.insert(id, entry);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping malformed desktop entry");
                    }
                }
            }
        }
    }

    /// Whether the entry can actually be started: it must carry an `Exec`
    /// line, and a declared `TryExec` binary must be installed.
    fn entry_point_present(entry: &DesktopEntry) -> bool {
        if entry.exec.is_none() {
            return false;
        }
        match &entry.try_exec {
            Some(try_exec) => which::which(try_exec).is_ok(),
            None => true,
        }
    }

    fn handler_for(entry: &DesktopEntry) -> MailHandler {
        MailHandler {
            label: entry.name.clone(),
            target: LaunchTarget {
                id: entry.id.clone(),
                exec: entry.exec.clone(),
                needs_terminal: entry.terminal,
            },
        }
    }
}

#[async_trait]
impl MailAppRegistry for FreedesktopRegistry {
    async fn query_handlers(&self) -> Result<Vec<MailHandler>, RegistryError> {
        let assoc = self.load_associations().await;
        let entries = self.scan_entries().await;

        let usable = |entry: &DesktopEntry| {
            entry.is_application
                && !entry.hidden
                && (self.config.include_no_display || !entry.no_display)
                && !assoc.is_removed(&entry.id)
                && Self::entry_point_present(entry)
        };

        // Preferred handlers first, in mimeapps precedence order.
        let mut handlers = Vec::new();
        let mut listed: HashSet<String> = HashSet::new();
        for id in &assoc.preferred {
            if let Some(entry) = entries.get(id)
                && usable(entry)
                && listed.insert(id.clone())
            {
                handlers.push(Self::handler_for(entry));
            }
        }

        // Then every other associated entry, label-ordered so repeated
        // queries agree.
        let mut rest: Vec<&DesktopEntry> = entries
            .values()
            .filter(|e| !listed.contains(&e.id) && usable(e))
            .filter(|e| e.handles(MAILTO_MIME) || assoc.added.contains(&e.id))
            .collect();
        rest.sort_by(|a, b| {
            let by_label = a.name.to_lowercase().cmp(&b.name.to_lowercase());
            by_label.then_with(|| a.id.cmp(&b.id))
        });
        handlers.extend(rest.into_iter().map(Self::handler_for));

        debug!(count = handlers.len(), "queried mail handlers");
        Ok(handlers)
    }

    async fn launch(
        &self,
        target: &LaunchTarget,
        compose: &ComposeRequest,
    ) -> Result<(), RegistryError> {
        let exec_line = target
            .exec
            .as_deref()
            .ok_or_else(|| RegistryError::NotLaunchable(target.id.clone()))?;
        let launch_failed = |reason: String| RegistryError::LaunchFailed {
            id: target.id.clone(),
            reason,
        };

        let words = exec::split_exec(exec_line).map_err(|e| launch_failed(e.to_string()))?;
        let uri = compose.to_mailto_uri();
        let mut argv = exec::expand_field_codes(&words, &uri);
        if target.needs_terminal {
            let terminal = self
                .config
                .terminal_command
                .as_deref()
                .ok_or_else(|| RegistryError::NotLaunchable(target.id.clone()))?;
            argv = exec::wrap_terminal(terminal, &argv).map_err(|e| launch_failed(e.to_string()))?;
        }
        let Some((program, args)) = argv.split_first() else {
            return Err(RegistryError::NotLaunchable(target.id.clone()));
        };

        let resolved = which::which(program)
            .map_err(|_| launch_failed(format!("`{program}` not found on PATH")))?;

        debug!(id = %target.id, program = %resolved.display(), "launching mail handler");
        let mut cmd = tokio::process::Command::new(&resolved);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        let mut child = cmd.spawn().map_err(|e| launch_failed(e.to_string()))?;

        // Reap in the background so finished handlers never linger as
        // zombies while the bridge stays up.
        tokio::spawn(async move {
            let _ = child.wait().await;
        });
        Ok(())
    }
}
