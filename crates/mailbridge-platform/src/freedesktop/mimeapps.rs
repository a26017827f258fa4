//! `mimeapps.list` parsing and precedence merging.
//!
//! Association lists are read from every XDG config and data directory
//! and merged most-preferred first. The merge follows the mime-apps
//! specification's shadowing rule: an association added (or set default)
//! at a higher-precedence level survives a removal below it, and a
//! removal at a higher level blacklists everything beneath.

use std::collections::HashSet;

/// The associations one `mimeapps.list` file declares for a single MIME
/// type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeAppsList {
    /// `[Default Applications]` entries, most preferred first.
    pub defaults: Vec<String>,
    /// `[Added Associations]` entries.
    pub added: Vec<String>,
    /// `[Removed Associations]` entries.
    pub removed: Vec<String>,
}

impl MimeAppsList {
    /// Parse one file, keeping only the associations for `mime`.
    pub fn parse(contents: &str, mime: &str) -> Self {
        #[derive(PartialEq)]
        enum Section {
            Defaults,
            Added,
            Removed,
            Other,
        }

        let mut list = Self::default();
        let mut section = Section::Other;

        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
                section = match header {
                    "Default Applications" => Section::Defaults,
                    "Added Associations" => Section::Added,
                    "Removed Associations" => Section::Removed,
                    _ => Section::Other,
                };
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.trim_end() != mime {
                continue;
            }
            let ids = value
                .split(';')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from);
            match section {
                Section::Defaults => list.defaults.extend(ids),
                Section::Added => list.added.extend(ids),
                Section::Removed => list.removed.extend(ids),
                Section::Other => {}
            }
        }

        list
    }
}

/// The merged view over all `mimeapps.list` files for one MIME type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Associations {
    /// Default handlers in preference order, highest level first.
    pub preferred: Vec<String>,
    /// Explicitly added handlers, in precedence order.
    pub added: Vec<String>,
    /// Handlers blacklisted for this MIME type.
    pub removed: HashSet<String>,
}

impl Associations {
    /// Whether `id` was removed without being re-added at a higher level.
    pub fn is_removed(&self, id: &str) -> bool {
        self.removed.contains(id)
    }
}

/// Merge per-file association lists, ordered most preferred first.
pub fn merge(lists: impl IntoIterator<Item = MimeAppsList>) -> Associations {
    let mut merged = Associations::default();
    let mut associated: HashSet<String> = HashSet::new();

    for list in lists {
        for id in list.defaults {
            if merged.removed.contains(&id) {
                continue;
            }
            associated.insert(id.clone());
            if !merged.preferred.contains(&id) {
                merged.preferred.push(id);
            }
        }
        for id in list.added {
            if merged.removed.contains(&id) {
                continue;
            }
            associated.insert(id.clone());
            if !merged.added.contains(&id) {
                merged.added.push(id);
            }
        }
        for id in list.removed {
            // A higher level already associated it; the removal below
            // does not apply.
            if !associated.contains(&id) {
                merged.removed.insert(id);
            }
        }
    }

    merged
}
