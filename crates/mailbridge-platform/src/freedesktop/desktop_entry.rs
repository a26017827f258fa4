//! Desktop entry (`.desktop`) parsing.
//!
//! Implements the subset of the freedesktop Desktop Entry specification
//! the registry needs: the `[Desktop Entry]` group, localized `Name`
//! lookup, the launch-relevant keys (`Exec`, `TryExec`, `Terminal`), the
//! visibility flags, and `MimeType`. Other groups (actions, translations
//! of keys we do not read) are skipped.

use std::collections::HashMap;

use thiserror::Error;

/// Failures parsing a single desktop entry file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EntryError {
    /// The file has no `[Desktop Entry]` group.
    #[error("no [Desktop Entry] group")]
    MissingGroup,

    /// A key the desktop-entry format requires is absent or empty.
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),
}

/// One parsed desktop entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Desktop-file ID (relative path under an applications directory,
    /// with `/` replaced by `-`).
    pub id: String,
    /// Display name, already resolved against the requested locales.
    pub name: String,
    /// Raw `Exec` line, field codes still in place.
    pub exec: Option<String>,
    /// Executable whose presence gates showing this entry.
    pub try_exec: Option<String>,
    /// Whether the program runs in a terminal.
    pub terminal: bool,
    /// `NoDisplay=true`: installed, but not meant for menus.
    pub no_display: bool,
    /// `Hidden=true`: the user deleted this entry.
    pub hidden: bool,
    /// Declared MIME associations.
    pub mime_types: Vec<String>,
    /// Whether `Type=Application`. Only applications can be launched.
    pub is_application: bool,
}

impl DesktopEntry {
    /// Parse `contents` as a desktop entry file.
    ///
    /// `locales` is the ordered preference list used to resolve `Name`
    /// (see [`locale_candidates`]); the unlocalized `Name` is the final
    /// fallback. An empty `Name` value, localized or not, counts as
    /// missing: entries never carry an empty display name.
    pub fn parse(id: &str, contents: &str, locales: &[String]) -> Result<Self, EntryError> {
        let keys = desktop_entry_group(contents).ok_or(EntryError::MissingGroup)?;

        let resolve_name = |key: &str| {
            keys.get(key)
                .map(|raw| unescape_value(raw))
                .filter(|name| !name.is_empty())
        };
        let name = locales
            .iter()
            .find_map(|locale| resolve_name(&format!("Name[{locale}]")))
            .or_else(|| resolve_name("Name"))
            .ok_or(EntryError::MissingKey("Name"))?;

        let mime_types = keys
            .get("MimeType")
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id: id.to_string(),
            name,
            exec: keys.get("Exec").map(|v| unescape_value(v)),
            try_exec: keys.get("TryExec").map(|v| unescape_value(v)),
            terminal: bool_value(&keys, "Terminal"),
            no_display: bool_value(&keys, "NoDisplay"),
            hidden: bool_value(&keys, "Hidden"),
            mime_types,
            is_application: keys.get("Type").is_some_and(|t| t == "Application"),
        })
    }

    /// Whether this entry declares `mime` in its `MimeType` list.
    pub fn handles(&self, mime: &str) -> bool {
        self.mime_types.iter().any(|m| m == mime)
    }
}

/// Extract the key-value pairs of the `[Desktop Entry]` group.
///
/// Returns `None` when the group is absent. Localized keys are stored
/// verbatim (`Name[de_DE]`); comments and blank lines are skipped.
fn desktop_entry_group(contents: &str) -> Option<HashMap<String, String>> {
    let mut keys: Option<HashMap<String, String>> = None;
    let mut in_group = false;

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            // Only the first [Desktop Entry] group counts.
            in_group = header == "Desktop Entry" && keys.is_none();
            if in_group {
                keys = Some(HashMap::new());
            }
            continue;
        }
        if !in_group {
            continue;
        }
        if let Some((key, value)) = line.split_once('=')
            && let Some(map) = keys.as_mut()
        {
            map.insert(key.trim_end().to_string(), value.trim_start().to_string());
        }
    }

    keys
}

fn bool_value(keys: &HashMap<String, String>, key: &str) -> bool {
    keys.get(key).is_some_and(|v| v == "true")
}

/// Resolve the desktop-entry escape sequences in a string value.
///
/// `\s` (space), `\n`, `\t`, `\r`, and `\\` are expanded; an unknown
/// escape keeps the backslash verbatim.
fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Expand a POSIX locale string into the desktop-entry lookup chain.
///
/// For `lang_COUNTRY.ENCODING@MODIFIER` the chain is
/// `lang_COUNTRY@MODIFIER`, `lang_COUNTRY`, `lang@MODIFIER`, `lang`
/// (encoding never participates). `C`, `POSIX`, and the empty string
/// yield no candidates.
pub fn locale_candidates(locale: &str) -> Vec<String> {
    if locale.is_empty() || locale == "C" || locale == "POSIX" {
        return Vec::new();
    }

    let (base, modifier) = match locale.split_once('@') {
        Some((base, modifier)) => (base, Some(modifier)),
        None => (locale, None),
    };
    let base = base.split_once('.').map_or(base, |(b, _encoding)| b);
    let (lang, country) = match base.split_once('_') {
        Some((lang, country)) => (lang, Some(country)),
        None => (base, None),
    };
    if lang.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::with_capacity(4);
    if let (Some(country), Some(modifier)) = (country, modifier) {
        candidates.push(format!("{lang}_{country}@{modifier}"));
    }
    if let Some(country) = country {
        candidates.push(format!("{lang}_{country}"));
    }
    if let Some(modifier) = modifier {
        candidates.push(format!("{lang}@{modifier}"));
    }
    candidates.push(lang.to_string());
    candidates
}
