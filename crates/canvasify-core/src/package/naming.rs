//! Archive entry naming.
//!
//! An upload named `holiday/Beach.JPG` becomes `Beach_formatted.jpg`: only
//! the final path component survives, so no entry can point outside the
//! directory it is extracted into. Uploads without an extension get a `.jpg`
//! suffix. When two uploads derive the same name, later ones get a numeric
//! suffix (`Beach_formatted_2.jpg`).

use std::collections::HashSet;

/// Suffix appended to the stem of every entry.
pub const ENTRY_SUFFIX: &str = "_formatted";

/// Extension used when the upload has none.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Split a filename into its basename stem and lowercased extension.
///
/// Directory components (either separator) are dropped. The extension is the
/// text after the last `.` of what remains, without dots. A leading dot (as
/// in `.hidden`) does not start an extension.
///
/// ```ignore
/// assert_eq!(split_filename("a/b.tar.GZ"), ("b.tar", "gz".to_string()));
/// assert_eq!(split_filename(".hidden"), (".hidden", String::new()));
/// ```
pub fn split_filename(filename: &str) -> (&str, String) {
    let base = filename
        .rfind(['/', '\\'])
        .map_or(filename, |i| &filename[i + 1..]);
    let leading_dots = base.len() - base.trim_start_matches('.').len();

    match base[leading_dots..].rfind('.') {
        Some(i) => {
            let dot = leading_dots + i;
            let ext = base[dot..].trim_matches('.').to_lowercase();
            (&base[..dot], ext)
        }
        None => (base, String::new()),
    }
}

/// Hands out unique entry names within one archive.
#[derive(Debug, Default)]
pub struct EntryNamer {
    taken: HashSet<String>,
}

impl EntryNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the entry name for a basename `stem` and `ext` (empty means
    /// [`DEFAULT_EXTENSION`]).
    pub fn claim(&mut self, stem: &str, ext: &str) -> String {
        let ext = if ext.is_empty() { DEFAULT_EXTENSION } else { ext };

        let mut name = format!("{stem}{ENTRY_SUFFIX}.{ext}");
        let mut n = 2;
        while self.taken.contains(&name) {
            name = format!("{stem}{ENTRY_SUFFIX}_{n}.{ext}");
            n += 1;
        }

        self.taken.insert(name.clone());
        name
    }
}
