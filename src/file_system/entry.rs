use std::borrow::Cow;
use std::ffi::OsStr;

use chrono::{DateTime, Utc};

use crate::escape::{html_escape_count, url_escape_count};

/// One member of a listed directory.
///
/// The escape counts and the display length are derived from the name once,
/// when the entry is built, and stay fixed for its whole life: sorting moves
/// entries around but never touches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: Vec<u8>,
    is_dir: bool,
    modified_at: DateTime<Utc>,
    size: i64,

    url_escape_extra: usize,
    html_escape_extra: usize,
    display_len: usize,
    display_in_chars: bool,
}

impl DirectoryEntry {
    /// Builds an entry from its raw name and metadata.
    ///
    /// With `utf8` set, the display length counts code points of names that
    /// are valid UTF-8; otherwise it counts bytes.
    pub fn new(
        name: impl Into<Vec<u8>>,
        is_dir: bool,
        size: i64,
        modified_at: DateTime<Utc>,
        utf8: bool,
    ) -> Self {
        let name = name.into();
        let chars = if utf8 {
            std::str::from_utf8(&name).ok().map(|s| s.chars().count())
        } else {
            None
        };

        Self {
            url_escape_extra: url_escape_count(&name),
            html_escape_extra: html_escape_count(&name),
            display_len: chars.unwrap_or(name.len()),
            display_in_chars: chars.is_some(),
            name,
            is_dir,
            modified_at,
            size,
        }
    }

    pub fn from_os_str(
        name: &OsStr,
        is_dir: bool,
        size: i64,
        modified_at: DateTime<Utc>,
        utf8: bool,
    ) -> Self {
        Self::new(name.as_encoded_bytes(), is_dir, size, modified_at, utf8)
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn modified_at(&self) -> &DateTime<Utc> {
        &self.modified_at
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Extra bytes the URL-escaped name takes over the raw name.
    pub fn url_escape_extra(&self) -> usize {
        self.url_escape_extra
    }

    /// Extra bytes the HTML-escaped name takes over the raw name.
    pub fn html_escape_extra(&self) -> usize {
        self.html_escape_extra
    }

    /// Length of the name in display units (code points or bytes).
    pub fn display_len(&self) -> usize {
        self.display_len
    }

    /// The longest prefix of the name spanning at most `units` display units.
    pub fn display_prefix(&self, units: usize) -> &[u8] {
        if units >= self.display_len {
            return &self.name;
        }
        if !self.display_in_chars {
            return &self.name[..units];
        }
        // display_in_chars is only set for valid UTF-8
        let end = std::str::from_utf8(&self.name)
            .ok()
            .and_then(|s| s.char_indices().nth(units))
            .map_or(self.name.len(), |(i, _)| i);
        &self.name[..end]
    }
}
