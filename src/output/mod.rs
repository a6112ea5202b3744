pub mod render;
pub mod sizer;
pub mod template;

use crate::file_system::SortKey;

pub use render::{render, render_into};
pub use sizer::size_of;

/// Everything that shapes one rendered listing, fixed for a request.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Request URI of the listed directory, shown in the title and heading.
    pub uri: &'a str,
    /// Ordering the entries are in; drives the column header links.
    pub sort: SortKey,
    /// Ordering to carry along in directory and parent links, if any.
    pub sort_suffix: Option<SortKey>,
    /// Display units a name may take before it is cut with an ellipsis.
    pub name_length: usize,
    pub exact_size: bool,
    /// Right-align exact sizes to this many bytes.
    pub size_width: usize,
    pub localtime: bool,
    pub time_format: &'a str,
    pub show_path: bool,
    pub hide_parent: bool,
    pub css_href: Option<&'a str>,
    /// Custom page header, replacing the built-in one.
    pub header: Option<&'a [u8]>,
    /// Custom page footer, replacing the built-in one.
    pub footer: Option<&'a [u8]>,
}

impl RenderOptions<'_> {
    /// The "parent directory" row is left out at the root and on request.
    pub fn shows_parent(&self) -> bool {
        !self.hide_parent && self.uri.len() > 1
    }
}

impl Default for RenderOptions<'static> {
    fn default() -> Self {
        Self {
            uri: "/",
            sort: SortKey::default(),
            sort_suffix: None,
            name_length: 50,
            exact_size: true,
            size_width: 0,
            localtime: false,
            time_format: "%Y-%b-%d %H:%M",
            show_path: true,
            hide_parent: false,
            css_href: None,
            header: None,
            footer: None,
        }
    }
}
