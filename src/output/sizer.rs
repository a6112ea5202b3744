use crate::escape::html_escape_count;
use crate::file_system::{DirectoryEntry, SortKey};
use crate::output::template::*;
use crate::output::RenderOptions;
use crate::units::size::format_entry_size;
use crate::units::time::time_format_len;

/// Exact number of bytes [`render_into`](crate::output::render_into) writes
/// for `entries`.
pub fn size_of(entries: &[DirectoryEntry], opts: &RenderOptions) -> usize {
    let uri = opts.uri.as_bytes();
    let uri_html_len = uri.len() + html_escape_count(uri);
    let suffix_len = opts.sort_suffix.map_or(0, |_| SortKey::QUERY_LEN);
    let time_len = time_format_len(opts.time_format);

    let mut len = match opts.header {
        Some(header) => header.len(),
        None => {
            let css_len = opts.css_href.map_or(0, |href| {
                CSS_OPEN.len() + href.len() + html_escape_count(href.as_bytes()) + CSS_CLOSE.len()
            });
            HEAD_OPEN.len()
                + css_len
                + TITLE_OPEN.len()
                + uri_html_len
                + TITLE_CLOSE.len()
                + BODY_OPEN.len()
        }
    };

    if opts.show_path {
        len += uri_html_len + HEADING_CLOSE.len();
    }

    len += TABLE_OPEN.len() + COLUMNS_LEN + TABLE_HEAD_CLOSE.len();

    if opts.shows_parent() {
        len += PARENT_OPEN.len() + suffix_len + PARENT_CLOSE.len();
    }

    for entry in entries {
        len += ROW_FIXED_LEN + row_len(entry, opts, suffix_len) + time_len;
    }

    len += TABLE_CLOSE.len();
    len += opts.footer.map_or(FOOT.len(), <[u8]>::len);
    len
}

/// Entry-dependent bytes of one row, everything but the markup and the date.
fn row_len(entry: &DirectoryEntry, opts: &RenderOptions, suffix_len: usize) -> usize {
    let name_len = entry.name().len();

    let dir_extra = if entry.is_dir() { 1 + suffix_len } else { 0 };
    let href = name_len + entry.url_escape_extra() + dir_extra;
    let title = name_len + entry.html_escape_extra();

    let visible = VisibleName::of(entry, opts.name_length);
    let shown = if visible.truncated {
        visible.prefix.len() + html_escape_count(visible.prefix)
    } else {
        title
    };
    let shown = shown + visible.suffix(entry.is_dir()).len();

    let size = format_entry_size(entry.is_dir(), entry.size(), opts.exact_size)
        .padded_len(opts.size_width);

    href + title + shown + size
}
