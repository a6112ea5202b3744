use std::path::Path;

use crate::errors::ListingError;
use crate::escape::{html_escape, html_escape_count, write_html, write_url};
use crate::file_system::DirectoryEntry;
use crate::output::sizer::size_of;
use crate::output::template::*;
use crate::output::RenderOptions;
use crate::units::size::format_entry_size;
use crate::units::time::{calendar_time, write_time};

/// Renders `entries` into a buffer sized up front by [`size_of`].
///
/// `path` only names the directory in errors. The buffer is allocated once
/// and never grows; a mismatch between the measured and the written length is
/// reported as an internal error.
pub fn render(
    path: &Path,
    entries: &[DirectoryEntry],
    opts: &RenderOptions,
) -> Result<Vec<u8>, ListingError> {
    let expected = size_of(entries, opts);

    let mut out = Vec::new();
    if let Err(err) = out.try_reserve_exact(expected) {
        log::error!("cannot allocate {expected} bytes for listing of '{}': {err}", path.display());
        return Err(ListingError::internal(path, format!("allocating output: {err}")));
    }

    render_into(&mut out, entries, opts);

    if out.len() != expected {
        log::error!(
            "listing of '{}' is {} bytes, {expected} were computed",
            path.display(),
            out.len()
        );
        return Err(ListingError::internal(path, "rendered length differs from computed length"));
    }

    log::debug!(
        "rendered {} entries for '{}' into {expected} bytes",
        entries.len(),
        path.display()
    );
    Ok(out)
}

/// Appends the listing page for `entries` to `out`.
pub fn render_into(out: &mut Vec<u8>, entries: &[DirectoryEntry], opts: &RenderOptions) {
    let uri = opts.uri.as_bytes();
    let uri_extra = html_escape_count(uri);

    match opts.header {
        Some(header) => out.extend_from_slice(header),
        None => {
            out.extend_from_slice(HEAD_OPEN.as_bytes());
            if let Some(href) = opts.css_href {
                out.extend_from_slice(CSS_OPEN.as_bytes());
                html_escape(out, href.as_bytes());
                out.extend_from_slice(CSS_CLOSE.as_bytes());
            }
            out.extend_from_slice(TITLE_OPEN.as_bytes());
            write_html(out, uri, uri_extra);
            out.extend_from_slice(TITLE_CLOSE.as_bytes());
            out.extend_from_slice(BODY_OPEN.as_bytes());
        }
    }

    if opts.show_path {
        write_html(out, uri, uri_extra);
        out.extend_from_slice(HEADING_CLOSE.as_bytes());
    }

    out.extend_from_slice(TABLE_OPEN.as_bytes());
    for (criterion, open, close) in COLUMNS {
        out.extend_from_slice(open.as_bytes());
        out.extend_from_slice(opts.sort.toggled_for(criterion).query().as_bytes());
        out.extend_from_slice(close.as_bytes());
    }
    out.extend_from_slice(TABLE_HEAD_CLOSE.as_bytes());

    let suffix = opts.sort_suffix.map_or("", |key| key.query());

    if opts.shows_parent() {
        out.extend_from_slice(PARENT_OPEN.as_bytes());
        out.extend_from_slice(suffix.as_bytes());
        out.extend_from_slice(PARENT_CLOSE.as_bytes());
    }

    for entry in entries {
        render_row(out, entry, opts, suffix);
    }

    out.extend_from_slice(TABLE_CLOSE.as_bytes());
    out.extend_from_slice(opts.footer.unwrap_or(FOOT.as_bytes()));
}

fn render_row(out: &mut Vec<u8>, entry: &DirectoryEntry, opts: &RenderOptions, suffix: &str) {
    let name = entry.name();

    out.extend_from_slice(ROW_OPEN.as_bytes());
    write_url(out, name, entry.url_escape_extra());
    if entry.is_dir() {
        out.push(b'/');
        out.extend_from_slice(suffix.as_bytes());
    }

    out.extend_from_slice(ROW_TITLE.as_bytes());
    write_html(out, name, entry.html_escape_extra());

    out.extend_from_slice(ROW_NAME.as_bytes());
    let visible = VisibleName::of(entry, opts.name_length);
    if visible.truncated {
        html_escape(out, visible.prefix);
    } else {
        write_html(out, name, entry.html_escape_extra());
    }
    out.extend_from_slice(visible.suffix(entry.is_dir()).as_bytes());

    out.extend_from_slice(ROW_SIZE.as_bytes());
    format_entry_size(entry.is_dir(), entry.size(), opts.exact_size)
        .write_padded(out, opts.size_width);

    out.extend_from_slice(ROW_DATE.as_bytes());
    write_time(out, opts.time_format, &calendar_time(entry.modified_at(), opts.localtime));

    out.extend_from_slice(ROW_CLOSE.as_bytes());
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::file_system::{Criterion, Order, SortKey};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn file(name: &str, size: i64) -> DirectoryEntry {
        DirectoryEntry::new(name, false, size, at(1_700_000_000), true)
    }

    fn dir(name: &str) -> DirectoryEntry {
        DirectoryEntry::new(name, true, 4096, at(1_600_000_000), true)
    }

    fn page(entries: &[DirectoryEntry], opts: &RenderOptions) -> String {
        let out = render(Path::new("/srv"), entries, opts).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Vec<DirectoryEntry> {
        vec![
            dir("sub"),
            file("a.txt", 50),
            file("b & c.txt", 1536),
            file("<script>.html", 0),
            file("what?[1]:2", 7),
            file("ünïcödé-näme.txt", 12),
            file(&"x".repeat(80), 1 << 40),
            dir(&"long directory name ".repeat(4)),
            DirectoryEntry::new(&b"bad\xffbyte"[..], false, 3, at(0), true),
            DirectoryEntry::new("quote\"'", true, 0, at(-86_400), false),
        ]
    }

    #[test]
    fn rendered_length_is_always_the_computed_length() {
        let header = b"<html><body><h1>custom";
        let footer = b"</body></html>";
        let variants = [
            RenderOptions::default(),
            RenderOptions {
                uri: "/files/a&b/",
                sort: SortKey::new(Criterion::Size, Order::Descending),
                sort_suffix: Some(SortKey::new(Criterion::Size, Order::Descending)),
                exact_size: false,
                ..RenderOptions::default()
            },
            RenderOptions {
                uri: "/x/",
                name_length: 5,
                size_width: 12,
                time_format: "%A %B %e %I:%M %p %F %T %r %R %u %w %y %Z %",
                css_href: Some("/style.css?v=\"1\""),
                ..RenderOptions::default()
            },
            RenderOptions {
                uri: "/x/",
                show_path: false,
                hide_parent: true,
                header: Some(header),
                footer: Some(footer),
                name_length: 0,
                localtime: true,
                ..RenderOptions::default()
            },
        ];

        let entries = sample();
        for opts in &variants {
            let mut out = Vec::new();
            render_into(&mut out, &entries, opts);
            assert_eq!(out.len(), size_of(&entries, opts), "options {opts:?}");
            assert_eq!(render(Path::new("/srv"), &entries, opts).unwrap(), out);
        }
    }

    #[test]
    fn empty_listing_at_root_has_no_parent_row() {
        let html = page(&[], &RenderOptions::default());
        assert!(html.starts_with("<!DOCTYPE html"));
        assert!(html.contains("<title>Index of /</title>"));
        assert!(html.contains("<h1>Index of /</h1>"));
        assert!(!html.contains("Parent directory"));
        assert!(html.ends_with("</tbody>\n</table>\n</body>\n</html>\n"));
    }

    #[test]
    fn parent_row_below_root() {
        let opts = RenderOptions {
            uri: "/docs/",
            ..RenderOptions::default()
        };
        let html = page(&[], &opts);
        assert!(html.contains("<a href=\"../\">Parent directory/</a>"));

        let hidden = RenderOptions {
            hide_parent: true,
            ..opts
        };
        assert!(!page(&[], &hidden).contains("Parent directory"));
    }

    #[test]
    fn rows_escape_names_per_context() {
        let html = page(&[file("b & c.txt", 1536)], &RenderOptions::default());
        assert!(html.contains(concat!(
            "<tr><td class=\"link\"><a href=\"b%20%26%20c.txt\" title=\"b &amp; c.txt\">",
            "b &amp; c.txt</a></td><td class=\"size\">1536</td>",
            "<td class=\"date\">2023-Nov-14 22:13</td></tr>\n"
        )));
    }

    #[test]
    fn directories_link_with_slash_and_show_a_dash() {
        let html = page(&[dir("sub")], &RenderOptions::default());
        assert!(html.contains(
            "<a href=\"sub/\" title=\"sub\">sub/</a></td><td class=\"size\">-</td>"
        ));
    }

    #[test]
    fn long_names_are_cut_with_an_ellipsis() {
        let opts = RenderOptions {
            name_length: 10,
            ..RenderOptions::default()
        };
        let entries = [file("abcdefghijkl", 1), file("abcdefghij", 1), dir("abcdefghij")];
        let html = page(&entries, &opts);
        assert!(html.contains("title=\"abcdefghijkl\">abcdefg..&gt;</a>"));
        assert!(html.contains("title=\"abcdefghij\">abcdefghij</a>"));
        // the trailing slash counts, so the directory no longer fits
        assert!(html.contains("title=\"abcdefghij\">abcdefg..&gt;</a>"));
    }

    #[test]
    fn multibyte_names_are_cut_on_character_boundaries() {
        let opts = RenderOptions {
            name_length: 6,
            ..RenderOptions::default()
        };
        let html = page(&[file("äöüäöüäöü", 1)], &opts);
        assert!(html.contains(">äöü..&gt;</a>"));
    }

    #[test]
    fn column_links_toggle_the_active_sort() {
        let opts = RenderOptions {
            sort: SortKey::new(Criterion::Name, Order::Ascending),
            ..RenderOptions::default()
        };
        let html = page(&[], &opts);
        assert!(html.contains("href=\"?C=N&amp;O=D\">File Name</a>"));
        assert!(html.contains("href=\"?C=S&amp;O=A\">File Size</a>"));
        assert!(html.contains("href=\"?C=M&amp;O=A\">Date</a>"));

        let opts = RenderOptions {
            sort: SortKey::new(Criterion::ModifiedTime, Order::Descending),
            ..RenderOptions::default()
        };
        let html = page(&[], &opts);
        assert!(html.contains("href=\"?C=N&amp;O=A\">File Name</a>"));
        assert!(html.contains("href=\"?C=M&amp;O=A\">Date</a>"));
    }

    #[test]
    fn sort_suffix_is_carried_into_directory_links() {
        let key = SortKey::new(Criterion::Size, Order::Descending);
        let opts = RenderOptions {
            uri: "/a/",
            sort: key,
            sort_suffix: Some(key),
            ..RenderOptions::default()
        };
        let html = page(&[dir("sub"), file("f", 1)], &opts);
        assert!(html.contains("<a href=\"../?C=S&amp;O=D\">Parent directory/</a>"));
        assert!(html.contains("<a href=\"sub/?C=S&amp;O=D\" title=\"sub\">"));
        assert!(html.contains("<a href=\"f\" title=\"f\">"));
    }

    #[test]
    fn uri_and_stylesheet_are_html_escaped() {
        let opts = RenderOptions {
            uri: "/<b>/",
            css_href: Some("/s.css?a&b"),
            ..RenderOptions::default()
        };
        let html = page(&[], &opts);
        assert!(html.contains("<title>Index of /&lt;b&gt;/</title>"));
        assert!(html.contains("<h1>Index of /&lt;b&gt;/</h1>"));
        assert!(html.contains(
            "<link rel=\"stylesheet\" href=\"/s.css?a&amp;b\" type=\"text/css\"/>"
        ));
    }

    #[test]
    fn custom_header_and_footer_are_copied_verbatim() {
        let opts = RenderOptions {
            show_path: false,
            header: Some(b"<html><body>HEAD"),
            footer: Some(b"FOOT</body></html>"),
            ..RenderOptions::default()
        };
        let html = page(&[], &opts);
        assert!(html.starts_with("<html><body>HEAD<table id=\"list\">"));
        assert!(html.ends_with("</table>\nFOOT</body></html>"));
        assert!(!html.contains("<title>"));
    }

    #[test]
    fn human_readable_and_aligned_sizes() {
        let human = RenderOptions {
            exact_size: false,
            ..RenderOptions::default()
        };
        assert!(page(&[file("f", 1536)], &human).contains("<td class=\"size\">1.5 KiB</td>"));

        let aligned = RenderOptions {
            size_width: 6,
            ..RenderOptions::default()
        };
        assert!(page(&[file("f", 42)], &aligned).contains("<td class=\"size\">    42</td>"));
    }
}
