//! Fixed HTML fragments of a listing page.
//!
//! The sizer adds up the lengths of these and the renderer copies them, so
//! every piece of markup lives here exactly once.

use crate::file_system::{Criterion, DirectoryEntry, SortKey};

pub const HEAD_OPEN: &str = concat!(
    "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" ",
    "\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">\n",
    "<html xmlns=\"http://www.w3.org/1999/xhtml\">\n",
    "<head>\n",
    "<meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\"/>\n",
    "<meta name=\"viewport\" content=\"width=device-width\"/>\n",
    "<style type=\"text/css\">\n",
    "body,html{background:#fff;font-family:\"Bitstream Vera Sans\",\"Lucida Grande\",",
    "\"Lucida Sans Unicode\",Lucidux,Verdana,Lucida,sans-serif}\n",
    "tr:nth-child(even){background:#f4f4f4}\n",
    "th,td{padding:0.1em 0.5em}\n",
    "th{text-align:left;font-weight:bold;background:#eee;border-bottom:1px solid #aaa}\n",
    "#list{border:1px solid #aaa;width:100%}\n",
    "a{color:#a33}\n",
    "a:hover{color:#e33}\n",
    "</style>\n",
);
pub const CSS_OPEN: &str = "<link rel=\"stylesheet\" href=\"";
pub const CSS_CLOSE: &str = "\" type=\"text/css\"/>\n";
pub const TITLE_OPEN: &str = "<title>Index of ";
pub const TITLE_CLOSE: &str = "</title>\n</head>\n";
pub const BODY_OPEN: &str = "<body>\n<h1>Index of ";
pub const HEADING_CLOSE: &str = "</h1>\n";

pub const TABLE_OPEN: &str = "<table id=\"list\">\n<thead><tr>";
pub const TABLE_HEAD_CLOSE: &str = "</tr></thead>\n<tbody>\n";
pub const TABLE_CLOSE: &str = "</tbody>\n</table>\n";
pub const FOOT: &str = "</body>\n</html>\n";

/// Column headers in display order: criterion, markup before the re-sort
/// query, markup after it.
pub const COLUMNS: [(Criterion, &str, &str); 3] = [
    (
        Criterion::Name,
        "<th style=\"width:55%\"><a href=\"",
        "\">File Name</a></th>",
    ),
    (
        Criterion::Size,
        "<th style=\"width:20%\"><a href=\"",
        "\">File Size</a></th>",
    ),
    (
        Criterion::ModifiedTime,
        "<th style=\"width:25%\"><a href=\"",
        "\">Date</a></th>",
    ),
];

pub const COLUMNS_LEN: usize = COLUMNS[0].1.len()
    + COLUMNS[0].2.len()
    + COLUMNS[1].1.len()
    + COLUMNS[1].2.len()
    + COLUMNS[2].1.len()
    + COLUMNS[2].2.len()
    + 3 * SortKey::QUERY_LEN;

pub const PARENT_OPEN: &str = "<tr><td class=\"link\"><a href=\"../";
pub const PARENT_CLOSE: &str = concat!(
    "\">Parent directory/</a></td>",
    "<td class=\"size\">-</td>",
    "<td class=\"date\">-</td></tr>\n",
);

pub const ROW_OPEN: &str = "<tr><td class=\"link\"><a href=\"";
pub const ROW_TITLE: &str = "\" title=\"";
pub const ROW_NAME: &str = "\">";
pub const ROW_SIZE: &str = "</a></td><td class=\"size\">";
pub const ROW_DATE: &str = "</td><td class=\"date\">";
pub const ROW_CLOSE: &str = "</td></tr>\n";

/// Markup every row carries regardless of its entry.
pub const ROW_FIXED_LEN: usize = ROW_OPEN.len()
    + ROW_TITLE.len()
    + ROW_NAME.len()
    + ROW_SIZE.len()
    + ROW_DATE.len()
    + ROW_CLOSE.len();

/// Appended to names cut short, already HTML-escaped.
pub const ELLIPSIS: &str = "..&gt;";

/// The part of a name shown as link text.
pub struct VisibleName<'a> {
    /// Raw bytes to show, HTML-escaped on output.
    pub prefix: &'a [u8],
    /// The name was cut and [`ELLIPSIS`] follows the prefix.
    pub truncated: bool,
}

impl<'a> VisibleName<'a> {
    /// Directories show a trailing `/`, which counts towards `width`. Names
    /// that do not fit keep `width - 3` display units and get an ellipsis.
    pub fn of(entry: &'a DirectoryEntry, width: usize) -> Self {
        let needed = entry.display_len() + usize::from(entry.is_dir());
        if needed > width {
            Self {
                prefix: entry.display_prefix(width.saturating_sub(3)),
                truncated: true,
            }
        } else {
            Self {
                prefix: entry.name(),
                truncated: false,
            }
        }
    }

    /// Bytes after the escaped prefix: the ellipsis or a directory's `/`.
    pub fn suffix(&self, is_dir: bool) -> &'static str {
        match (self.truncated, is_dir) {
            (true, _) => ELLIPSIS,
            (false, true) => "/",
            (false, false) => "",
        }
    }
}
