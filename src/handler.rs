use std::path::PathBuf;

use crate::config::Config;
use crate::errors::ListingError;
use crate::file_system::{read_entries, sort_entries, ReadOptions, SortKey};
use crate::output::{render, RenderOptions};

pub const CONTENT_TYPE: &str = "text/html";

/// What the host hands over for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRequest {
    /// Filesystem path the request URI resolved to.
    pub path: PathBuf,
    pub uri: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    /// The response charset is UTF-8.
    pub utf8: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexResponse {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Produces the listing page for `request`.
///
/// Returns `Ok(None)` when the request is not ours to answer: listings are
/// disabled, or the URI does not name a directory (no trailing `/`).
pub fn handle(
    config: &Config,
    request: &IndexRequest,
) -> Result<Option<IndexResponse>, ListingError> {
    if !config.enabled || !request.uri.ends_with('/') {
        log::debug!("declining '{}'", request.uri);
        return Ok(None);
    }

    let (sort, sort_suffix) = resolve_sort(request.query.as_deref(), config.default_sort);
    log::debug!("listing '{}' sorted by {sort}", request.path.display());

    let read_options = ReadOptions {
        show_dot_files: config.show_dot_files,
        hide_symlinks: config.hide_symlinks,
        ignore: &config.ignore,
        utf8: request.utf8,
    };
    let mut entries = read_entries(&request.path, &read_options)?;
    sort_entries(&mut entries, sort, config.dirs_first, config.case_sensitive);

    let render_options = RenderOptions {
        uri: &request.uri,
        sort,
        sort_suffix,
        name_length: config.name_length,
        exact_size: config.exact_size,
        size_width: config.size_width,
        localtime: config.localtime,
        time_format: &config.time_format,
        show_path: config.show_path,
        hide_parent: config.hide_parent,
        css_href: config.css_href.as_deref(),
        header: config.header.as_deref(),
        footer: config.footer.as_deref(),
    };
    let body = render(&request.path, &entries, &render_options)?;

    Ok(Some(IndexResponse {
        content_type: CONTENT_TYPE,
        body,
    }))
}

/// The ordering to list in, and the query to keep in links when it differs
/// from the configured default.
pub fn resolve_sort(query: Option<&str>, default: SortKey) -> (SortKey, Option<SortKey>) {
    match SortKey::from_query(query) {
        Some(key) if key != default => (key, Some(key)),
        _ => (default, None),
    }
}
