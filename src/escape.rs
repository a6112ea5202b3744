//! URL and HTML escaping of raw file names.
//!
//! Every escape routine comes as a pair: a `*_count` function returning the
//! number of bytes the escaped form adds over the raw input, and a writer
//! appending the escaped form to a buffer. The counts let the sizer budget the
//! output before anything is written, so the pairs must always agree.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Bytes that get percent-encoded inside an `href`.
///
/// Controls, space, non-ASCII bytes, characters with a meaning in URLs or in
/// HTML attributes, and the `:` `?` `[` `]` reserved set.
const fn needs_url_escape(b: u8) -> bool {
    matches!(
        b,
        0x00..=0x20
            | 0x7f..=0xff
            | b'"'
            | b'#'
            | b'%'
            | b'&'
            | b'\''
            | b'<'
            | b'>'
            | b'\\'
            | b'^'
            | b'`'
            | b'{'
            | b'|'
            | b'}'
            | b':'
            | b'?'
            | b'['
            | b']'
    )
}

/// Number of extra bytes [`url_escape`] writes for `src`.
///
/// Each escaped byte grows from one byte to the three byte `%XX` form.
pub fn url_escape_count(src: &[u8]) -> usize {
    2 * src.iter().filter(|&&b| needs_url_escape(b)).count()
}

/// Appends the percent-encoded form of `src` to `dst`.
pub fn url_escape(dst: &mut Vec<u8>, src: &[u8]) {
    for &b in src {
        if needs_url_escape(b) {
            dst.extend_from_slice(&[b'%', HEX[(b >> 4) as usize], HEX[(b & 0x0f) as usize]]);
        } else {
            dst.push(b);
        }
    }
}

fn html_entity(b: u8) -> Option<&'static [u8]> {
    match b {
        b'&' => Some(b"&amp;"),
        b'<' => Some(b"&lt;"),
        b'>' => Some(b"&gt;"),
        b'"' => Some(b"&quot;"),
        b'\'' => Some(b"&#39;"),
        _ => None,
    }
}

/// Number of extra bytes [`html_escape`] writes for `src`.
pub fn html_escape_count(src: &[u8]) -> usize {
    src.iter()
        .filter_map(|&b| html_entity(b))
        .map(|entity| entity.len() - 1)
        .sum()
}

/// Appends `src` to `dst` with `& < > " '` replaced by entities.
pub fn html_escape(dst: &mut Vec<u8>, src: &[u8]) {
    for &b in src {
        match html_entity(b) {
            Some(entity) => dst.extend_from_slice(entity),
            None => dst.push(b),
        }
    }
}

/// Writes `src` URL-escaped, copying verbatim when `extra` is zero.
///
/// `extra` is the precomputed [`url_escape_count`] of `src`.
pub fn write_url(dst: &mut Vec<u8>, src: &[u8], extra: usize) {
    if extra == 0 {
        dst.extend_from_slice(src);
    } else {
        url_escape(dst, src);
    }
}

/// Writes `src` HTML-escaped, copying verbatim when `extra` is zero.
pub fn write_html(dst: &mut Vec<u8>, src: &[u8], extra: usize) {
    if extra == 0 {
        dst.extend_from_slice(src);
    } else {
        html_escape(dst, src);
    }
}
