//! Filesystem-safe names for sections and videos.

/// Returns true for characters allowed in section and video names.
pub fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')')
}

/// Sanitizes a section or video title for use as a path component.
///
/// - Strips the trailing parenthesized annotation (e.g. a duration like `(10:32)`)
/// - Trims surrounding whitespace
/// - Replaces `:` with `-` and space with `_`
/// - Drops every character outside `A-Z a-z 0-9 - _ . ( )`
///
/// May return an empty string when nothing safe remains.
pub fn sanitize_name(raw: &str) -> String {
    // Stripping annotations one at a time until no `(` is left ends at the
    // first `(`, which keeps the result stable under a second pass.
    let head = match raw.find('(') {
        Some(i) => &raw[..i],
        None => raw,
    };

    let mut out = String::with_capacity(head.len());
    for c in head.trim().chars() {
        let c = match c {
            ':' => '-',
            ' ' => '_',
            other => other,
        };
        if is_safe_char(c) {
            out.push(c);
        }
    }
    out
}
