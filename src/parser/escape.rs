//! Escaping of path keys embedded in the dump grammar.
//!
//! Keys are written on a single line, so newline, carriage return and
//! backslash are escaped as `\n`, `\r` and `\\`.

/// Escape a key for writing on a `+` line
pub fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Unescape a key as read from a `+` line.
///
/// Scans left to right so an escaped backslash is consumed before the
/// character after it is looked at: `\\n` yields a literal `\n`, never
/// a newline. Unknown escapes and a trailing lone backslash are kept as
/// written.
pub fn unescape_key(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut unescaped = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('\\') => unescaped.push('\\'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}
