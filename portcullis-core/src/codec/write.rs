//! Escaping and pair emission for the wire format.

/// Append `value` with `\` and `'` backslash-escaped.
pub(crate) fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Append one `name='value'` pair.
pub(crate) fn push_pair(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str("='");
    push_escaped(out, value);
    out.push('\'');
}
