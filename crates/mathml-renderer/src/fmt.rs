const INDENT: &str = "    ";

pub(crate) fn new_line_and_indent(s: &mut String, indent_num: usize) {
    if indent_num > 0 {
        s.push('\n');
    }
    for _ in 0..indent_num {
        s.push_str(INDENT);
    }
}

/// Indentation of the children of a node at `indent`.
///
/// An indent of zero means "no pretty printing" and stays zero.
#[inline]
pub(crate) fn child_indent(indent: usize) -> usize {
    if indent > 0 {
        indent.saturating_add(1)
    } else {
        0
    }
}

/// Appends the shortest representation of `value`, without a trailing `.0` for integers.
pub(crate) fn push_number(s: &mut String, value: f64) {
    let mut buffer = dtoa::Buffer::new();
    let formatted = buffer.format(value);
    s.push_str(formatted.strip_suffix(".0").unwrap_or(formatted));
}
