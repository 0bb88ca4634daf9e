/// Escapes `&`, `<` and `>` in `input` and appends the result to `output`.
///
/// Runs of unescaped text are found with `memchr` and copied in one go.
pub fn escape_html_content(output: &mut String, input: &str) {
    let mut rest = input;
    while let Some(index) = memchr::memchr3(b'&', b'<', b'>', rest.as_bytes()) {
        // The special characters are ASCII, so `index` is a char boundary.
        let (before, after) = rest.split_at(index);
        output.push_str(before);
        let Some((&special_char, _)) = after.as_bytes().split_first() else {
            break;
        };
        output.push_str(match special_char {
            b'&' => "&amp;",
            b'<' => "&lt;",
            _ => "&gt;",
        });
        rest = &after[1..];
    }
    output.push_str(rest);
}
