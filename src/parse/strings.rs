use crate::error::ErrorKind;

/// Parses any of the four string forms, leaving `input` just past the
/// closing delimiter. `line` is advanced across the newlines the multi-line
/// forms consume, so failures report the line they were detected on.
pub(crate) fn parse(input: &mut &str, line: &mut usize) -> Result<String, ErrorKind> {
    if input.starts_with("\"\"\"") {
        multiline_basic(input, line)
    } else if input.starts_with('"') {
        basic(input)
    } else if input.starts_with("'''") {
        multiline_literal(input, line)
    } else {
        literal(input)
    }
}

/// Parses a single-line basic string, escape sequences active.
///
/// Also the grammar of quoted keys.
pub(crate) fn basic(input: &mut &str) -> Result<String, ErrorKind> {
    let whole = *input;
    let s = &whole[1..];
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                *input = &s[i + 1..];
                return Ok(out);
            }
            '\n' | '\r' => {
                *input = &s[i..];
                return Err(ErrorKind::StringUnterminated);
            }
            '\\' => match chars.next() {
                Some((_, esc)) => match escape(esc) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        *input = &s[i..];
                        return Err(ErrorKind::BadEscape);
                    }
                },
                None => break,
            },
            _ => out.push(c),
        }
    }
    *input = "";
    Err(ErrorKind::StringUnterminated)
}

/// Parses a single-line literal string: no escape processing at all.
fn literal(input: &mut &str) -> Result<String, ErrorKind> {
    let whole = *input;
    let s = &whole[1..];
    for (i, c) in s.char_indices() {
        match c {
            '\'' => {
                *input = &s[i + 1..];
                return Ok(s[..i].to_string());
            }
            '\n' | '\r' => {
                *input = &s[i..];
                return Err(ErrorKind::StringUnterminated);
            }
            _ => {}
        }
    }
    *input = "";
    Err(ErrorKind::StringUnterminated)
}

/// Parses a multi-line basic string enclosed in `"""`.
fn multiline_basic(input: &mut &str, line: &mut usize) -> Result<String, ErrorKind> {
    let whole = *input;
    let mut pos = 3;
    pos += leading_newline(&whole[pos..], line);
    let mut out = String::new();
    loop {
        let rest = &whole[pos..];
        if rest.starts_with("\"\"\"") {
            *input = &whole[pos + 3..];
            return Ok(out);
        }
        let Some(c) = rest.chars().next() else {
            *input = "";
            return Err(ErrorKind::StringUnterminated);
        };
        match c {
            '\\' => {
                if let Some(skip) = line_continuation(rest, line) {
                    pos += skip;
                    continue;
                }
                match rest[1..].chars().next() {
                    None => {
                        *input = "";
                        return Err(ErrorKind::StringUnterminated);
                    }
                    Some(esc) => match escape(esc) {
                        Some(decoded) => {
                            out.push(decoded);
                            pos += 2;
                        }
                        None => {
                            *input = rest;
                            return Err(ErrorKind::BadEscape);
                        }
                    },
                }
            }
            '\r' if rest.starts_with("\r\n") => {
                out.push('\n');
                *line += 1;
                pos += 2;
            }
            '\n' => {
                out.push('\n');
                *line += 1;
                pos += 1;
            }
            _ => {
                out.push(c);
                pos += c.len_utf8();
            }
        }
    }
}

/// Parses a multi-line literal string enclosed in `'''`.
///
/// No escape processing, with one exception: the trailing-backslash line
/// continuation works the same way as in the basic form.
fn multiline_literal(input: &mut &str, line: &mut usize) -> Result<String, ErrorKind> {
    let whole = *input;
    let mut pos = 3;
    pos += leading_newline(&whole[pos..], line);
    let mut out = String::new();
    loop {
        let rest = &whole[pos..];
        if rest.starts_with("'''") {
            *input = &whole[pos + 3..];
            return Ok(out);
        }
        let Some(c) = rest.chars().next() else {
            *input = "";
            return Err(ErrorKind::StringUnterminated);
        };
        match c {
            '\\' => {
                if let Some(skip) = line_continuation(rest, line) {
                    pos += skip;
                } else {
                    out.push('\\');
                    pos += 1;
                }
            }
            '\r' if rest.starts_with("\r\n") => {
                out.push('\n');
                *line += 1;
                pos += 2;
            }
            '\n' => {
                out.push('\n');
                *line += 1;
                pos += 1;
            }
            _ => {
                out.push(c);
                pos += c.len_utf8();
            }
        }
    }
}

/// A newline immediately after the opening delimiter is discarded.
fn leading_newline(s: &str, line: &mut usize) -> usize {
    if s.starts_with("\r\n") {
        *line += 1;
        2
    } else if s.starts_with('\n') {
        *line += 1;
        1
    } else {
        0
    }
}

/// Detects a trailing `\` line continuation at `rest` (which starts with the
/// backslash): backslash, optional trailing whitespace, newline. Returns the
/// number of bytes to skip, through the next line's leading whitespace.
fn line_continuation(rest: &str, line: &mut usize) -> Option<usize> {
    let after = &rest[1..];
    let ws = after.len() - after.trim_start_matches([' ', '\t']).len();
    let after_ws = &after[ws..];
    let nl = if after_ws.starts_with("\r\n") {
        2
    } else if after_ws.starts_with('\n') {
        1
    } else {
        return None;
    };
    *line += 1;
    let next_line = &after_ws[nl..];
    let lead = next_line.len() - next_line.trim_start_matches([' ', '\t']).len();
    Some(1 + ws + nl + lead)
}

fn escape(c: char) -> Option<char> {
    Some(match c {
        'b' => '\u{0008}',
        't' => '\t',
        'n' => '\n',
        'f' => '\u{000C}',
        'r' => '\r',
        '"' => '"',
        '\\' => '\\',
        // `\uXXXX` / `\UXXXXXXXX` are deliberately not decoded.
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(s: &str) -> (String, &'static str) {
        // Leak so tests can assert on the leftover input easily.
        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let mut input = leaked;
        let mut line = 1;
        let out = parse(&mut input, &mut line).expect(s);
        (out, input)
    }

    fn parse_err(s: &str) -> ErrorKind {
        let mut input = s;
        let mut line = 1;
        parse(&mut input, &mut line).unwrap_err()
    }

    #[test]
    fn basic_escapes() {
        let (out, rest) = parse_ok(r#""a\tb\\c\"d\n" tail"#);
        assert_eq!(out, "a\tb\\c\"d\n");
        assert_eq!(rest, " tail");
    }

    #[test]
    fn unsupported_escapes() {
        assert_eq!(parse_err(r#""bad \x""#), ErrorKind::BadEscape);
        assert_eq!(parse_err(r#""no \u0041 yet""#), ErrorKind::BadEscape);
    }

    #[test]
    fn unterminated_basic() {
        assert_eq!(parse_err("\"abc"), ErrorKind::StringUnterminated);
        assert_eq!(parse_err("\"abc\nd\""), ErrorKind::StringUnterminated);
    }

    #[test]
    fn literal_is_raw() {
        let (out, rest) = parse_ok(r"'a\tb' tail");
        assert_eq!(out, r"a\tb");
        assert_eq!(rest, " tail");
        assert_eq!(parse_err("'abc"), ErrorKind::StringUnterminated);
    }

    #[test]
    fn multiline_basic_trims_leading_newline() {
        let (out, _) = parse_ok("\"\"\"\nRoses are red\nViolets are blue\"\"\"");
        assert_eq!(out, "Roses are red\nViolets are blue");
    }

    #[test]
    fn multiline_basic_line_continuation() {
        let (out, _) = parse_ok("\"\"\"\nThe quick brown \\\n   fox jumps\"\"\"");
        assert_eq!(out, "The quick brown fox jumps");
        // Trailing whitespace after the backslash is consumed too.
        let (out, _) = parse_ok("\"\"\"one \\  \n  two\"\"\"");
        assert_eq!(out, "one two");
    }

    #[test]
    fn multiline_basic_keeps_inner_quotes() {
        let (out, _) = parse_ok("\"\"\"a \"quoted\" word\"\"\"");
        assert_eq!(out, "a \"quoted\" word");
        let (out, _) = parse_ok("\"\"\"esc \\\"\"\" done\"\"\"");
        assert_eq!(out, "esc \"\"\" done");
    }

    #[test]
    fn multiline_literal_raw_with_continuation() {
        let (out, _) = parse_ok("'''\nkeep \\here\nbut join \\\nthis'''");
        assert_eq!(out, "keep \\here\nbut join this");
    }

    #[test]
    fn line_counter_advances() {
        let mut input = "\"\"\"a\nb\nc\"\"\" rest";
        let mut line = 1;
        parse(&mut input, &mut line).unwrap();
        assert_eq!(line, 3);
        assert_eq!(input, " rest");
    }
}
