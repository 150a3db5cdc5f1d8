//! Line tokenizer.
//!
//! Splits a single source line on spaces and tabs, except inside a quoted
//! string or a parenthesized group, which are kept whole. Every token is a
//! slice of the input line.

/// Split `line` into tokens.
///
/// - `"` opens a quoted region; the closing `"` ends the current token even
///   if more characters follow it directly.
/// - `(` opens a group outside of quotes; the matching `)` ends the current
///   token. A `)` inside quotes does not close the group.
/// - Unterminated quotes or groups simply run to the end of the line.
///
/// A blank line yields no tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_quotes = false;
    let mut in_parens = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => {
                let begin = *start.get_or_insert(i);
                if in_quotes {
                    tokens.push(&line[begin..=i]);
                    start = None;
                    in_quotes = false;
                } else {
                    in_quotes = true;
                }
            }
            '(' => {
                start.get_or_insert(i);
                if !in_quotes {
                    in_parens = true;
                }
            }
            ')' => {
                let begin = *start.get_or_insert(i);
                if in_parens && !in_quotes {
                    tokens.push(&line[begin..=i]);
                    start = None;
                    in_parens = false;
                }
            }
            ' ' | '\t' => {
                if in_quotes || in_parens {
                    start.get_or_insert(i);
                } else if let Some(begin) = start.take() {
                    tokens.push(&line[begin..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }

    if let Some(begin) = start {
        tokens.push(&line[begin..]);
    }
    tokens
}
