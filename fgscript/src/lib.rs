pub mod error;
pub mod generator;
pub mod options;
pub mod tokenizer;

pub use error::{Arity, ErrorKind, GenerateError, TranslateError};
pub use generator::Generator;
pub use options::Options;
pub use tokenizer::tokenize;

use std::ops::Range;

/// Translate a whole FGScript source into a Flowgorithm document.
///
/// Lines are processed in order and translation stops at the first error.
/// Nothing is returned unless every block has been closed.
pub fn translate(source: &str, file_id: usize, options: &Options) -> Result<String, TranslateError> {
    let mut generator = Generator::new(*options);
    let mut line_count = 0;

    for (line_no, span, line) in source_lines(source) {
        line_count = line_no;

        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }

        generator
            .process(&tokens)
            .map_err(|error| TranslateError::new(error, line_no, span, file_id))?;
    }

    generator
        .finish()
        .map_err(|error| TranslateError::new(error, line_count, source.len()..source.len(), file_id))
}

/// Tokenize every non-blank line of `source`, keeping 1-based line numbers.
pub fn tokenize_source(source: &str) -> Vec<(usize, Vec<&str>)> {
    source_lines(source)
        .map(|(line_no, _, line)| (line_no, tokenize(line)))
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect()
}

/// Lines of `source` with their 1-based number and byte span (terminator excluded).
fn source_lines(source: &str) -> impl Iterator<Item = (usize, Range<usize>, &str)> {
    let mut offset = 0;
    source.split_inclusive('\n').enumerate().map(move |(i, raw)| {
        let start = offset;
        offset += raw.len();

        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (i + 1, start..start + line.len(), line)
    })
}
