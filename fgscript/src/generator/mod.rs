//! Statement-driven markup generator.
//!
//! Each call to [`Generator::process`] translates one tokenized line into a
//! markup fragment. Constructs that span several lines push an [`OpenBlock`]
//! that renders their closing markup when the matching `end` arrives.

pub mod block;
pub mod keyword;

pub use block::OpenBlock;
pub use keyword::Keyword;

use crate::error::{Arity, GenerateError};
use crate::options::Options;
use crate::tokenizer::tokenize;

const HEADER: &str = "<?xml version=\"1.0\"?><flowgorithm fileversion=\"4.2\">";
const FOOTER: &str = "</flowgorithm>\n";

/// Accumulates the document for one translation unit.
#[derive(Debug, Clone)]
pub struct Generator {
    out: String,
    stack: Vec<OpenBlock>,
    options: Options,
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(Options::default())
    }
}

impl Generator {
    /// Start a new document. The header is written immediately.
    pub fn new(options: Options) -> Self {
        Generator {
            out: HEADER.to_string(),
            stack: Vec::new(),
            options,
        }
    }

    /// Markup written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn is_top_level(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of blocks still waiting for `end`.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Close the document. Fails if any block is still open.
    pub fn finish(mut self) -> Result<String, GenerateError> {
        if let Some(innermost) = self.stack.last() {
            return Err(GenerateError::UnclosedBlocks {
                innermost: innermost.name(),
                open: self.stack.len(),
            });
        }

        self.out.push_str(FOOTER);
        Ok(self.out)
    }

    /// Translate one tokenized statement.
    ///
    /// On error neither the output nor the block stack is modified.
    pub fn process(&mut self, tokens: &[&str]) -> Result<(), GenerateError> {
        let (&word, args) = tokens.split_first().ok_or(GenerateError::EmptyStatement)?;
        let keyword = Keyword::parse(word);

        // `end` reports its own, more precise, error on an empty stack.
        let permitted = match keyword {
            Some(Keyword::End) => true,
            Some(keyword) => keyword.allowed_at_top_level(),
            None => false,
        };
        if self.is_top_level() && !permitted && !self.options.allow_top_level_statements {
            return Err(GenerateError::OutsideFunction {
                keyword: word.to_string(),
            });
        }

        let keyword = keyword.ok_or_else(|| GenerateError::UnknownCommand(word.to_string()))?;

        match keyword {
            Keyword::Fn => self.function(args),
            Keyword::If => self.if_statement(args),
            Keyword::Else => self.else_statement(args),
            Keyword::While => self.while_loop(args),
            Keyword::Do => self.do_loop(args),
            Keyword::For => self.for_loop(args),
            Keyword::End => self.end(args),
            Keyword::Var => self.declaration(args),
            Keyword::Set => self.assignment(args),
            Keyword::Call => self.call(args),
            Keyword::Print => self.output(Keyword::Print, args, false),
            Keyword::Println => self.output(Keyword::Println, args, true),
            Keyword::Scan => self.input(args),
            Keyword::Comment => self.comment(args),
        }
    }

    // -----------------------------------------------------------------------
    // Blocks
    // -----------------------------------------------------------------------

    fn function(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        let &[name, params, return_var, return_type] = args else {
            return Err(arity(Keyword::Fn, Arity::Exactly(4), args));
        };

        if !self.is_top_level() {
            return Err(GenerateError::NestedFunction {
                name: name.to_string(),
            });
        }

        let malformed = || GenerateError::MalformedParameters {
            function: name.to_string(),
        };
        let inner = params
            .strip_prefix('(')
            .and_then(|p| p.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let params = tokenize(inner);
        if params.len() % 2 != 0 {
            return Err(malformed());
        }

        let return_var = if return_var == "_" { "" } else { return_var };

        self.out.push_str(&format!(
            "<function name=\"{}\" type=\"{}\" variable=\"{}\">",
            name, return_type, return_var
        ));

        if params.is_empty() {
            self.out.push_str("<parameters/>");
        } else {
            self.out.push_str("<parameters>");
            for pair in params.chunks_exact(2) {
                self.out.push_str(&format!(
                    "<parameter name=\"{}\" type=\"{}\" array=\"False\"/>",
                    pair[0], pair[1]
                ));
            }
            self.out.push_str("</parameters>");
        }
        self.out.push_str("<body>");

        self.stack.push(OpenBlock::Function);
        Ok(())
    }

    fn if_statement(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        require_expression(Keyword::If, args)?;
        self.open_if(args);
        self.stack.push(OpenBlock::IfPendingElse { chained: 0 });
        Ok(())
    }

    fn open_if(&mut self, condition: &[&str]) {
        self.out.push_str(&format!(
            "<if expression=\"{}\"><then>",
            condition.join(" ")
        ));
    }

    fn else_statement(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        let chained = match self.stack.last() {
            Some(OpenBlock::IfPendingElse { chained }) => *chained,
            _ => return Err(GenerateError::ElseWithoutIf),
        };

        let replacement = match args {
            [] => {
                self.out.push_str("</then><else>");
                OpenBlock::IfResolved { chained }
            }
            [first, condition @ ..] if *first == "if" => {
                require_expression(Keyword::If, condition)?;
                self.out.push_str("</then><else>");
                self.open_if(condition);
                OpenBlock::IfPendingElse {
                    chained: chained + 1,
                }
            }
            _ => return Err(GenerateError::ElseArguments { found: args.len() }),
        };

        if let Some(top) = self.stack.last_mut() {
            *top = replacement;
        }
        Ok(())
    }

    fn while_loop(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        require_expression(Keyword::While, args)?;
        self.out
            .push_str(&format!("<while expression=\"{}\">", args.join(" ")));
        self.stack.push(OpenBlock::While);
        Ok(())
    }

    fn do_loop(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        require_expression(Keyword::Do, args)?;
        self.out
            .push_str(&format!("<do expression=\"{}\">", args.join(" ")));
        self.stack.push(OpenBlock::Do);
        Ok(())
    }

    /// `for [backward] <var> from <expr> to <expr> step <expr>`
    fn for_loop(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        if args.len() < 7 {
            return Err(arity(Keyword::For, Arity::AtLeast(7), args));
        }

        let (direction, rest) = match args {
            ["backward", rest @ ..] => ("dec", rest),
            _ => ("inc", args),
        };

        let [variable, "from", rest @ ..] = rest else {
            return Err(missing_delimiter("from"));
        };

        let (start, rest) = split_at_delimiter(rest, "to")?;
        let (end, step) = split_at_delimiter(rest, "step")?;

        self.out.push_str(&format!(
            "<for variable=\"{}\" start=\"{}\" end=\"{}\" direction=\"{}\" step=\"{}\">",
            variable,
            start.join(" "),
            end.join(" "),
            direction,
            step.join(" ")
        ));
        self.stack.push(OpenBlock::For);
        Ok(())
    }

    fn end(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        if !args.is_empty() {
            return Err(arity(Keyword::End, Arity::Exactly(0), args));
        }

        match self.stack.pop() {
            Some(block) => block.write_close(&mut self.out),
            None if self.options.tolerate_unmatched_end => {}
            None => return Err(GenerateError::UnexpectedEnd),
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Simple statements
    // -----------------------------------------------------------------------

    fn declaration(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        let Some((ty, names)) = args.split_last().filter(|(_, names)| !names.is_empty()) else {
            return Err(arity(Keyword::Var, Arity::AtLeast(2), args));
        };

        self.out.push_str(&format!(
            "<declare name=\"{}\" type=\"{}\" array=\"False\" size=\"\"/>",
            names.join(", "),
            ty
        ));
        Ok(())
    }

    fn assignment(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        let [variable, expression @ ..] = args else {
            return Err(arity(Keyword::Set, Arity::AtLeast(2), args));
        };
        if expression.is_empty() {
            return Err(arity(Keyword::Set, Arity::AtLeast(2), args));
        }

        self.out.push_str(&format!(
            "<assign variable=\"{}\" expression=\"{}\"/>",
            variable,
            expression.join(" ")
        ));
        Ok(())
    }

    fn call(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        at_least(Keyword::Call, args, 1)?;
        self.out
            .push_str(&format!("<call expression=\"{}\"/>", args.join(" ")));
        Ok(())
    }

    fn output(&mut self, keyword: Keyword, args: &[&str], newline: bool) -> Result<(), GenerateError> {
        at_least(keyword, args, 1)?;

        let expression = args.join(" &amp; ").replace('"', "&quot;");
        let newline = if newline { "True" } else { "False" };

        self.out.push_str(&format!(
            "<output expression=\"{}\" newline=\"{}\"/>",
            expression, newline
        ));
        Ok(())
    }

    fn input(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        let &[variable] = args else {
            return Err(arity(Keyword::Scan, Arity::Exactly(1), args));
        };

        self.out
            .push_str(&format!("<input variable=\"{}\"/>", variable));
        Ok(())
    }

    fn comment(&mut self, args: &[&str]) -> Result<(), GenerateError> {
        at_least(Keyword::Comment, args, 1)?;

        if self.is_top_level() && !self.options.emit_top_level_comments {
            return Ok(());
        }

        self.out
            .push_str(&format!("<comment text=\"{}\"/>", args.join(" ")));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn arity(keyword: Keyword, expected: Arity, args: &[&str]) -> GenerateError {
    GenerateError::ArgumentCount {
        keyword: keyword.as_str(),
        expected,
        found: args.len(),
    }
}

fn at_least(keyword: Keyword, args: &[&str], n: usize) -> Result<(), GenerateError> {
    if args.len() < n {
        return Err(arity(keyword, Arity::AtLeast(n), args));
    }
    Ok(())
}

fn require_expression(keyword: Keyword, args: &[&str]) -> Result<(), GenerateError> {
    if args.is_empty() {
        return Err(GenerateError::MissingExpression {
            keyword: keyword.as_str(),
        });
    }
    Ok(())
}

fn missing_delimiter(delimiter: &'static str) -> GenerateError {
    GenerateError::MissingDelimiter {
        keyword: Keyword::For.as_str(),
        delimiter,
    }
}

/// Split `tokens` around the first `delimiter`, which must be followed by
/// at least one more token.
fn split_at_delimiter<'a, 'b>(
    tokens: &'b [&'a str],
    delimiter: &'static str,
) -> Result<(&'b [&'a str], &'b [&'a str]), GenerateError> {
    let at = tokens
        .iter()
        .position(|t| *t == delimiter)
        .filter(|&i| i + 1 < tokens.len())
        .ok_or_else(|| missing_delimiter(delimiter))?;

    Ok((&tokens[..at], &tokens[at + 1..]))
}
