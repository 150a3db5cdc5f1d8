/// A block still waiting for its `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenBlock {
    Function,
    /// `if` (or `else if`) whose else-branch has not been opened yet.
    /// `chained` is the number of enclosing `else if` levels closed by the
    /// same `end`.
    IfPendingElse { chained: usize },
    /// `if` whose plain `else` branch is open.
    IfResolved { chained: usize },
    While,
    Do,
    For,
}

const CLOSE_ELSE: &str = "</else></if>";

impl OpenBlock {
    /// Append the closing markup for this block to `out`.
    pub fn write_close(self, out: &mut String) {
        let chained = match self {
            OpenBlock::Function => {
                out.push_str("</body></function>");
                return;
            }
            OpenBlock::IfPendingElse { chained } => {
                out.push_str("</then><else/></if>");
                chained
            }
            OpenBlock::IfResolved { chained } => {
                out.push_str(CLOSE_ELSE);
                chained
            }
            OpenBlock::While => {
                out.push_str("</while>");
                return;
            }
            OpenBlock::Do => {
                out.push_str("</do>");
                return;
            }
            OpenBlock::For => {
                out.push_str("</for>");
                return;
            }
        };

        for _ in 0..chained {
            out.push_str(CLOSE_ELSE);
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpenBlock::Function => "function",
            OpenBlock::IfPendingElse { .. } | OpenBlock::IfResolved { .. } => "if",
            OpenBlock::While => "while",
            OpenBlock::Do => "do",
            OpenBlock::For => "for",
        }
    }
}
