/// Leading word of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Fn,
    If,
    Else,
    While,
    Do,
    For,
    End,
    Var,
    Set,
    Call,
    Print,
    Println,
    Scan,
    Comment,
}

impl Keyword {
    pub fn parse(word: &str) -> Option<Keyword> {
        let keyword = match word {
            "fn" => Keyword::Fn,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "do" => Keyword::Do,
            "for" => Keyword::For,
            "end" => Keyword::End,
            "var" => Keyword::Var,
            "set" => Keyword::Set,
            "call" => Keyword::Call,
            "print" => Keyword::Print,
            "println" => Keyword::Println,
            "scan" => Keyword::Scan,
            "#" => Keyword::Comment,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Fn => "fn",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::For => "for",
            Keyword::End => "end",
            Keyword::Var => "var",
            Keyword::Set => "set",
            Keyword::Call => "call",
            Keyword::Print => "print",
            Keyword::Println => "println",
            Keyword::Scan => "scan",
            Keyword::Comment => "#",
        }
    }

    /// Whether the statement may appear with no block open.
    pub fn allowed_at_top_level(self) -> bool {
        matches!(self, Keyword::Fn | Keyword::Comment)
    }
}
