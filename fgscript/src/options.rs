/// Compatibility switches for inputs written against looser revisions of
/// the notation. The default is the strict behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Accept statements other than `fn` and `#` outside of any function.
    pub allow_top_level_statements: bool,
    /// Ignore `end` when no block is open instead of failing.
    pub tolerate_unmatched_end: bool,
    /// Keep comments written outside of any block instead of dropping them.
    pub emit_top_level_comments: bool,
}

impl Options {
    /// Every compatibility switch turned on.
    pub fn lenient() -> Self {
        Options {
            allow_top_level_statements: true,
            tolerate_unmatched_end: true,
            emit_top_level_comments: true,
        }
    }
}
