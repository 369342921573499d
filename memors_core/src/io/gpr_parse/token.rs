//! Tokens produced by the GPR lexer

/// Token of a gene reaction rule
///
/// Operators are case-insensitive words (`and`, `or`, `not`), `&`/`&&` and `|`/`||` lex to
/// the same tokens as their word forms.
#[derive(Debug, PartialEq, Clone, Eq)]
pub enum Token {
    /// Gene identifier, e.g. `b0001` or `HGNC:1234`
    Identifier(String),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    /// Marks the end of the rule, always the last token
    Eof,
}
