//! Module for parsing Gene Protein Reaction strings into AST values

use crate::io::gpr_parse::lexer::LexerError;
use crate::io::gpr_parse::parser::ParseError;
use crate::metabolic_model::model::Gpr;
use thiserror::Error;

mod lexer;
pub mod parser;
mod token;

/// Parse a Gene Protein Reaction string into a GPR Tree
///
/// # Parameters
/// - `input`: &str representing the gene protein reaction rule
///
/// # Returns
/// Parse result which is
/// - `Ok`: The root node of the GPR tree
/// - `Err`: Returns the GprParseError describing the issue with the GPR rule which
///     was being parsed.
///
/// # Examples
/// ```rust
/// use memors_core::io::gpr_parse::parse_gpr;
/// let gpr: &str = "Rv0001 and Rv0002";
/// let gpr_tree = parse_gpr(gpr).unwrap();
/// assert_eq!(gpr_tree.genes().len(), 2);
/// ```
pub fn parse_gpr(input: &str) -> Result<Gpr, GprParseError> {
    // Start by creating a lexer
    let mut lexer = lexer::Lexer::new(input);
    // Convert the GPR string into tokens
    let tokens = lexer.lex()?;

    // Now parse those tokens into a GPR tree
    let mut parser = parser::GPRParser::new(tokens);
    let gpr = parser.parse()?;
    Ok(gpr)
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GprParseError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of GPR string to tokens): {0}")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("Error occurred during parsing (conversion of tokens to GPR tree): {0}")]
    ParsingError(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use crate::io::gpr_parse::{parse_gpr, GprParseError};
    use crate::metabolic_model::model::{Gpr, GprOperation};

    #[test]
    fn test_parse_gpr() {
        let gpr_tree = parse_gpr("Rv0001 and (Rv0002 or Rv0003)").unwrap();
        let expected = Gpr::Operation(GprOperation::And {
            left: Box::new(Gpr::new_gene_node("Rv0001")),
            right: Box::new(Gpr::Operation(GprOperation::Or {
                left: Box::new(Gpr::new_gene_node("Rv0002")),
                right: Box::new(Gpr::new_gene_node("Rv0003")),
            })),
        });
        assert_eq!(gpr_tree, expected);
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            parse_gpr("Rv0001 + Rv0002"),
            Err(GprParseError::LexingError(_))
        ));
        assert!(matches!(
            parse_gpr("Rv0001 and"),
            Err(GprParseError::ParsingError(_))
        ));
    }
}
