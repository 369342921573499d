//! Analysis of gene reaction rules
use crate::io::gpr_parse::{parse_gpr, GprParseError};

/// Find the size of the largest enzyme complex described by a gene reaction rule
///
/// This is the largest number of distinct genes joined by a single AND, so
/// `(b1 and b2 and b3) or b4` gives 3 and a single gene gives 1. An empty rule gives 0.
pub fn find_top_level_complex(rule: &str) -> Result<usize, GprParseError> {
    if rule.trim().is_empty() {
        return Ok(0);
    }
    Ok(parse_gpr(rule)?.complex_size())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_sizes() {
        assert_eq!(find_top_level_complex("").unwrap(), 0);
        assert_eq!(find_top_level_complex("  ").unwrap(), 0);
        assert_eq!(find_top_level_complex("b0001").unwrap(), 1);
        assert_eq!(find_top_level_complex("b0001 or b0002").unwrap(), 1);
        assert_eq!(find_top_level_complex("b0001 and b0002").unwrap(), 2);
        assert_eq!(
            find_top_level_complex("(b0001 and b0002 and b0003) or b0004").unwrap(),
            3
        );
        assert_eq!(
            find_top_level_complex("b0001 and (b0002 or b0003)").unwrap(),
            2
        );
    }

    #[test]
    fn repeated_gene_counted_once() {
        assert_eq!(find_top_level_complex("b0001 and b0001").unwrap(), 1);
    }

    #[test]
    fn malformed_rule() {
        assert!(find_top_level_complex("b0001 and").is_err());
    }
}
