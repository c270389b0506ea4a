use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Empty page range expression")]
    EmptyExpression,
    #[error("Invalid page range: {0}")]
    InvalidRange(String),
    #[error("Malformed page token: {0}")]
    MalformedToken(String),
}

/// One comma-separated token of a range expression, page numbers 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// "5": a single page
    Single(u32),
    /// "-4": from the first page through the given page
    FromStart(u32),
    /// "7-": from the given page through the end of the document
    ToEnd(u32),
    /// "2-6": a bounded inclusive interval, start <= end
    Bounded(u32, u32),
}

fn parse_page_number(s: &str, token: &str) -> Result<u32, RangeError> {
    let n: i64 = s
        .parse()
        .map_err(|_| RangeError::MalformedToken(token.to_string()))?;
    if n < 1 {
        return Err(RangeError::InvalidRange(token.to_string()));
    }
    u32::try_from(n).map_err(|_| RangeError::InvalidRange(token.to_string()))
}

fn parse_token(token: &str) -> Result<Token, RangeError> {
    // Split on the first '-' only, so "1-2-3" fails as a malformed right side
    match token.split_once('-') {
        Some(("", "")) => Err(RangeError::InvalidRange("-".to_string())),
        Some(("", end)) => Ok(Token::FromStart(parse_page_number(end, token)?)),
        Some((start, "")) => Ok(Token::ToEnd(parse_page_number(start, token)?)),
        Some((start, end)) => {
            let start = parse_page_number(start, token)?;
            let end = parse_page_number(end, token)?;
            if end < start {
                return Err(RangeError::InvalidRange(token.to_string()));
            }
            Ok(Token::Bounded(start, end))
        }
        None => Ok(Token::Single(parse_page_number(token, token)?)),
    }
}

/// Expand one token into the accumulating set of zero-based indices.
fn expand_token(
    token: &str,
    total_pages: Option<u32>,
    pages: &mut BTreeSet<u32>,
) -> Result<(), RangeError> {
    let (start, end) = match parse_token(token)? {
        Token::Single(page) => (page, page),
        Token::FromStart(end) => (1, end),
        // When the page count is unknown, an open-ended range collapses to
        // its own start page instead of failing. Callers that know the
        // document length must pass it for "to the end" to mean that.
        Token::ToEnd(start) => (start, total_pages.unwrap_or(start)),
        Token::Bounded(start, end) => (start, end),
    };
    for page in start..=end {
        pages.insert(page - 1);
    }
    Ok(())
}

fn strip_whitespace(expr: &str) -> String {
    expr.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse a page range expression like "1-3,5,7-" into a sorted, deduplicated
/// list of zero-based page indices.
///
/// Tokens are comma-separated; pages in the expression are 1-based. Empty
/// tokens from doubled or trailing commas are skipped, and whitespace is
/// ignored anywhere ("1 - 3, 5" equals "1-3,5"). `total_pages` bounds
/// open-ended tokens like "7-"; ranges reaching past the end of a shorter
/// document are not an error here; callers filter and warn.
pub fn parse_ranges(expr: &str, total_pages: Option<u32>) -> Result<Vec<u32>, RangeError> {
    let expr = strip_whitespace(expr);
    if expr.is_empty() {
        return Err(RangeError::EmptyExpression);
    }

    let mut pages = BTreeSet::new();
    for token in expr.split(',').filter(|t| !t.is_empty()) {
        expand_token(token, total_pages, &mut pages)?;
    }
    Ok(pages.into_iter().collect())
}

/// Parse an expression into one index set per comma-separated token, keeping
/// the groups apart. `split` turns each group into its own output file, so
/// "1-3,10-12" must stay two groups rather than one merged set.
pub fn parse_groups(expr: &str, total_pages: Option<u32>) -> Result<Vec<Vec<u32>>, RangeError> {
    let expr = strip_whitespace(expr);
    if expr.is_empty() {
        return Err(RangeError::EmptyExpression);
    }

    let mut groups = Vec::new();
    for token in expr.split(',').filter(|t| !t.is_empty()) {
        let mut pages = BTreeSet::new();
        expand_token(token, total_pages, &mut pages)?;
        groups.push(pages.into_iter().collect());
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        assert_eq!(parse_ranges("5", Some(10)).unwrap(), vec![4]);
    }

    #[test]
    fn test_bounded_range() {
        assert_eq!(parse_ranges("1-3", Some(10)).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_mixed_expression_with_open_end() {
        assert_eq!(
            parse_ranges("1-3,5,7-", Some(10)).unwrap(),
            vec![0, 1, 2, 4, 6, 7, 8, 9]
        );
    }

    #[test]
    fn test_open_start() {
        assert_eq!(parse_ranges("-4", None).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_open_end_without_bound_collapses() {
        // Documented fallback: without a page count, "5-" means just page 5
        assert_eq!(parse_ranges("5-", None).unwrap(), vec![4]);
    }

    #[test]
    fn test_open_end_with_bound() {
        assert_eq!(parse_ranges("5-", Some(10)).unwrap(), vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_open_end_past_document_is_empty() {
        assert_eq!(parse_ranges("7-", Some(5)).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(parse_ranges("", Some(10)), Err(RangeError::EmptyExpression));
        assert_eq!(
            parse_ranges("   ", Some(10)),
            Err(RangeError::EmptyExpression)
        );
    }

    #[test]
    fn test_bare_dash() {
        assert_eq!(
            parse_ranges("-", Some(10)),
            Err(RangeError::InvalidRange("-".to_string()))
        );
    }

    #[test]
    fn test_end_before_start() {
        assert_eq!(
            parse_ranges("3-1", Some(10)),
            Err(RangeError::InvalidRange("3-1".to_string()))
        );
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(matches!(
            parse_ranges("0", Some(10)),
            Err(RangeError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_ranges("0-3", Some(10)),
            Err(RangeError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_ranges("-0", Some(10)),
            Err(RangeError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_negative_page_rejected() {
        // "3--5" splits into "3" and "-5"; the signed parse catches it
        assert!(matches!(
            parse_ranges("3--5", Some(10)),
            Err(RangeError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_non_numeric_token() {
        assert_eq!(
            parse_ranges("abc", Some(10)),
            Err(RangeError::MalformedToken("abc".to_string()))
        );
        assert_eq!(
            parse_ranges("1-2-3", Some(10)),
            Err(RangeError::MalformedToken("1-2-3".to_string()))
        );
    }

    #[test]
    fn test_deduplication() {
        assert_eq!(parse_ranges("1,1,2-2", Some(10)).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(
            parse_ranges(" 1 - 3 , 5 ", Some(10)).unwrap(),
            parse_ranges("1-3,5", Some(10)).unwrap()
        );
    }

    #[test]
    fn test_stray_commas_skipped() {
        assert_eq!(parse_ranges("1,,2,", Some(10)).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_groups_stay_separate() {
        assert_eq!(
            parse_groups("1-3,10-12", Some(15)).unwrap(),
            vec![vec![0, 1, 2], vec![9, 10, 11]]
        );
    }

    #[test]
    fn test_groups_single_token() {
        assert_eq!(parse_groups("4", Some(10)).unwrap(), vec![vec![3]]);
    }

    #[test]
    fn test_groups_empty_expression() {
        assert_eq!(parse_groups("", Some(10)), Err(RangeError::EmptyExpression));
    }

    #[test]
    fn test_groups_propagate_token_errors() {
        assert!(parse_groups("1-3,x", Some(10)).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Result is always sorted ascending
        #[test]
        fn result_is_sorted(expr in "[0-9]{0,2}([,-][0-9]{0,2}){0,6}", total in 1u32..100) {
            if let Ok(result) = parse_ranges(&expr, Some(total)) {
                let mut sorted = result.clone();
                sorted.sort_unstable();
                prop_assert_eq!(result, sorted);
            }
        }

        /// Result never contains duplicates
        #[test]
        fn no_duplicates(expr in "[0-9]{0,2}([,-][0-9]{0,2}){0,6}", total in 1u32..100) {
            if let Ok(result) = parse_ranges(&expr, Some(total)) {
                let unique: BTreeSet<_> = result.iter().copied().collect();
                prop_assert_eq!(result.len(), unique.len());
            }
        }

        /// Token order in the expression does not affect the result
        #[test]
        fn order_independent(a in 1u32..=20, b in 1u32..=20, c in 1u32..=20) {
            let forward = parse_ranges(&format!("{},{},{}", a, b, c), Some(20)).unwrap();
            let backward = parse_ranges(&format!("{},{},{}", c, b, a), Some(20)).unwrap();
            prop_assert_eq!(forward, backward);
        }

        /// Rendering a page list back into an expression and reparsing it
        /// reproduces the original zero-based set
        #[test]
        fn render_reparse_round_trip(pages in proptest::collection::btree_set(1u32..=50, 1..12)) {
            let expr = pages
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let expected: Vec<u32> = pages.iter().map(|p| p - 1).collect();
            prop_assert_eq!(parse_ranges(&expr, Some(50)).unwrap(), expected);
        }

        /// The whole-expression set equals the union of the per-group sets
        #[test]
        fn groups_union_matches(expr in "[0-9]{0,2}([,-][0-9]{0,2}){0,6}", total in 1u32..100) {
            if let (Ok(whole), Ok(groups)) = (
                parse_ranges(&expr, Some(total)),
                parse_groups(&expr, Some(total)),
            ) {
                let union: BTreeSet<u32> = groups.into_iter().flatten().collect();
                let union: Vec<u32> = union.into_iter().collect();
                prop_assert_eq!(whole, union);
            }
        }
    }
}
