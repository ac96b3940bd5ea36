//! Comparison expression lexer and lookup statement builder.
//!
//! An expression is `<column> <operator> <literal>`, where the operator is one
//! contiguous run of `<`, `>` and `=` characters: `CMD = RD`, `TIME>9`,
//! `TIME >= 10`. The literal is always bound as text.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static OPERATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>=]+").expect("operator regex"));

/// A parsed comparison with its source spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub column: String,
    pub operator: String,
    pub value: String,
    pub left: Range<usize>,
    pub operator_span: Range<usize>,
    pub right: Range<usize>,
}

/// A parameterized lookup statement and the single value it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub statement: String,
    pub value: String,
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Split an expression into column, operator and literal.
///
/// Exactly one operator run is accepted; `TIME>9 AND CMD=RD` is rejected
/// rather than guessed at.
pub fn parse(expression: &str) -> Result<Comparison> {
    let mut runs = OPERATOR_RUN.find_iter(expression);
    let op = runs.next().ok_or_else(|| {
        Error::expression(format!("no comparison operator in {:?}", expression))
    })?;
    if let Some(extra) = runs.next() {
        return Err(Error::expression(format!(
            "more than one comparison in {:?} (second operator '{}' at {})",
            expression,
            extra.as_str(),
            extra.start()
        )));
    }

    let column = strip_whitespace(&expression[..op.start()]);
    if column.is_empty() {
        return Err(Error::expression(format!(
            "missing column before '{}' in {:?}",
            op.as_str(),
            expression
        )));
    }
    let value = strip_whitespace(&expression[op.end()..]);
    if value.is_empty() {
        return Err(Error::expression(format!(
            "missing value after '{}' in {:?}",
            op.as_str(),
            expression
        )));
    }

    Ok(Comparison {
        column,
        operator: op.as_str().to_string(),
        value,
        left: 0..op.start(),
        operator_span: op.range(),
        right: op.end()..expression.len(),
    })
}

impl Comparison {
    /// `SELECT * FROM <table> WHERE <column><operator>?`
    pub fn to_lookup(&self, table: &str) -> Lookup {
        Lookup {
            statement: format!(
                "SELECT * FROM {} WHERE {}{}?",
                table, self.column, self.operator
            ),
            value: self.value.clone(),
        }
    }
}

/// Parse `expression` and build the lookup statement against `table`.
pub fn translate(expression: &str, table: &str) -> Result<Lookup> {
    Ok(parse(expression)?.to_lookup(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_spaced_expression() {
        let lookup = translate("CMD = RD", "t").unwrap();
        assert_eq!(lookup.statement, "SELECT * FROM t WHERE CMD=?");
        assert_eq!(lookup.value, "RD");
    }

    #[test]
    fn test_translate_unspaced_expression() {
        let lookup = translate("TIME>9", "t").unwrap();
        assert_eq!(lookup.statement, "SELECT * FROM t WHERE TIME>?");
        assert_eq!(lookup.value, "9");
    }

    #[test]
    fn test_compound_operators_are_one_run() {
        for (expr, op) in [("a >= 1", ">="), ("a<=1", "<="), ("a <> x", "<>"), ("a==1", "==")] {
            let cmp = parse(expr).unwrap();
            assert_eq!(cmp.operator, op, "{expr}");
            assert_eq!(cmp.column, "a");
        }
    }

    #[test]
    fn test_spans() {
        let cmp = parse("CMD = RD").unwrap();
        assert_eq!(cmp.left, 0..4);
        assert_eq!(cmp.operator_span, 4..5);
        assert_eq!(cmp.right, 5..8);
    }

    #[test]
    fn test_internal_whitespace_removed() {
        let cmp = parse("  AD DR =  0x 1 ").unwrap();
        assert_eq!(cmp.column, "ADDR");
        assert_eq!(cmp.value, "0x1");
    }

    #[test]
    fn test_no_operator() {
        let err = parse("CMD RD").unwrap_err();
        assert!(matches!(err, Error::MalformedExpression(_)));
    }

    #[test]
    fn test_multiple_operators_rejected() {
        assert!(matches!(
            parse("TIME>9 AND CMD=RD"),
            Err(Error::MalformedExpression(_))
        ));
        assert!(parse("1 < TIME < 9").is_err());
    }

    #[test]
    fn test_missing_fragments() {
        assert!(parse("= RD").is_err());
        assert!(parse("CMD =   ").is_err());
        assert!(parse("").is_err());
    }
}
