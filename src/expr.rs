//! Formula parsing and variable extraction
//!
//! Formulas are integer arithmetic over identifiers: `+ - * /` with standard
//! precedence, integer literals, unary minus, and parentheses. Parsing uses
//! the cel-parser crate and then narrows the accepted tree to that subset,
//! so anything CEL allows beyond it (strings, floats, comparisons, calls)
//! fails like any other malformed formula.
//!
//! The tree is ephemeral: it exists to validate the text and to extract the
//! variable binding order. Emission embeds the original formula text
//! verbatim, never a re-rendered tree.

use crate::error::{Error, Result};

pub use cel_parser::Expression as FormulaExpr;
use cel_parser::{parse, ArithmeticOp, Atom, UnaryOp};

/// Formula parser and variable extractor
pub struct FormulaParser;

impl FormulaParser {
    /// Parse formula text to an expression tree, rejecting anything outside
    /// the integer arithmetic subset.
    pub fn parse(formula: &str) -> Result<FormulaExpr> {
        let expr = parse(formula).map_err(|e| Error::Parse {
            formula: formula.to_string(),
            reason: format!("{:?}", e),
        })?;
        Self::check_arithmetic(&expr).map_err(|reason| Error::Parse {
            formula: formula.to_string(),
            reason,
        })?;
        Ok(expr)
    }

    /// Check whether a string is a well-formed formula
    pub fn is_valid(formula: &str) -> bool {
        Self::parse(formula).is_ok()
    }

    /// Extract the distinct variables of a formula, in first-seen order.
    ///
    /// The generated function binds its argument at position `i` to the
    /// `i`-th entry of this list, so the order is part of the call contract
    /// and must stay reproducible for identical text.
    pub fn extract_variables(formula: &str) -> Result<Vec<String>> {
        let expr = Self::parse(formula)?;
        Ok(Self::variables_of(&expr))
    }

    /// Distinct identifier leaves of an already-parsed tree, in first-seen
    /// order.
    pub fn variables_of(expr: &FormulaExpr) -> Vec<String> {
        let mut vars = Vec::new();
        Self::collect_variables(expr, &mut vars);
        vars
    }

    /// Recursively collect identifier leaves, left subtree before right.
    /// Never sorted: position in `vars` is the argument binding position.
    fn collect_variables(expr: &FormulaExpr, vars: &mut Vec<String>) {
        match expr {
            FormulaExpr::Ident(name) => {
                if !vars.iter().any(|v| v == name.as_str()) {
                    vars.push(name.to_string());
                }
            }
            FormulaExpr::Arithmetic(left, _, right) => {
                Self::collect_variables(left, vars);
                Self::collect_variables(right, vars);
            }
            FormulaExpr::Unary(_, inner) => {
                Self::collect_variables(inner, vars);
            }
            // check_arithmetic has already rejected every other variant
            _ => {}
        }
    }

    /// Validate that a parsed tree stays within the formula grammar.
    fn check_arithmetic(expr: &FormulaExpr) -> std::result::Result<(), String> {
        match expr {
            FormulaExpr::Ident(_) => Ok(()),
            FormulaExpr::Atom(Atom::Int(_)) => Ok(()),
            FormulaExpr::Atom(atom) => Err(format!(
                "{} is not allowed, formulas are integer arithmetic",
                Self::describe_atom(atom)
            )),
            FormulaExpr::Arithmetic(left, op, right) => {
                if matches!(op, ArithmeticOp::Modulus) {
                    return Err("operator % is not supported".to_string());
                }
                Self::check_arithmetic(left)?;
                Self::check_arithmetic(right)
            }
            FormulaExpr::Unary(UnaryOp::Minus, inner) => Self::check_arithmetic(inner),
            FormulaExpr::Unary(_, _) => Err("only unary minus is supported".to_string()),
            other => Err(format!("{} is not allowed", Self::describe_construct(other))),
        }
    }

    fn describe_atom(atom: &Atom) -> &'static str {
        match atom {
            Atom::Int(_) => "integer literal",
            Atom::UInt(_) => "unsigned literal suffix",
            Atom::Float(_) => "float literal",
            Atom::String(_) => "string literal",
            Atom::Bytes(_) => "bytes literal",
            Atom::Bool(_) => "boolean literal",
            Atom::Null => "null literal",
        }
    }

    fn describe_construct(expr: &FormulaExpr) -> &'static str {
        match expr {
            FormulaExpr::Relation(_, _, _) => "comparison operator",
            FormulaExpr::And(_, _) | FormulaExpr::Or(_, _) => "boolean operator",
            FormulaExpr::Ternary(_, _, _) => "ternary conditional",
            FormulaExpr::Member(_, _) => "member access or function call",
            FormulaExpr::List(_) => "list literal",
            FormulaExpr::Map(_) => "map literal",
            _ => "construct",
        }
    }
}
