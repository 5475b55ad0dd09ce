//! Syntax tree for tag filters.
//!
//! A filter is a conjunction of atoms. Each atom is a tag, optionally negated
//! with `~`, so `@smoke&&~@slow` selects entities tagged `smoke` and not
//! tagged `slow`. Tags are compared without their `@`.

use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub(super) fn eval(&self, tags: &HashSet<&str>) -> bool {
        match self {
            Self::Tag(tag) => tags.contains(tag.as_str()),
            Self::Not(inner) => !inner.eval(tags),
            Self::And(lhs, rhs) => lhs.eval(tags) && rhs.eval(tags),
        }
    }
}
