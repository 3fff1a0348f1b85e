use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    TrueDivide,
    Modulus,
    And,
    Or,
    Lt,
    LtEq,
    Eq,
    NotEq,
    Gt,
    GtEq,
}

impl Operator {
    pub fn is_comparison(&self) -> bool {
        matches!(self, Operator::Lt | Operator::LtEq | Operator::Eq | Operator::NotEq | Operator::Gt | Operator::GtEq)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::TrueDivide => "/",
            Operator::Modulus => "%",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
        }
    }

    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            other => other.symbol(),
        }
    }

    /// Lowercase name used in error messages.
    pub fn fn_name(&self) -> &'static str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Multiply => "multiply",
            Operator::TrueDivide => "true_divide",
            Operator::Modulus => "modulus",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Lt => "lt",
            Operator::LtEq => "lt_eq",
            Operator::Eq => "eq",
            Operator::NotEq => "not_eq",
            Operator::Gt => "gt",
            Operator::GtEq => "gt_eq",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
