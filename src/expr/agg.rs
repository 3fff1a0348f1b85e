use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::expr::ExprRef;

/// Which values `count` counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountMode {
    /// Every row.
    All,
    /// Non-null rows (default).
    #[default]
    Valid,
    /// Null rows.
    Null,
}

impl Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CountMode::All => "All",
            CountMode::Valid => "Valid",
            CountMode::Null => "Null",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggExpr {
    Count(ExprRef, CountMode),
    Sum(ExprRef),
    Mean(ExprRef),
    Min(ExprRef),
    Max(ExprRef),
    AnyValue(ExprRef, bool),
    List(ExprRef),
    Concat(ExprRef),
}

impl AggExpr {
    pub fn child(&self) -> &ExprRef {
        match self {
            AggExpr::Count(child, _)
            | AggExpr::Sum(child)
            | AggExpr::Mean(child)
            | AggExpr::Min(child)
            | AggExpr::Max(child)
            | AggExpr::AnyValue(child, _)
            | AggExpr::List(child)
            | AggExpr::Concat(child) => child,
        }
    }

    pub fn fn_name(&self) -> &'static str {
        match self {
            AggExpr::Count(..) => "count",
            AggExpr::Sum(_) => "sum",
            AggExpr::Mean(_) => "mean",
            AggExpr::Min(_) => "min",
            AggExpr::Max(_) => "max",
            AggExpr::AnyValue(..) => "any_value",
            AggExpr::List(_) => "list",
            AggExpr::Concat(_) => "concat",
        }
    }
}

impl Display for AggExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggExpr::Count(child, mode) => write!(f, "count({child}, {mode})"),
            AggExpr::AnyValue(child, ignore_nulls) => write!(f, "any_value({child}, ignore_nulls={ignore_nulls})"),
            other => write!(f, "{}({})", other.fn_name(), other.child()),
        }
    }
}
