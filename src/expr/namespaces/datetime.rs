use crate::expr::{Expression, FunctionExpr, TemporalExpr};

/// Methods that work on columns of dates and timestamps.
pub struct ExpressionDatetimeNamespace {
    expr: Expression,
}

impl ExpressionDatetimeNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    fn temporal(&self, func: TemporalExpr) -> Expression {
        self.expr.function(FunctionExpr::Temporal(func), vec![])
    }

    pub fn date(&self) -> Expression {
        self.temporal(TemporalExpr::Date)
    }

    pub fn day(&self) -> Expression {
        self.temporal(TemporalExpr::Day)
    }

    pub fn hour(&self) -> Expression {
        self.temporal(TemporalExpr::Hour)
    }

    pub fn month(&self) -> Expression {
        self.temporal(TemporalExpr::Month)
    }

    pub fn year(&self) -> Expression {
        self.temporal(TemporalExpr::Year)
    }

    /// Monday is 0, Sunday is 6.
    pub fn day_of_week(&self) -> Expression {
        self.temporal(TemporalExpr::DayOfWeek)
    }
}
