use crate::expr::{Expression, FloatExpr, FunctionExpr};

pub struct ExpressionFloatNamespace {
    expr: Expression,
}

impl ExpressionFloatNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    /// Whether each value is NaN. Nulls stay null.
    pub fn is_nan(&self) -> Expression {
        self.expr.function(FunctionExpr::Float(FloatExpr::IsNan), vec![])
    }
}
