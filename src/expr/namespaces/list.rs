use crate::expr::{lit, Expression, FunctionExpr, ListExpr, LiteralValue};

/// Methods that work on columns of lists.
pub struct ExpressionListNamespace {
    expr: Expression,
}

impl ExpressionListNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    /// Join each list of strings with `delimiter`.
    pub fn join(&self, delimiter: impl Into<Expression>) -> Expression {
        self.expr.function(FunctionExpr::List(ListExpr::Join), vec![delimiter.into()])
    }

    pub fn lengths(&self) -> Expression {
        self.expr.function(FunctionExpr::List(ListExpr::Lengths), vec![])
    }

    /// Element at `idx`, or `default` (use `LiteralValue::Null` for none) when out of bounds.
    pub fn get(&self, idx: impl Into<Expression>, default: impl Into<LiteralValue>) -> Expression {
        self.expr.function(FunctionExpr::List(ListExpr::Get), vec![idx.into(), lit(default)])
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::{col, Expr, LiteralValue};

    #[test]
    fn get_carries_default_as_literal() {
        let expr = col("tags").list().get(0, LiteralValue::Null);
        match expr.expr() {
            Expr::Function { inputs, .. } => {
                assert_eq!(inputs.len(), 3);
                assert_eq!(*inputs[2], Expr::Literal(LiteralValue::Null));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
