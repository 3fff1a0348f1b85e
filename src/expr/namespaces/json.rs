use crate::expr::{Expression, FunctionExpr, JsonExpr};

pub struct ExpressionJsonNamespace {
    expr: Expression,
}

impl ExpressionJsonNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    /// Run a jq-style `query` against each JSON string.
    pub fn query(&self, query: &str) -> Expression {
        self.expr.function(FunctionExpr::Json(JsonExpr::Query(query.to_string())), vec![])
    }
}
