use crate::expr::{Expression, FunctionExpr, StructExpr};

pub struct ExpressionStructNamespace {
    expr: Expression,
}

impl ExpressionStructNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    /// The field `name` of each struct; the result is named after the field.
    pub fn get(&self, name: impl Into<String>) -> Expression {
        self.expr.function(FunctionExpr::Struct(StructExpr::Get(name.into())), vec![])
    }
}
