use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    analyzer::TypeInference,
    expr::{
        AggExpr, CountMode, Expr, ExprRef, FunctionExpr, LiteralValue, NumericExpr, Operator,
        ExpressionDatetimeNamespace, ExpressionFloatNamespace, ExpressionImageNamespace, ExpressionJsonNamespace,
        ExpressionListNamespace, ExpressionPartitioningNamespace, ExpressionStringNamespace,
        ExpressionStructNamespace, ExpressionUrlNamespace,
    },
    schema::{DataType, Field, Schema},
    ExprResult,
};

/// A symbolic, not-yet-evaluated computation over columns.
///
/// `Expression` is a cheap handle over a shared [`Expr`] tree. Equality and
/// hashing are structural, so two independently built `col("a") + 1` compare
/// equal.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression {
    expr: ExprRef,
}

/// Reference a column by name.
pub fn col(name: impl Into<String>) -> Expression {
    Expression::from_expr(Expr::Column(name.into()))
}

/// An expression with every value set to `value`.
pub fn lit(value: impl Into<LiteralValue>) -> Expression {
    Expression::from_expr(Expr::Literal(value.into()))
}

/// Decimal literal from sign, digits and base-10 exponent.
pub fn lit_decimal(negative: bool, digits: &[u8], exponent: i32) -> ExprResult<Expression> {
    Ok(lit(LiteralValue::decimal(negative, digits, exponent)?))
}

/// A literal column of values.
pub fn lit_series<T: Into<LiteralValue>>(values: impl IntoIterator<Item = T>) -> ExprResult<Expression> {
    let values = values.into_iter().map(Into::into).collect();
    Ok(lit(LiteralValue::series(values)?))
}

#[allow(clippy::should_implement_trait)]
impl Expression {
    pub fn from_expr(expr: Expr) -> Self {
        Self { expr: Arc::new(expr) }
    }

    pub fn from_ref(expr: ExprRef) -> Self {
        Self { expr }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn to_ref(&self) -> ExprRef {
        Arc::clone(&self.expr)
    }

    /// A user function registered with the engine, applied to `inputs`.
    pub fn udf(name: impl Into<String>, inputs: Vec<Expression>, return_dtype: DataType) -> Expression {
        Expression::from_expr(Expr::Udf {
            name: name.into(),
            inputs: inputs.into_iter().map(|e| e.expr).collect(),
            return_dtype,
        })
    }

    pub(crate) fn binary(&self, op: Operator, other: impl Into<Expression>) -> Expression {
        Expression::from_expr(Expr::BinaryOp { op, left: self.to_ref(), right: other.into().expr })
    }

    pub(crate) fn rbinary(&self, op: Operator, other: impl Into<Expression>) -> Expression {
        Expression::from_expr(Expr::BinaryOp { op, left: other.into().expr, right: self.to_ref() })
    }

    /// Apply `func` with `self` as the first input.
    pub(crate) fn function(&self, func: FunctionExpr, others: Vec<Expression>) -> Expression {
        let mut inputs = Vec::with_capacity(others.len() + 1);
        inputs.push(self.to_ref());
        inputs.extend(others.into_iter().map(|e| e.expr));
        Expression::from_expr(Expr::Function { func, inputs })
    }

    fn agg(&self, build: impl FnOnce(ExprRef) -> AggExpr) -> Expression {
        Expression::from_expr(Expr::Agg(build(self.to_ref())))
    }

    // ---- namespaces ----

    /// Methods that work on columns of strings.
    pub fn str(&self) -> ExpressionStringNamespace {
        ExpressionStringNamespace::from_expression(self)
    }

    /// Methods that work on columns of dates and timestamps.
    pub fn dt(&self) -> ExpressionDatetimeNamespace {
        ExpressionDatetimeNamespace::from_expression(self)
    }

    pub fn float(&self) -> ExpressionFloatNamespace {
        ExpressionFloatNamespace::from_expression(self)
    }

    pub fn url(&self) -> ExpressionUrlNamespace {
        ExpressionUrlNamespace::from_expression(self)
    }

    pub fn list(&self) -> ExpressionListNamespace {
        ExpressionListNamespace::from_expression(self)
    }

    pub fn struct_(&self) -> ExpressionStructNamespace {
        ExpressionStructNamespace::from_expression(self)
    }

    pub fn image(&self) -> ExpressionImageNamespace {
        ExpressionImageNamespace::from_expression(self)
    }

    /// Transforms used to derive partition values.
    pub fn partitioning(&self) -> ExpressionPartitioningNamespace {
        ExpressionPartitioningNamespace::from_expression(self)
    }

    pub fn json(&self) -> ExpressionJsonNamespace {
        ExpressionJsonNamespace::from_expression(self)
    }

    // ---- comparisons ----

    pub fn lt(&self, other: impl Into<Expression>) -> Expression {
        self.binary(Operator::Lt, other)
    }

    pub fn lt_eq(&self, other: impl Into<Expression>) -> Expression {
        self.binary(Operator::LtEq, other)
    }

    pub fn eq(&self, other: impl Into<Expression>) -> Expression {
        self.binary(Operator::Eq, other)
    }

    pub fn not_eq(&self, other: impl Into<Expression>) -> Expression {
        self.binary(Operator::NotEq, other)
    }

    pub fn gt(&self, other: impl Into<Expression>) -> Expression {
        self.binary(Operator::Gt, other)
    }

    pub fn gt_eq(&self, other: impl Into<Expression>) -> Expression {
        self.binary(Operator::GtEq, other)
    }

    // ---- scalar methods ----

    /// Rename the output column. Later expressions refer to the result by this name.
    pub fn alias(&self, name: impl Into<String>) -> Expression {
        Expression::from_expr(Expr::Alias(self.to_ref(), name.into()))
    }

    /// Cast to `dtype`; validity is checked when the expression is resolved.
    pub fn cast(&self, dtype: DataType) -> Expression {
        Expression::from_expr(Expr::Cast(self.to_ref(), dtype))
    }

    pub fn abs(&self) -> Expression {
        self.function(FunctionExpr::Numeric(NumericExpr::Abs), vec![])
    }

    pub fn ceil(&self) -> Expression {
        self.function(FunctionExpr::Numeric(NumericExpr::Ceil), vec![])
    }

    pub fn floor(&self) -> Expression {
        self.function(FunctionExpr::Numeric(NumericExpr::Floor), vec![])
    }

    pub fn sign(&self) -> Expression {
        self.function(FunctionExpr::Numeric(NumericExpr::Sign), vec![])
    }

    pub fn round(&self, decimals: u32) -> Expression {
        self.function(FunctionExpr::Numeric(NumericExpr::Round(decimals)), vec![])
    }

    pub fn is_null(&self) -> Expression {
        Expression::from_expr(Expr::IsNull(self.to_ref()))
    }

    pub fn not_null(&self) -> Expression {
        Expression::from_expr(Expr::NotNull(self.to_ref()))
    }

    /// Membership test against another expression (usually a series literal).
    pub fn is_in(&self, items: impl Into<Expression>) -> Expression {
        Expression::from_expr(Expr::IsIn(self.to_ref(), items.into().expr))
    }

    /// Membership test against a list of values; fails if the values have no common type.
    pub fn is_in_values<T: Into<LiteralValue>>(&self, values: impl IntoIterator<Item = T>) -> ExprResult<Expression> {
        Ok(self.is_in(lit_series(values)?))
    }

    /// Choose between `if_true` and `if_false` using `self` as the condition.
    pub fn if_else(&self, if_true: impl Into<Expression>, if_false: impl Into<Expression>) -> Expression {
        Expression::from_expr(Expr::IfElse {
            if_true: if_true.into().expr,
            if_false: if_false.into().expr,
            predicate: self.to_ref(),
        })
    }

    /// Apply a registered per-value function to this expression.
    pub fn apply(&self, name: impl Into<String>, return_dtype: DataType) -> Expression {
        Expression::udf(name, vec![self.clone()], return_dtype)
    }

    /// One row per list element.
    pub fn explode(&self) -> Expression {
        Expression::from_expr(Expr::Explode(self.to_ref()))
    }

    // ---- aggregations ----

    pub fn count(&self, mode: CountMode) -> Expression {
        self.agg(|e| AggExpr::Count(e, mode))
    }

    pub fn sum(&self) -> Expression {
        self.agg(AggExpr::Sum)
    }

    pub fn mean(&self) -> Expression {
        self.agg(AggExpr::Mean)
    }

    pub fn min(&self) -> Expression {
        self.agg(AggExpr::Min)
    }

    pub fn max(&self) -> Expression {
        self.agg(AggExpr::Max)
    }

    pub fn any_value(&self, ignore_nulls: bool) -> Expression {
        self.agg(|e| AggExpr::AnyValue(e, ignore_nulls))
    }

    pub fn agg_list(&self) -> Expression {
        self.agg(AggExpr::List)
    }

    pub fn agg_concat(&self) -> Expression {
        self.agg(AggExpr::Concat)
    }

    // ---- introspection ----

    pub fn name(&self) -> &str {
        self.expr.name()
    }

    pub fn required_columns(&self) -> IndexSet<String> {
        self.expr.required_columns()
    }

    pub fn input_mapping(&self) -> Option<String> {
        self.expr.input_mapping()
    }

    pub fn is_column(&self) -> bool {
        self.expr.is_column()
    }

    /// Output field of this expression when applied to `schema`.
    pub fn to_field(&self, schema: &Schema) -> ExprResult<Field> {
        TypeInference::infer_field(&self.expr, schema)
    }

    pub fn to_json(&self) -> ExprResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> ExprResult<Expression> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl From<ExprRef> for Expression {
    fn from(expr: ExprRef) -> Self {
        Expression::from_ref(expr)
    }
}

impl From<&Expression> for Expression {
    fn from(expr: &Expression) -> Self {
        expr.clone()
    }
}

macro_rules! impl_expression_from_literal {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Expression {
                fn from(value: $t) -> Self {
                    lit(value)
                }
            }
        )*
    };
}

impl_expression_from_literal!(
    bool,
    i32,
    i64,
    u32,
    u64,
    f32,
    f64,
    &str,
    String,
    Vec<u8>,
    &[u8],
    LiteralValue,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveTime,
);
