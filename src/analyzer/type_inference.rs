use tracing::trace;

use crate::{
    analyzer::FunctionTyping,
    expr::{AggExpr, Expr, Operator},
    schema::{DataType, Field, Schema, TimeUnit},
    ExprError, ExprResult,
};

#[derive(Default)]
pub struct TypeInference;

impl TypeInference {
    /// Output field of `expr` against `schema`: its name and resolved type.
    pub fn infer_field(expr: &Expr, schema: &Schema) -> ExprResult<Field> {
        let dtype = Self::infer_dtype(expr, schema)?;
        trace!(name = expr.name(), dtype = %dtype, "resolved expression");
        Ok(Field::new(expr.name(), dtype))
    }

    pub fn infer_dtype(expr: &Expr, schema: &Schema) -> ExprResult<DataType> {
        match expr {
            Expr::Column(name) => Ok(schema.get_field(name)?.dtype.clone()),
            Expr::Alias(child, _) => Self::infer_dtype(child, schema),
            Expr::Literal(value) => Ok(value.dtype()),
            Expr::Cast(child, target) => {
                let source = Self::infer_dtype(child, schema)?;
                if source.can_cast_to(target) {
                    Ok(target.clone())
                } else {
                    Err(ExprError::type_mismatch("cast", &format!("a type castable to {target}"), &[source]))
                }
            }
            Expr::Not(child) => match Self::infer_dtype(child, schema)? {
                DataType::Boolean | DataType::Null => Ok(DataType::Boolean),
                other => Err(ExprError::type_mismatch("not", "Boolean", &[other])),
            },
            Expr::IsNull(child) | Expr::NotNull(child) => {
                Self::infer_dtype(child, schema)?;
                Ok(DataType::Boolean)
            }
            Expr::IsIn(child, items) => {
                let child_type = Self::infer_dtype(child, schema)?;
                let items_type = Self::infer_dtype(items, schema)?;
                match DataType::supertype(&child_type, &items_type) {
                    Some(_) => Ok(DataType::Boolean),
                    None => Err(ExprError::type_mismatch("is_in", "items of a compatible type", &[child_type, items_type])),
                }
            }
            Expr::BinaryOp { op, left, right } => {
                let lhs = Self::infer_dtype(left, schema)?;
                let rhs = Self::infer_dtype(right, schema)?;
                Self::infer_binary(*op, lhs, rhs)
            }
            Expr::IfElse { if_true, if_false, predicate } => {
                let predicate_type = Self::infer_dtype(predicate, schema)?;
                if !matches!(predicate_type, DataType::Boolean | DataType::Null) {
                    return Err(ExprError::type_mismatch("if_else", "a Boolean predicate", &[predicate_type]));
                }
                let true_type = Self::infer_dtype(if_true, schema)?;
                let false_type = Self::infer_dtype(if_false, schema)?;
                DataType::supertype(&true_type, &false_type).ok_or_else(|| {
                    ExprError::type_mismatch("if_else", "branches of a compatible type", &[true_type.clone(), false_type.clone()])
                })
            }
            Expr::Function { func, inputs } => {
                let input_types = inputs
                    .iter()
                    .map(|input| Self::infer_dtype(input, schema))
                    .collect::<ExprResult<Vec<_>>>()?;
                FunctionTyping::infer(func, inputs, &input_types)
            }
            Expr::Agg(agg) => {
                let dtype = Self::infer_dtype(agg.child(), schema)?;
                Self::infer_agg(agg, dtype)
            }
            Expr::Explode(child) => {
                let dtype = Self::infer_dtype(child, schema)?;
                match dtype.list_inner() {
                    Some(inner) => Ok(inner.clone()),
                    None if dtype.is_null() => Ok(DataType::Null),
                    None => Err(ExprError::type_mismatch("explode", "a List", &[dtype.clone()])),
                }
            }
            Expr::Udf { inputs, return_dtype, .. } => {
                for input in inputs {
                    Self::infer_dtype(input, schema)?;
                }
                Ok(return_dtype.clone())
            }
        }
    }

    fn infer_binary(op: Operator, lhs: DataType, rhs: DataType) -> ExprResult<DataType> {
        use DataType::*;

        let numeric = |d: &DataType| d.is_numeric() || d.is_null();
        let mismatch = |expected: &str| ExprError::type_mismatch(op.fn_name(), expected, &[lhs.clone(), rhs.clone()]);

        if op.is_comparison() {
            return match DataType::supertype(&lhs, &rhs) {
                Some(_) if lhs.is_comparable() && rhs.is_comparable() => Ok(Boolean),
                _ => Err(mismatch("comparable inputs of a compatible type")),
            };
        }
        if op.is_logical() {
            return match (&lhs, &rhs) {
                (Boolean | Null, Boolean | Null) => Ok(Boolean),
                _ => Err(mismatch("Boolean inputs")),
            };
        }

        match (op, &lhs, &rhs) {
            (Operator::TrueDivide, l, r) if numeric(l) && numeric(r) => Ok(Float64),
            (Operator::TrueDivide, ..) => Err(mismatch("numeric inputs")),

            (_, l, r) if numeric(l) && numeric(r) => {
                DataType::supertype(l, r).ok_or_else(|| mismatch("numeric inputs of a compatible type"))
            }

            (Operator::Plus, Utf8 | Null, Utf8 | Null) => Ok(Utf8),

            (Operator::Plus, Timestamp(unit, tz), Duration(_)) | (Operator::Plus, Duration(_), Timestamp(unit, tz)) => {
                Ok(Timestamp(*unit, tz.clone()))
            }
            (Operator::Minus, Timestamp(unit, tz), Duration(_)) => Ok(Timestamp(*unit, tz.clone())),
            (Operator::Plus, Date, Duration(_)) | (Operator::Plus, Duration(_), Date) | (Operator::Minus, Date, Duration(_)) => {
                Ok(Date)
            }
            (Operator::Minus, Timestamp(a, _), Timestamp(b, _)) => Ok(Duration(TimeUnit::finest(*a, *b))),
            (Operator::Plus | Operator::Minus, Duration(a), Duration(b)) => Ok(Duration(TimeUnit::finest(*a, *b))),

            (Operator::Plus, ..) => Err(mismatch("numeric, string or temporal inputs")),
            _ => Err(mismatch("numeric inputs")),
        }
    }

    fn infer_agg(agg: &AggExpr, dtype: DataType) -> ExprResult<DataType> {
        use DataType::*;

        let mismatch = |expected: &str| ExprError::type_mismatch(agg.fn_name(), expected, &[dtype.clone()]);
        match agg {
            AggExpr::Count(..) => Ok(UInt64),
            AggExpr::Sum(_) => match &dtype {
                Int8 | Int16 | Int32 | Int64 => Ok(Int64),
                UInt8 | UInt16 | UInt32 | UInt64 => Ok(UInt64),
                Float32 | Float64 | Null => Ok(dtype.clone()),
                Decimal128(_, scale) => Ok(Decimal128(38, *scale)),
                _ => Err(mismatch("numeric input")),
            },
            AggExpr::Mean(_) if dtype.is_numeric() || dtype.is_null() => Ok(Float64),
            AggExpr::Mean(_) => Err(mismatch("numeric input")),
            AggExpr::Min(_) | AggExpr::Max(_) if dtype.is_comparable() => Ok(dtype.clone()),
            AggExpr::Min(_) | AggExpr::Max(_) => Err(mismatch("comparable input")),
            AggExpr::AnyValue(..) => Ok(dtype.clone()),
            AggExpr::List(_) => Ok(List(Box::new(dtype.clone()))),
            AggExpr::Concat(_) => match &dtype {
                List(_) | Utf8 | Null => Ok(dtype.clone()),
                FixedSizeList(inner, _) => Ok(List(inner.clone())),
                _ => Err(mismatch("List or Utf8 input")),
            },
        }
    }
}
