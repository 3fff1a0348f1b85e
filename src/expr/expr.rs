use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    expr::{AggExpr, FunctionExpr, LiteralValue, Operator, StructExpr},
    schema::DataType,
};

pub type ExprRef = Arc<Expr>;

/// Node of an expression tree.
///
/// Trees are immutable and shared through `ExprRef`; building a new
/// expression never copies its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Column(String),
    Alias(ExprRef, String),
    Literal(LiteralValue),
    Cast(ExprRef, DataType),
    Not(ExprRef),
    IsNull(ExprRef),
    NotNull(ExprRef),
    /// Child, items.
    IsIn(ExprRef, ExprRef),
    BinaryOp {
        op: Operator,
        left: ExprRef,
        right: ExprRef,
    },
    IfElse {
        if_true: ExprRef,
        if_false: ExprRef,
        predicate: ExprRef,
    },
    Function {
        func: FunctionExpr,
        inputs: Vec<ExprRef>,
    },
    Agg(AggExpr),
    Explode(ExprRef),
    /// A user function registered with the engine under `name`.
    Udf {
        name: String,
        inputs: Vec<ExprRef>,
        return_dtype: DataType,
    },
}

impl Expr {
    /// Output column name.
    ///
    /// Columns and aliases name themselves, literals are called `literal`,
    /// `struct_get` takes the field name, `if_else` takes its `if_true`
    /// branch, and everything else inherits from its first input.
    pub fn name(&self) -> &str {
        match self {
            Expr::Column(name) => name,
            Expr::Alias(_, name) => name,
            Expr::Literal(_) => "literal",
            Expr::Cast(child, _)
            | Expr::Not(child)
            | Expr::IsNull(child)
            | Expr::NotNull(child)
            | Expr::IsIn(child, _)
            | Expr::Explode(child) => child.name(),
            Expr::BinaryOp { left, .. } => left.name(),
            Expr::IfElse { if_true, .. } => if_true.name(),
            Expr::Function { func: FunctionExpr::Struct(StructExpr::Get(field)), .. } => field,
            Expr::Function { func, inputs } => match inputs.first() {
                Some(first) => first.name(),
                None => func.fn_name(),
            },
            Expr::Agg(agg) => agg.child().name(),
            Expr::Udf { name, inputs, .. } => match inputs.first() {
                Some(first) => first.name(),
                None => name,
            },
        }
    }

    pub fn children(&self) -> Vec<&ExprRef> {
        match self {
            Expr::Column(_) | Expr::Literal(_) => vec![],
            Expr::Alias(child, _)
            | Expr::Cast(child, _)
            | Expr::Not(child)
            | Expr::IsNull(child)
            | Expr::NotNull(child)
            | Expr::Explode(child) => vec![child],
            Expr::IsIn(child, items) => vec![child, items],
            Expr::BinaryOp { left, right, .. } => vec![left, right],
            Expr::IfElse { if_true, if_false, predicate } => vec![predicate, if_true, if_false],
            Expr::Function { inputs, .. } | Expr::Udf { inputs, .. } => inputs.iter().collect(),
            Expr::Agg(agg) => vec![agg.child()],
        }
    }

    /// Column names this expression reads, in first-seen order.
    pub fn required_columns(&self) -> IndexSet<String> {
        let mut columns = IndexSet::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns(&self, columns: &mut IndexSet<String>) {
        if let Expr::Column(name) = self {
            columns.insert(name.clone());
            return;
        }
        for child in self.children() {
            child.collect_columns(columns);
        }
    }

    /// True when evaluating this expression does more than forward a column.
    pub fn requires_computation(&self) -> bool {
        match self {
            Expr::Column(_) => false,
            Expr::Alias(child, _) => child.requires_computation(),
            _ => true,
        }
    }

    /// The single input column this expression merely renames, if any.
    pub fn input_mapping(&self) -> Option<String> {
        let required = self.required_columns();
        if required.len() == 1 && !self.requires_computation() {
            required.into_iter().next()
        } else {
            None
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Expr::Column(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> ExprRef {
        Arc::new(Expr::Column(name.to_string()))
    }

    #[test]
    fn names_follow_first_input() {
        let sum = Expr::BinaryOp { op: Operator::Plus, left: column("a"), right: column("b") };
        assert_eq!(sum.name(), "a");
        let lit_first = Expr::BinaryOp {
            op: Operator::Plus,
            left: Arc::new(Expr::Literal(LiteralValue::Int64(1))),
            right: column("b"),
        };
        assert_eq!(lit_first.name(), "literal");
        let get = Expr::Function {
            func: FunctionExpr::Struct(StructExpr::Get("inner".into())),
            inputs: vec![column("s")],
        };
        assert_eq!(get.name(), "inner");
    }

    #[test]
    fn required_columns_are_deduplicated_in_order() {
        let expr = Expr::IfElse {
            predicate: Arc::new(Expr::BinaryOp { op: Operator::Gt, left: column("x"), right: column("y") }),
            if_true: column("y"),
            if_false: column("z"),
        };
        let columns: Vec<String> = expr.required_columns().into_iter().collect();
        assert_eq!(columns, vec!["x", "y", "z"]);
    }

    #[test]
    fn input_mapping_only_for_pure_aliases() {
        let aliased = Expr::Alias(Arc::new(Expr::Alias(column("a"), "b".into())), "c".into());
        assert_eq!(aliased.input_mapping(), Some("a".to_string()));
        assert_eq!(Expr::Column("a".into()).input_mapping(), Some("a".to_string()));

        let computed = Expr::Alias(Arc::new(Expr::Not(column("a"))), "b".into());
        assert_eq!(computed.input_mapping(), None);
        assert_eq!(Expr::Literal(LiteralValue::Null).input_mapping(), None);
    }
}
