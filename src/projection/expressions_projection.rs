use std::fmt::{self, Display};
use std::ops::{Index, Range};

use indexmap::{IndexMap, IndexSet};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::{
    expr::{col, ExprRef, Expression},
    schema::Schema,
    ExprError, ExprResult,
};

/// Uniquely named expressions, in output order, to be projected onto a
/// table to produce another table.
#[derive(Debug, Clone, Default)]
pub struct ExpressionsProjection {
    exprs: IndexMap<String, Expression>,
}

impl ExpressionsProjection {
    /// Fails when two expressions produce the same output name.
    pub fn new(exprs: Vec<Expression>) -> ExprResult<Self> {
        let mut map = IndexMap::with_capacity(exprs.len());
        for expr in exprs {
            let name = expr.name().to_string();
            if map.contains_key(&name) {
                return Err(ExprError::DuplicateName(name));
            }
            map.insert(name, expr);
        }
        Ok(Self { exprs: map })
    }

    /// One column reference per field of `schema`.
    pub fn from_schema(schema: &Schema) -> Self {
        let exprs = schema.iter().map(|field| (field.name.clone(), col(field.name.as_str()))).collect();
        Self { exprs }
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expression> {
        self.exprs.values()
    }

    pub fn get(&self, index: usize) -> Option<&Expression> {
        self.exprs.get_index(index).map(|(_, expr)| expr)
    }

    /// Expressions at positions `range`; out-of-range positions are skipped.
    pub fn slice(&self, range: Range<usize>) -> Vec<Expression> {
        let count = range.end.saturating_sub(range.start);
        self.iter().skip(range.start).take(count).cloned().collect()
    }

    /// Columns read by any of the expressions, in first-seen order.
    pub fn required_columns(&self) -> IndexSet<String> {
        let mut columns = IndexSet::new();
        for expr in self.iter() {
            columns.extend(expr.required_columns());
        }
        columns
    }

    /// Merge `other` after `self`.
    ///
    /// An incoming expression whose name is taken is aliased by prefixing
    /// `rename_dup` until the name is free. Without a prefix the collision is
    /// an error; an empty prefix is rejected since it can never free a name.
    pub fn union(&self, other: &ExpressionsProjection, rename_dup: Option<&str>) -> ExprResult<Self> {
        if rename_dup == Some("") {
            return Err(ExprError::InvalidArgument("rename_dup must not be empty".into()));
        }

        let mut unioned: IndexMap<String, Expression> = IndexMap::with_capacity(self.len() + other.len());
        for expr in self.iter().chain(other.iter()) {
            let mut name = expr.name().to_string();
            let mut expr = expr.clone();

            if let Some(seen) = unioned.get(&name) {
                let Some(prefix) = rename_dup else {
                    return Err(ExprError::DuplicateNameInUnion {
                        name,
                        seen: seen.to_string(),
                        current: expr.to_string(),
                    });
                };
                let original = name.clone();
                while unioned.contains_key(&name) {
                    name = format!("{prefix}{name}");
                }
                debug!(from = %original, to = %name, "renaming duplicate in projection union");
                expr = expr.alias(name.as_str());
            }

            unioned.insert(name, expr);
        }
        Ok(Self { exprs: unioned })
    }

    pub fn to_name_set(&self) -> IndexSet<String> {
        self.exprs.keys().cloned().collect()
    }

    /// `{output_name: input_name}` for every expression that only renames an input column.
    pub fn input_mapping(&self) -> IndexMap<String, String> {
        self.exprs
            .iter()
            .filter_map(|(name, expr)| expr.input_mapping().map(|input| (name.clone(), input)))
            .collect()
    }

    /// A projection selecting this projection's outputs by name.
    pub fn to_column_expressions(&self) -> Self {
        let exprs = self.exprs.keys().map(|name| (name.clone(), col(name.as_str()))).collect();
        Self { exprs }
    }

    pub fn get_expression_by_name(&self, name: &str) -> ExprResult<&Expression> {
        self.exprs.get(name).ok_or_else(|| ExprError::NameNotFound(name.to_string()))
    }

    pub fn to_inner_exprs(&self) -> Vec<ExprRef> {
        self.iter().map(Expression::to_ref).collect()
    }

    /// Output schema of this projection over `schema`, in projection order.
    pub fn resolve_schema(&self, schema: &Schema) -> ExprResult<Schema> {
        let fields = self.iter().map(|expr| expr.to_field(schema)).collect::<ExprResult<Vec<_>>>()?;
        trace!(columns = fields.len(), "resolved projection schema");
        Schema::new(fields)
    }
}

impl PartialEq for ExpressionsProjection {
    /// Same length, and pairwise the same names and structurally equal expressions in order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .exprs
                .iter()
                .zip(other.exprs.iter())
                .all(|((name, expr), (other_name, other_expr))| name == other_name && expr == other_expr)
    }
}

impl Eq for ExpressionsProjection {}

impl Index<usize> for ExpressionsProjection {
    type Output = Expression;

    fn index(&self, index: usize) -> &Expression {
        &self.exprs[index]
    }
}

impl<'a> IntoIterator for &'a ExpressionsProjection {
    type Item = &'a Expression;
    type IntoIter = indexmap::map::Values<'a, String, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.exprs.values()
    }
}

impl Serialize for ExpressionsProjection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ExpressionsProjection {
    /// Rejects payloads with duplicate output names.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let exprs = Vec::<Expression>::deserialize(deserializer)?;
        ExpressionsProjection::new(exprs).map_err(D::Error::custom)
    }
}

impl Display for ExpressionsProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, expr) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{expr}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::_tests::fixtures::orders_schema;
    use crate::expr::lit;
    use crate::schema::{DataType, Field};

    fn projection(exprs: Vec<Expression>) -> ExpressionsProjection {
        ExpressionsProjection::new(exprs).unwrap()
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = ExpressionsProjection::new(vec![col("a"), col("b") + 1, col("a").alias("a")]).unwrap_err();
        assert_eq!(err, ExprError::DuplicateName("a".into()));
        assert_eq!(err.to_string(), "Expressions must all have unique names; saw a twice");
    }

    #[test]
    fn keeps_insertion_order() {
        let p = projection(vec![col("c"), col("a").alias("z"), col("b")]);
        let names: Vec<&str> = p.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["c", "z", "b"]);
        assert_eq!(p[1], col("a").alias("z"));
        assert_eq!(p.get(3), None);
        assert_eq!(p.slice(1..10), vec![col("a").alias("z"), col("b")]);
    }

    #[test]
    fn union_renames_with_prefix() {
        let left = projection(vec![col("id"), col("name")]);
        let right = projection(vec![col("id"), col("score")]);
        let unioned = left.union(&right, Some("right.")).unwrap();
        let names: Vec<String> = unioned.to_name_set().into_iter().collect();
        assert_eq!(names, vec!["id", "name", "right.id", "score"]);
        assert_eq!(unioned[2], col("id").alias("right.id"));
    }

    #[test]
    fn union_prefixes_until_unique() {
        let left = projection(vec![col("x"), col("y").alias("_x")]);
        let right = projection(vec![col("x")]);
        let unioned = left.union(&right, Some("_")).unwrap();
        assert_eq!(unioned[2].name(), "__x");
    }

    #[test]
    fn union_without_rename_fails() {
        let left = projection(vec![col("id")]);
        let right = projection(vec![col("id") + 1]);
        match left.union(&right, None) {
            Err(ExprError::DuplicateNameInUnion { name, seen, current }) => {
                assert_eq!(name, "id");
                assert_eq!(seen, "col(id)");
                assert_eq!(current, "col(id) + lit(1)");
            }
            other => panic!("expected DuplicateNameInUnion, got {other:?}"),
        }
        assert!(left.union(&right, Some("")).is_err());
    }

    #[test]
    fn input_mapping_only_for_plain_renames() {
        let p = projection(vec![col("a"), col("b").alias("b2").alias("b3"), (col("c") + 1).alias("c2"), lit(1)]);
        let mapping: Vec<(String, String)> = p.input_mapping().into_iter().collect();
        assert_eq!(mapping, vec![("a".into(), "a".into()), ("b3".into(), "b".into())]);
    }

    #[test]
    fn required_columns_across_expressions() {
        let p = projection(vec![(col("b") + col("a")).alias("s"), col("c"), col("a").alias("a2")]);
        let required: Vec<String> = p.required_columns().into_iter().collect();
        assert_eq!(required, vec!["b", "a", "c"]);
    }

    #[test]
    fn resolve_schema_preserves_projection_order() {
        let p = projection(vec![
            (col("price") * col("quantity")).alias("total"),
            col("sku"),
            col("placed_at").dt().year(),
        ]);
        let resolved = p.resolve_schema(&orders_schema()).unwrap();
        let fields: Vec<&Field> = resolved.iter().collect();
        assert_eq!(
            fields,
            vec![
                &Field::new("total", DataType::Float64),
                &Field::new("sku", DataType::Utf8),
                &Field::new("placed_at", DataType::Int32),
            ]
        );
        let bad = projection(vec![col("missing")]);
        assert!(bad.resolve_schema(&orders_schema()).is_err());
    }

    #[test]
    fn from_schema_and_column_expressions() {
        let schema = orders_schema();
        let p = ExpressionsProjection::from_schema(&schema);
        assert_eq!(p.len(), schema.len());
        assert!(p.iter().all(Expression::is_column));
        assert_eq!(p.to_inner_exprs().len(), schema.len());

        let computed = projection(vec![(col("price") + 1).alias("p1"), col("sku")]);
        assert_eq!(computed.to_column_expressions(), projection(vec![col("p1"), col("sku")]));
    }

    #[test]
    fn structural_equality_depends_on_order() {
        let a = projection(vec![col("x"), col("y")]);
        let b = projection(vec![col("x"), col("y")]);
        let c = projection(vec![col("y"), col("x")]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn get_expression_by_name_reports_missing() {
        let p = projection(vec![col("x")]);
        assert_eq!(p.get_expression_by_name("x").unwrap(), &col("x"));
        let err = p.get_expression_by_name("nope").unwrap_err();
        assert_eq!(err.to_string(), "nope not found in ExpressionsProjection");
    }

    #[test]
    fn serializes_as_expression_list() {
        let p = projection(vec![col("x"), (col("y") + 1).alias("z")]);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        let back: ExpressionsProjection = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);

        let dup = serde_json::to_string(&vec![col("a"), col("a")]).unwrap();
        let err = serde_json::from_str::<ExpressionsProjection>(&dup).unwrap_err();
        assert!(err.to_string().contains("saw a twice"));
    }

    #[test]
    fn display_lists_expressions() {
        let p = projection(vec![col("x"), (col("y") + 1).alias("z")]);
        assert_eq!(p.to_string(), "[col(x), col(y) + lit(1) as z]");
    }
}
