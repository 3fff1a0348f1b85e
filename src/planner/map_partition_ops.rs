use tracing::debug;

use crate::{
    projection::ExpressionsProjection,
    schema::{Field, Schema},
    ExprResult,
};

/// A per-partition transformation whose output schema is known at planning time.
pub trait MapPartitionOp {
    fn output_schema(&self) -> &Schema;
}

/// Explodes list columns into one row per element.
#[derive(Debug, Clone)]
pub struct ExplodeOp {
    input_schema: Schema,
    explode_columns: ExpressionsProjection,
    output_schema: Schema,
}

impl ExplodeOp {
    /// Fails when `explode_columns` cannot be resolved against `input_schema`.
    ///
    /// The output keeps the input's column order; each exploded column takes
    /// its resolved field and every other column passes through.
    pub fn new(input_schema: Schema, explode_columns: ExpressionsProjection) -> ExprResult<Self> {
        let explode_schema = explode_columns.resolve_schema(&input_schema)?;

        let output_fields: Vec<Field> = input_schema
            .iter()
            .map(|field| match explode_schema.fields.get(&field.name) {
                Some(exploded) => exploded.clone(),
                None => field.clone(),
            })
            .collect();
        let output_schema = Schema::new(output_fields)?;
        debug!(exploded = explode_schema.len(), columns = output_schema.len(), "planned explode");

        Ok(Self { input_schema, explode_columns, output_schema })
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn explode_columns(&self) -> &ExpressionsProjection {
        &self.explode_columns
    }
}

impl MapPartitionOp for ExplodeOp {
    fn output_schema(&self) -> &Schema {
        &self.output_schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::_tests::fixtures::orders_schema;
    use crate::expr::col;
    use crate::schema::DataType;
    use crate::ExprError;

    #[test]
    fn exploded_column_takes_element_type() {
        let columns = ExpressionsProjection::new(vec![col("tags").explode()]).unwrap();
        let op = ExplodeOp::new(orders_schema(), columns).unwrap();
        let output = op.output_schema();
        assert_eq!(output.column_names(), orders_schema().column_names());
        assert_eq!(output.get_field("tags").unwrap().dtype, DataType::Utf8);
        assert_eq!(output.get_field("price").unwrap().dtype, DataType::Float64);
        assert_eq!(op.input_schema(), &orders_schema());
    }

    #[test]
    fn non_list_column_rejected() {
        let columns = ExpressionsProjection::new(vec![col("sku").explode()]).unwrap();
        assert!(matches!(ExplodeOp::new(orders_schema(), columns), Err(ExprError::TypeMismatch { .. })));
    }

    #[test]
    fn unknown_column_rejected() {
        let columns = ExpressionsProjection::new(vec![col("nope").explode()]).unwrap();
        assert!(matches!(ExplodeOp::new(orders_schema(), columns), Err(ExprError::FieldNotFound { .. })));
    }

    #[test]
    fn renamed_explode_does_not_replace_input() {
        let columns = ExpressionsProjection::new(vec![col("tags").explode().alias("tag")]).unwrap();
        let op = ExplodeOp::new(orders_schema(), columns).unwrap();
        assert_eq!(op.output_schema().get_field("tags").unwrap().dtype, DataType::List(Box::new(DataType::Utf8)));
        assert!(!op.output_schema().contains("tag"));
        assert_eq!(op.explode_columns().len(), 1);
    }
}
