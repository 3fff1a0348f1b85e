use crate::expr::{Expression, FunctionExpr, PartitioningExpr};

/// Transforms that derive partition values from a column.
pub struct ExpressionPartitioningNamespace {
    expr: Expression,
}

impl ExpressionPartitioningNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    fn partitioning(&self, func: PartitioningExpr) -> Expression {
        self.expr.function(FunctionExpr::Partitioning(func), vec![])
    }

    pub fn days(&self) -> Expression {
        self.partitioning(PartitioningExpr::Days)
    }

    pub fn hours(&self) -> Expression {
        self.partitioning(PartitioningExpr::Hours)
    }

    pub fn months(&self) -> Expression {
        self.partitioning(PartitioningExpr::Months)
    }

    pub fn years(&self) -> Expression {
        self.partitioning(PartitioningExpr::Years)
    }

    /// Iceberg bucket transform into `n` buckets.
    pub fn iceberg_bucket(&self, n: i32) -> Expression {
        self.partitioning(PartitioningExpr::IcebergBucket(n))
    }

    /// Iceberg truncate transform with width `w`.
    pub fn iceberg_truncate(&self, w: i64) -> Expression {
        self.partitioning(PartitioningExpr::IcebergTruncate(w))
    }
}
