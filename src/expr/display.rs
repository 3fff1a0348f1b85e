use std::fmt::{self, Display};

use crate::expr::Expr;

/// Binary operands are parenthesized when they are binary operations themselves.
struct Operand<'a>(&'a Expr);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::BinaryOp { .. } => write!(f, "[{}]", self.0),
            other => write!(f, "{other}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(name) => write!(f, "col({name})"),
            Expr::Alias(child, name) => write!(f, "{child} as {name}"),
            Expr::Literal(value) => write!(f, "lit({value})"),
            Expr::Cast(child, dtype) => write!(f, "cast({child} as {dtype})"),
            Expr::Not(child) => write!(f, "not({child})"),
            Expr::IsNull(child) => write!(f, "is_null({child})"),
            Expr::NotNull(child) => write!(f, "not_null({child})"),
            Expr::IsIn(child, items) => write!(f, "{child} in {items}"),
            Expr::BinaryOp { op, left, right } => write!(f, "{} {op} {}", Operand(left), Operand(right)),
            Expr::IfElse { if_true, if_false, predicate } => {
                write!(f, "{if_true} if {predicate} else {if_false}")
            }
            Expr::Function { func, inputs } => func.fmt_call(f, inputs.as_slice()),
            Expr::Agg(agg) => write!(f, "{agg}"),
            Expr::Explode(child) => write!(f, "explode({child})"),
            Expr::Udf { name, inputs, return_dtype } => {
                write!(f, "{name}(")?;
                for (i, input) in inputs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{input}")?;
                }
                write!(f, ") -> {return_dtype}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{expr::{col, lit, CountMode}, schema::DataType};

    #[test]
    fn display_reads_like_construction() {
        assert_eq!(col("x").to_string(), "col(x)");
        assert_eq!((col("x") + lit(1)).to_string(), "col(x) + lit(1)");
        assert_eq!(((col("x") + 1) * col("y")).to_string(), "[col(x) + lit(1)] * col(y)");
        assert_eq!(col("x").alias("y").to_string(), "col(x) as y");
        assert_eq!(col("x").cast(DataType::Int64).to_string(), "cast(col(x) as Int64)");
        assert_eq!(col("s").str().contains("a").to_string(), "utf8_contains(col(s), lit(\"a\"))");
        assert_eq!(col("s").str().split(",", true).to_string(), "utf8_split(col(s), lit(\",\"), regex=true)");
        assert_eq!(col("x").count(CountMode::Valid).to_string(), "count(col(x), Valid)");
        assert_eq!(col("x").sum().to_string(), "sum(col(x))");
        assert_eq!(
            col("c").if_else(col("a"), lit("b")).to_string(),
            "col(a) if col(c) else lit(\"b\")"
        );
    }
}
