use crate::{
    expr::{Expr, Expression, LiteralValue},
    schema::DataType,
};

/// SQL flavor, picked from the scheme of a database URL (`postgresql://...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
    MySql,
    Sqlite,
    Oracle,
    MsSql,
    Generic,
}

impl SqlDialect {
    pub fn from_scheme(db_scheme: &str) -> SqlDialect {
        let scheme = db_scheme.split("://").next().unwrap_or(db_scheme).to_ascii_lowercase();
        // driver suffixes such as `postgresql+psycopg2`
        let base = scheme.split('+').next().unwrap_or(&scheme);
        match base {
            "postgres" | "postgresql" => SqlDialect::Postgres,
            "mysql" | "mariadb" => SqlDialect::MySql,
            "sqlite" => SqlDialect::Sqlite,
            "oracle" => SqlDialect::Oracle,
            "mssql" | "sqlserver" => SqlDialect::MsSql,
            _ => SqlDialect::Generic,
        }
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        match (self, value) {
            (SqlDialect::Sqlite | SqlDialect::MsSql | SqlDialect::Oracle, true) => "1",
            (SqlDialect::Sqlite | SqlDialect::MsSql | SqlDialect::Oracle, false) => "0",
            (_, true) => "TRUE",
            (_, false) => "FALSE",
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn literal_to_sql(value: &LiteralValue, dialect: SqlDialect) -> Option<String> {
    match value {
        LiteralValue::Null => Some("NULL".to_string()),
        LiteralValue::Boolean(b) => Some(dialect.bool_literal(*b).to_string()),
        LiteralValue::Utf8(s) => Some(quote(s)),
        LiteralValue::Int32(v) => Some(v.to_string()),
        LiteralValue::Int64(v) => Some(v.to_string()),
        LiteralValue::UInt64(v) => Some(v.to_string()),
        LiteralValue::Float64(v) if v.into_inner().is_finite() => Some(format!("{:?}", v.into_inner())),
        LiteralValue::Decimal(v, _, scale) => Some(LiteralValue::format_decimal(*v, *scale)),
        LiteralValue::Date(days) => {
            let date = LiteralValue::date_value(*days)?.format("%Y-%m-%d").to_string();
            Some(match dialect {
                SqlDialect::Sqlite => quote(&date),
                SqlDialect::MsSql => format!("CAST({} AS DATE)", quote(&date)),
                _ => format!("DATE {}", quote(&date)),
            })
        }
        LiteralValue::Timestamp(v, unit, _) => {
            let ts = LiteralValue::timestamp_value(*v, *unit)?.format("%Y-%m-%d %H:%M:%S%.6f").to_string();
            Some(match dialect {
                SqlDialect::Sqlite => quote(&ts),
                SqlDialect::MsSql => format!("CAST({} AS DATETIME2)", quote(&ts)),
                SqlDialect::Oracle => format!("TO_TIMESTAMP({}, 'YYYY-MM-DD HH24:MI:SS.FF6')", quote(&ts)),
                _ => format!("TIMESTAMP {}", quote(&ts)),
            })
        }
        _ => None,
    }
}

fn type_to_sql(dtype: &DataType, dialect: SqlDialect) -> Option<&'static str> {
    let name = match dtype {
        DataType::Boolean => match dialect {
            SqlDialect::MsSql => "BIT",
            SqlDialect::MySql => "UNSIGNED",
            _ => "BOOLEAN",
        },
        DataType::Int8 | DataType::Int16 | DataType::Int32 => match dialect {
            SqlDialect::MySql => "SIGNED",
            _ => "INTEGER",
        },
        DataType::Int64 => match dialect {
            SqlDialect::MySql => "SIGNED",
            _ => "BIGINT",
        },
        DataType::Float32 | DataType::Float64 => match dialect {
            SqlDialect::MySql => "DOUBLE",
            SqlDialect::Sqlite => "REAL",
            _ => "DOUBLE PRECISION",
        },
        DataType::Utf8 => match dialect {
            SqlDialect::MySql => "CHAR",
            SqlDialect::Sqlite => "TEXT",
            _ => "VARCHAR",
        },
        DataType::Date => "DATE",
        _ => return None,
    };
    Some(name)
}

impl Expr {
    /// SQL rendering for pushdown into a database scan, if this expression has one.
    pub fn to_sql(&self, dialect: SqlDialect) -> Option<String> {
        match self {
            Expr::Column(name) => Some(name.clone()),
            Expr::Alias(child, _) => child.to_sql(dialect),
            Expr::Literal(value) => literal_to_sql(value, dialect),
            Expr::Cast(child, dtype) => {
                Some(format!("CAST({} AS {})", child.to_sql(dialect)?, type_to_sql(dtype, dialect)?))
            }
            Expr::Not(child) => Some(format!("NOT ({})", child.to_sql(dialect)?)),
            Expr::IsNull(child) => Some(format!("{} IS NULL", Self::operand_sql(child, dialect)?)),
            Expr::NotNull(child) => Some(format!("{} IS NOT NULL", Self::operand_sql(child, dialect)?)),
            Expr::IsIn(child, items) => {
                let Expr::Literal(LiteralValue::Series(values)) = items.as_ref() else {
                    return None;
                };
                if values.is_empty() {
                    return None;
                }
                let rendered = values
                    .iter()
                    .map(|v| literal_to_sql(v, dialect))
                    .collect::<Option<Vec<_>>>()?;
                Some(format!("{} IN ({})", Self::operand_sql(child, dialect)?, rendered.join(", ")))
            }
            Expr::BinaryOp { op, left, right } => Some(format!(
                "{} {} {}",
                Self::operand_sql(left, dialect)?,
                op.sql_symbol(),
                Self::operand_sql(right, dialect)?
            )),
            Expr::IfElse { if_true, if_false, predicate } => Some(format!(
                "CASE WHEN {} THEN {} ELSE {} END",
                predicate.to_sql(dialect)?,
                if_true.to_sql(dialect)?,
                if_false.to_sql(dialect)?
            )),
            Expr::Function { .. } | Expr::Agg(_) | Expr::Explode(_) | Expr::Udf { .. } => None,
        }
    }

    fn operand_sql(expr: &Expr, dialect: SqlDialect) -> Option<String> {
        let sql = expr.to_sql(dialect)?;
        match expr {
            Expr::BinaryOp { .. } => Some(format!("({sql})")),
            Expr::Alias(child, _) if matches!(child.as_ref(), Expr::BinaryOp { .. }) => Some(format!("({sql})")),
            _ => Some(sql),
        }
    }
}

impl Expression {
    /// Render as SQL for the database behind `db_scheme` (e.g. `"postgresql"`).
    ///
    /// Returns `None` when any part of the expression has no SQL equivalent,
    /// in which case the caller keeps the expression on the engine side.
    pub fn to_sql(&self, db_scheme: &str) -> Option<String> {
        self.expr().to_sql(SqlDialect::from_scheme(db_scheme))
    }
}
