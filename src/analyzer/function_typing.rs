use regex::Regex;

use crate::{
    expr::{
        Expr, ExprRef, FloatExpr, FunctionExpr, ImageExpr, JsonExpr, ListExpr, LiteralValue,
        PartitioningExpr, StructExpr, TemporalExpr, UriExpr, Utf8Expr,
    },
    schema::DataType,
    ExprError, ExprResult,
};

/// Return types of the built-in functions.
pub struct FunctionTyping;

impl FunctionTyping {
    /// `inputs` are the function's argument expressions and `types` their
    /// resolved types, in the same order.
    pub fn infer(func: &FunctionExpr, inputs: &[ExprRef], types: &[DataType]) -> ExprResult<DataType> {
        let name = func.fn_name();
        let arity = Self::arity(func);
        if types.len() != arity {
            return Err(ExprError::InvalidArgument(format!(
                "{name} expects {arity} inputs, got {}",
                types.len()
            )));
        }
        let mismatch = |expected: &str| ExprError::type_mismatch(name, expected, types);

        match func {
            FunctionExpr::Numeric(_) => match &types[0] {
                t if t.is_numeric() || t.is_null() => Ok(t.clone()),
                _ => Err(mismatch("a numeric input")),
            },

            FunctionExpr::Float(FloatExpr::IsNan) => match &types[0] {
                t if t.is_floating() || t.is_null() => Ok(DataType::Boolean),
                _ => Err(mismatch("a floating point input")),
            },

            FunctionExpr::Utf8(f) => Self::infer_utf8(f, inputs, types),

            FunctionExpr::Temporal(f) => {
                let input = &types[0];
                match (f, input) {
                    (TemporalExpr::Hour, DataType::Timestamp(..) | DataType::Null) => Ok(DataType::UInt32),
                    (TemporalExpr::Hour, _) => Err(mismatch("a Timestamp input")),
                    (_, DataType::Date | DataType::Timestamp(..) | DataType::Null) => Ok(match f {
                        TemporalExpr::Date => DataType::Date,
                        TemporalExpr::Year => DataType::Int32,
                        _ => DataType::UInt32,
                    }),
                    _ => Err(mismatch("a Date or Timestamp input")),
                }
            }

            FunctionExpr::List(f) => Self::infer_list(f, types).ok_or_else(|| match f {
                ListExpr::Join => mismatch("a list of strings and a string delimiter"),
                ListExpr::Lengths => mismatch("a List input"),
                ListExpr::Get => mismatch("a List, an integer index and a default of the element type"),
            }),

            FunctionExpr::Struct(StructExpr::Get(field)) => match &types[0] {
                DataType::Struct(fields) => fields
                    .iter()
                    .find(|f| f.name == *field)
                    .map(|f| f.dtype.clone())
                    .ok_or_else(|| ExprError::FieldNotFound {
                        name: field.clone(),
                        available: fields.iter().map(|f| f.name.clone()).collect(),
                    }),
                DataType::Null => Ok(DataType::Null),
                _ => Err(mismatch("a Struct input")),
            },

            FunctionExpr::Image(f) => Self::infer_image(f, types).and_then(|dtype| dtype.ok_or_else(|| match f {
                ImageExpr::Decode { .. } => mismatch("a Binary input"),
                ImageExpr::Encode { .. } | ImageExpr::Resize { .. } => mismatch("an Image input"),
                ImageExpr::Crop => mismatch("an Image and a bounding box of 4 integers"),
            })),

            FunctionExpr::Json(JsonExpr::Query(query)) => {
                if query.trim().is_empty() {
                    return Err(ExprError::InvalidArgument("json query must not be empty".into()));
                }
                match &types[0] {
                    DataType::Utf8 | DataType::Null => Ok(DataType::Utf8),
                    _ => Err(mismatch("a Utf8 input")),
                }
            }

            FunctionExpr::Uri(UriExpr::Download { .. }) => match &types[0] {
                DataType::Utf8 | DataType::Null => Ok(DataType::Binary),
                _ => Err(mismatch("a Utf8 input")),
            },

            FunctionExpr::Partitioning(f) => Self::infer_partitioning(f, &types[0]).and_then(|dtype| {
                dtype.ok_or_else(|| match f {
                    PartitioningExpr::Hours => mismatch("a Timestamp input"),
                    PartitioningExpr::Days | PartitioningExpr::Months | PartitioningExpr::Years => {
                        mismatch("a Date or Timestamp input")
                    }
                    PartitioningExpr::IcebergBucket(_) => {
                        mismatch("an integer, decimal, string, binary, Date or Timestamp input")
                    }
                    PartitioningExpr::IcebergTruncate(_) => mismatch("an integer, decimal, string or binary input"),
                })
            }),
        }
    }

    /// Number of inputs including the expression the function is called on.
    fn arity(func: &FunctionExpr) -> usize {
        match func {
            FunctionExpr::Utf8(f) => match f {
                Utf8Expr::Length
                | Utf8Expr::Lower
                | Utf8Expr::Upper
                | Utf8Expr::Lstrip
                | Utf8Expr::Rstrip
                | Utf8Expr::Reverse
                | Utf8Expr::Capitalize => 1,
                Utf8Expr::Replace { .. } => 3,
                _ => 2,
            },
            FunctionExpr::List(ListExpr::Join) => 2,
            FunctionExpr::List(ListExpr::Get) => 3,
            FunctionExpr::Image(ImageExpr::Crop) => 2,
            _ => 1,
        }
    }

    fn infer_utf8(func: &Utf8Expr, inputs: &[ExprRef], types: &[DataType]) -> ExprResult<DataType> {
        let is_utf8 = |t: &DataType| matches!(t, DataType::Utf8 | DataType::Null);
        let text_inputs = match func {
            Utf8Expr::Left | Utf8Expr::Right => &types[..1],
            _ => types,
        };
        if !text_inputs.iter().all(is_utf8) {
            return Err(ExprError::type_mismatch(func_name(func), "string inputs", types));
        }

        match func {
            Utf8Expr::Match | Utf8Expr::Extract { .. } | Utf8Expr::ExtractAll { .. } => {
                Self::validate_pattern(&inputs[1])?
            }
            Utf8Expr::Split { regex: true } | Utf8Expr::Replace { regex: true } => Self::validate_pattern(&inputs[1])?,
            _ => {}
        }

        Ok(match func {
            Utf8Expr::Contains | Utf8Expr::Match | Utf8Expr::EndsWith | Utf8Expr::StartsWith => DataType::Boolean,
            Utf8Expr::Split { .. } | Utf8Expr::ExtractAll { .. } => DataType::List(Box::new(DataType::Utf8)),
            Utf8Expr::Length => DataType::UInt64,
            Utf8Expr::Find => DataType::Int64,
            Utf8Expr::Left | Utf8Expr::Right => {
                let count = &types[1];
                if !(count.is_integer() || count.is_null()) {
                    return Err(ExprError::type_mismatch(func_name(func), "an integer character count", types));
                }
                DataType::Utf8
            }
            _ => DataType::Utf8,
        })
    }

    /// Compile a literal pattern. Patterns computed from columns are left alone.
    fn validate_pattern(pattern: &Expr) -> ExprResult<()> {
        if let Expr::Literal(LiteralValue::Utf8(pattern)) = pattern {
            Regex::new(pattern).map_err(|e| ExprError::InvalidRegex {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn infer_list(func: &ListExpr, types: &[DataType]) -> Option<DataType> {
        let inner = match &types[0] {
            DataType::Null => DataType::Null,
            other => other.list_inner()?.clone(),
        };
        match func {
            ListExpr::Join => {
                let delimiter = &types[1];
                (matches!(inner, DataType::Utf8 | DataType::Null) && matches!(delimiter, DataType::Utf8 | DataType::Null))
                    .then_some(DataType::Utf8)
            }
            ListExpr::Lengths => Some(DataType::UInt64),
            ListExpr::Get => {
                let index = &types[1];
                if !(index.is_integer() || index.is_null()) {
                    return None;
                }
                DataType::supertype(&inner, &types[2])
            }
        }
    }

    /// `Ok(None)` means the input types do not fit.
    fn infer_image(func: &ImageExpr, types: &[DataType]) -> ExprResult<Option<DataType>> {
        let input = &types[0];
        Ok(match func {
            ImageExpr::Decode { .. } => matches!(input, DataType::Binary | DataType::Null).then_some(DataType::Image(None)),
            ImageExpr::Encode { .. } => (input.is_image() || input.is_null()).then_some(DataType::Binary),
            ImageExpr::Resize { w, h } => {
                if *w == 0 || *h == 0 {
                    return Err(ExprError::InvalidArgument(format!(
                        "image_resize needs a positive width and height, got {w}x{h}"
                    )));
                }
                match input {
                    DataType::Image(Some(mode)) | DataType::FixedShapeImage(mode, ..) => {
                        Some(DataType::FixedShapeImage(*mode, *h, *w))
                    }
                    DataType::Image(None) | DataType::Null => Some(DataType::Image(None)),
                    _ => None,
                }
            }
            ImageExpr::Crop => {
                let bbox_ok = match &types[1] {
                    DataType::FixedSizeList(inner, 4) | DataType::List(inner) => inner.is_integer(),
                    DataType::Null => true,
                    _ => false,
                };
                match input {
                    _ if !bbox_ok => None,
                    DataType::Image(mode) => Some(DataType::Image(*mode)),
                    DataType::FixedShapeImage(mode, ..) => Some(DataType::Image(Some(*mode))),
                    DataType::Null => Some(DataType::Image(None)),
                    _ => None,
                }
            }
        })
    }

    fn infer_partitioning(func: &PartitioningExpr, input: &DataType) -> ExprResult<Option<DataType>> {
        let is_date_like = matches!(input, DataType::Date | DataType::Timestamp(..) | DataType::Null);
        Ok(match func {
            PartitioningExpr::Days => is_date_like.then_some(DataType::Date),
            PartitioningExpr::Hours => {
                matches!(input, DataType::Timestamp(..) | DataType::Null).then_some(DataType::Int32)
            }
            PartitioningExpr::Months | PartitioningExpr::Years => is_date_like.then_some(DataType::Int32),
            PartitioningExpr::IcebergBucket(n) => {
                if *n <= 0 {
                    return Err(ExprError::InvalidArgument(format!(
                        "Expected a positive number of buckets for iceberg partitioning, got {n}"
                    )));
                }
                let hashable = input.is_integer()
                    || is_date_like
                    || matches!(input, DataType::Decimal128(..) | DataType::Utf8 | DataType::Binary);
                hashable.then_some(DataType::Int32)
            }
            PartitioningExpr::IcebergTruncate(w) => {
                if *w <= 0 {
                    return Err(ExprError::InvalidArgument(format!(
                        "Expected positive width for iceberg truncate partitioning, got {w}"
                    )));
                }
                let truncatable = input.is_integer()
                    || matches!(input, DataType::Decimal128(..) | DataType::Utf8 | DataType::Binary | DataType::Null);
                truncatable.then(|| input.clone())
            }
        })
    }
}

fn func_name(func: &Utf8Expr) -> &'static str {
    FunctionExpr::Utf8(*func).fn_name()
}

#[cfg(test)]
mod tests {
    use crate::analyzer::_tests::fixtures::{media_schema, orders_schema};
    use crate::expr::{col, lit, DownloadOptions, Expression, ImageFormat, LiteralValue, OnError};
    use crate::schema::{DataType, ImageMode, Schema};
    use crate::ExprError;

    fn dtype_in(schema: &Schema, expr: Expression) -> Result<DataType, ExprError> {
        expr.to_field(schema).map(|field| field.dtype)
    }

    #[test]
    fn string_functions() {
        let schema = orders_schema();
        assert_eq!(dtype_in(&schema, col("sku").str().contains("A")).unwrap(), DataType::Boolean);
        assert_eq!(dtype_in(&schema, col("sku").str().length()).unwrap(), DataType::UInt64);
        assert_eq!(dtype_in(&schema, col("sku").str().find("-")).unwrap(), DataType::Int64);
        assert_eq!(
            dtype_in(&schema, col("sku").str().split("-", false)).unwrap(),
            DataType::List(Box::new(DataType::Utf8))
        );
        assert_eq!(dtype_in(&schema, col("sku").str().left(2)).unwrap(), DataType::Utf8);
        assert!(dtype_in(&schema, col("sku").str().left("two")).is_err());
        assert!(matches!(
            dtype_in(&schema, col("price").str().upper()),
            Err(ExprError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn literal_regex_is_compiled() {
        let schema = orders_schema();
        assert!(dtype_in(&schema, col("sku").str().match_(r"^[A-Z]\d+$")).is_ok());
        match dtype_in(&schema, col("sku").str().match_("(unclosed")) {
            Err(ExprError::InvalidRegex { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected InvalidRegex, got {other:?}"),
        }
        // plain split does not treat the pattern as a regex
        assert!(dtype_in(&schema, col("sku").str().split("(", false)).is_ok());
        assert!(dtype_in(&schema, col("sku").str().split("(", true)).is_err());
    }

    #[test]
    fn temporal_functions() {
        let schema = orders_schema();
        assert_eq!(dtype_in(&schema, col("placed_at").dt().hour()).unwrap(), DataType::UInt32);
        assert_eq!(dtype_in(&schema, col("order_date").dt().year()).unwrap(), DataType::Int32);
        assert_eq!(dtype_in(&schema, col("placed_at").dt().date()).unwrap(), DataType::Date);
        assert!(dtype_in(&schema, col("order_date").dt().hour()).is_err());
        assert!(dtype_in(&schema, col("sku").dt().day()).is_err());
    }

    #[test]
    fn list_and_struct_functions() {
        let schema = orders_schema();
        assert_eq!(dtype_in(&schema, col("tags").list().join(",")).unwrap(), DataType::Utf8);
        assert_eq!(dtype_in(&schema, col("tags").list().lengths()).unwrap(), DataType::UInt64);
        assert_eq!(dtype_in(&schema, col("tags").list().get(0, LiteralValue::Null)).unwrap(), DataType::Utf8);
        assert!(dtype_in(&schema, col("tags").list().get(0, 5)).is_err());

        let city = col("shipping").struct_().get("city");
        let field = city.to_field(&schema).unwrap();
        assert_eq!(field.name, "city");
        assert_eq!(field.dtype, DataType::Utf8);
        assert!(matches!(
            dtype_in(&schema, col("shipping").struct_().get("country")),
            Err(ExprError::FieldNotFound { .. })
        ));
        assert_eq!(dtype_in(&schema, lit(LiteralValue::Null).struct_().get("city")).unwrap(), DataType::Null);
        assert!(dtype_in(&schema, col("sku").struct_().get("city")).is_err());
    }

    #[test]
    fn image_functions() {
        let schema = media_schema();
        assert_eq!(dtype_in(&schema, col("bytes").image().decode(OnError::Raise)).unwrap(), DataType::Image(None));
        assert_eq!(dtype_in(&schema, col("photo").image().encode(ImageFormat::Png)).unwrap(), DataType::Binary);
        assert_eq!(
            dtype_in(&schema, col("photo").image().resize(32, 16)).unwrap(),
            DataType::FixedShapeImage(ImageMode::RGB, 16, 32)
        );
        assert!(dtype_in(&schema, col("photo").image().resize(0, 16)).is_err());
        assert_eq!(
            dtype_in(&schema, col("thumb").image().crop([0, 0, 8, 8])).unwrap(),
            DataType::Image(Some(ImageMode::RGBA))
        );
        assert_eq!(
            dtype_in(&schema, col("photo").image().crop(col("bbox"))).unwrap(),
            DataType::Image(Some(ImageMode::RGB))
        );
        assert!(dtype_in(&schema, col("photo").image().crop(col("score"))).is_err());
    }

    #[test]
    fn json_and_url_functions() {
        let schema = media_schema();
        assert_eq!(dtype_in(&schema, col("payload").json().query(".a.b")).unwrap(), DataType::Utf8);
        assert!(dtype_in(&schema, col("payload").json().query(" ")).is_err());
        let download = col("url").url().download(DownloadOptions::default()).unwrap();
        assert_eq!(dtype_in(&schema, download).unwrap(), DataType::Binary);
    }

    #[test]
    fn partitioning_functions() {
        let orders = orders_schema();
        assert_eq!(dtype_in(&orders, col("placed_at").partitioning().days()).unwrap(), DataType::Date);
        assert_eq!(dtype_in(&orders, col("placed_at").partitioning().hours()).unwrap(), DataType::Int32);
        assert!(dtype_in(&orders, col("order_date").partitioning().hours()).is_err());
        assert_eq!(dtype_in(&orders, col("order_date").partitioning().months()).unwrap(), DataType::Int32);

        let media = media_schema();
        assert_eq!(dtype_in(&media, col("bucket_key").partitioning().iceberg_bucket(16)).unwrap(), DataType::Int32);
        assert!(matches!(
            dtype_in(&media, col("bucket_key").partitioning().iceberg_bucket(0)),
            Err(ExprError::InvalidArgument(_))
        ));
        assert_eq!(dtype_in(&media, col("url").partitioning().iceberg_truncate(4)).unwrap(), DataType::Utf8);
        assert!(dtype_in(&media, col("score").partitioning().iceberg_truncate(4)).is_err());
    }

    #[test]
    fn numeric_functions_keep_type() {
        let media = media_schema();
        assert_eq!(dtype_in(&media, col("score").abs()).unwrap(), DataType::Float32);
        assert_eq!(dtype_in(&media, col("score").round(2)).unwrap(), DataType::Float32);
        assert_eq!(dtype_in(&media, col("score").float().is_nan()).unwrap(), DataType::Boolean);
        assert!(dtype_in(&media, col("bucket_key").float().is_nan()).is_err());
        assert!(dtype_in(&media, lit("x").ceil()).is_err());
    }
}
