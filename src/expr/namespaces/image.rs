use crate::expr::{lit, Expression, FunctionExpr, ImageExpr, ImageFormat, LiteralValue, OnError};
use crate::schema::DataType;

/// Crop region: either a fixed `[x, y, width, height]` for every row or an
/// expression yielding one box per row.
#[derive(Debug, Clone)]
pub enum CropBox {
    Fixed([u32; 4]),
    Expr(Expression),
}

impl From<[u32; 4]> for CropBox {
    fn from(bbox: [u32; 4]) -> Self {
        CropBox::Fixed(bbox)
    }
}

impl From<(u32, u32, u32, u32)> for CropBox {
    fn from((x, y, w, h): (u32, u32, u32, u32)) -> Self {
        CropBox::Fixed([x, y, w, h])
    }
}

impl From<Expression> for CropBox {
    fn from(expr: Expression) -> Self {
        CropBox::Expr(expr)
    }
}

impl CropBox {
    fn into_expression(self) -> Expression {
        match self {
            CropBox::Fixed(bbox) => {
                let values = bbox.iter().map(|v| LiteralValue::UInt64(u64::from(*v))).collect();
                lit(LiteralValue::List(values)).cast(DataType::FixedSizeList(Box::new(DataType::UInt64), 4))
            }
            CropBox::Expr(expr) => expr,
        }
    }
}

/// Methods that work on columns of images or encoded image bytes.
pub struct ExpressionImageNamespace {
    expr: Expression,
}

impl ExpressionImageNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    fn image(&self, func: ImageExpr, others: Vec<Expression>) -> Expression {
        self.expr.function(FunctionExpr::Image(func), others)
    }

    /// Decode binary data into images.
    pub fn decode(&self, on_error: OnError) -> Expression {
        self.image(ImageExpr::Decode { raise_on_error: on_error.raise_on_error() }, vec![])
    }

    /// Encode images into `format` bytes.
    pub fn encode(&self, format: ImageFormat) -> Expression {
        self.image(ImageExpr::Encode { format }, vec![])
    }

    pub fn resize(&self, w: u32, h: u32) -> Expression {
        self.image(ImageExpr::Resize { w, h }, vec![])
    }

    pub fn crop(&self, bbox: impl Into<CropBox>) -> Expression {
        self.image(ImageExpr::Crop, vec![bbox.into().into_expression()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, Expr};

    #[test]
    fn fixed_crop_box_is_cast_literal() {
        let expr = col("img").image().crop([1, 2, 30, 40]);
        let Expr::Function { func, inputs } = expr.expr() else {
            panic!("expected function, got {expr:?}");
        };
        assert_eq!(*func, FunctionExpr::Image(ImageExpr::Crop));
        match &*inputs[1] {
            Expr::Cast(child, dtype) => {
                assert_eq!(*dtype, DataType::FixedSizeList(Box::new(DataType::UInt64), 4));
                assert_eq!(
                    **child,
                    Expr::Literal(LiteralValue::List(vec![
                        LiteralValue::UInt64(1),
                        LiteralValue::UInt64(2),
                        LiteralValue::UInt64(30),
                        LiteralValue::UInt64(40),
                    ]))
                );
            }
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn crop_box_from_expression_passes_through() {
        let expr = col("img").image().crop(col("bbox"));
        let required: Vec<String> = expr.required_columns().into_iter().collect();
        assert_eq!(required, vec!["img", "bbox"]);
    }

    #[test]
    fn decode_records_error_policy() {
        let expr = col("bytes").image().decode(OnError::Null);
        assert_eq!(expr.to_string(), "image_decode(col(bytes), raise_on_error=false)");
    }
}
