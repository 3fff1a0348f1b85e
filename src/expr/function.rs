use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{config::IoConfig, ExprError};

/// Encoded image container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Tiff,
    Gif,
    Bmp,
}

impl FromStr for ImageFormat {
    type Err = ExprError;

    /// Case-insensitive: `"png"`, `"PNG"` and `"Png"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PNG" => Ok(ImageFormat::Png),
            "JPEG" | "JPG" => Ok(ImageFormat::Jpeg),
            "TIFF" => Ok(ImageFormat::Tiff),
            "GIF" => Ok(ImageFormat::Gif),
            "BMP" => Ok(ImageFormat::Bmp),
            _ => Err(ExprError::InvalidArgument(format!(
                "image_format must be one of PNG, JPEG, TIFF, GIF, BMP, but got: {s}"
            ))),
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
        };
        write!(f, "{s}")
    }
}

/// Failure policy for operations that can fail per row (decode, download).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnError {
    /// Fail the whole operation.
    #[default]
    Raise,
    /// Log the failure and produce a null for that row.
    Null,
}

impl OnError {
    pub fn raise_on_error(&self) -> bool {
        matches!(self, OnError::Raise)
    }
}

impl FromStr for OnError {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raise" => Ok(OnError::Raise),
            "null" => Ok(OnError::Null),
            other => Err(ExprError::Unsupported(format!("Unimplemented on_error option: {other}."))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericExpr {
    Abs,
    Ceil,
    Floor,
    Sign,
    Round(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatExpr {
    IsNan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utf8Expr {
    Contains,
    Match,
    EndsWith,
    StartsWith,
    Split { regex: bool },
    Extract { index: usize },
    ExtractAll { index: usize },
    Replace { regex: bool },
    Length,
    Lower,
    Upper,
    Lstrip,
    Rstrip,
    Reverse,
    Capitalize,
    Left,
    Right,
    Find,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalExpr {
    Date,
    Day,
    Hour,
    Month,
    Year,
    DayOfWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListExpr {
    Join,
    Lengths,
    /// Inputs: list, index, default.
    Get,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructExpr {
    Get(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageExpr {
    Decode { raise_on_error: bool },
    Encode { format: ImageFormat },
    Resize { w: u32, h: u32 },
    /// Inputs: image, bounding box.
    Crop,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsonExpr {
    Query(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UriExpr {
    Download {
        max_connections: u32,
        raise_on_error: bool,
        multi_thread: bool,
        io_config: IoConfig,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitioningExpr {
    Days,
    Hours,
    Months,
    Years,
    IcebergBucket(i32),
    IcebergTruncate(i64),
}

/// A named scalar function applied to one or more inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionExpr {
    Numeric(NumericExpr),
    Float(FloatExpr),
    Utf8(Utf8Expr),
    Temporal(TemporalExpr),
    List(ListExpr),
    Struct(StructExpr),
    Image(ImageExpr),
    Json(JsonExpr),
    Uri(UriExpr),
    Partitioning(PartitioningExpr),
}

impl FunctionExpr {
    pub fn fn_name(&self) -> &'static str {
        match self {
            FunctionExpr::Numeric(f) => match f {
                NumericExpr::Abs => "abs",
                NumericExpr::Ceil => "ceil",
                NumericExpr::Floor => "floor",
                NumericExpr::Sign => "sign",
                NumericExpr::Round(_) => "round",
            },
            FunctionExpr::Float(FloatExpr::IsNan) => "is_nan",
            FunctionExpr::Utf8(f) => match f {
                Utf8Expr::Contains => "utf8_contains",
                Utf8Expr::Match => "utf8_match",
                Utf8Expr::EndsWith => "utf8_endswith",
                Utf8Expr::StartsWith => "utf8_startswith",
                Utf8Expr::Split { .. } => "utf8_split",
                Utf8Expr::Extract { .. } => "utf8_extract",
                Utf8Expr::ExtractAll { .. } => "utf8_extract_all",
                Utf8Expr::Replace { .. } => "utf8_replace",
                Utf8Expr::Length => "utf8_length",
                Utf8Expr::Lower => "utf8_lower",
                Utf8Expr::Upper => "utf8_upper",
                Utf8Expr::Lstrip => "utf8_lstrip",
                Utf8Expr::Rstrip => "utf8_rstrip",
                Utf8Expr::Reverse => "utf8_reverse",
                Utf8Expr::Capitalize => "utf8_capitalize",
                Utf8Expr::Left => "utf8_left",
                Utf8Expr::Right => "utf8_right",
                Utf8Expr::Find => "utf8_find",
            },
            FunctionExpr::Temporal(f) => match f {
                TemporalExpr::Date => "dt_date",
                TemporalExpr::Day => "dt_day",
                TemporalExpr::Hour => "dt_hour",
                TemporalExpr::Month => "dt_month",
                TemporalExpr::Year => "dt_year",
                TemporalExpr::DayOfWeek => "dt_day_of_week",
            },
            FunctionExpr::List(f) => match f {
                ListExpr::Join => "list_join",
                ListExpr::Lengths => "list_lengths",
                ListExpr::Get => "list_get",
            },
            FunctionExpr::Struct(StructExpr::Get(_)) => "struct_get",
            FunctionExpr::Image(f) => match f {
                ImageExpr::Decode { .. } => "image_decode",
                ImageExpr::Encode { .. } => "image_encode",
                ImageExpr::Resize { .. } => "image_resize",
                ImageExpr::Crop => "image_crop",
            },
            FunctionExpr::Json(JsonExpr::Query(_)) => "json_query",
            FunctionExpr::Uri(UriExpr::Download { .. }) => "url_download",
            FunctionExpr::Partitioning(f) => match f {
                PartitioningExpr::Days => "partitioning_days",
                PartitioningExpr::Hours => "partitioning_hours",
                PartitioningExpr::Months => "partitioning_months",
                PartitioningExpr::Years => "partitioning_years",
                PartitioningExpr::IcebergBucket(_) => "partitioning_iceberg_bucket",
                PartitioningExpr::IcebergTruncate(_) => "partitioning_iceberg_truncate",
            },
        }
    }

    /// Non-expression parameters rendered after the inputs, e.g. `regex=true`.
    fn params(&self) -> Vec<String> {
        match self {
            FunctionExpr::Numeric(NumericExpr::Round(decimals)) => vec![format!("decimals={decimals}")],
            FunctionExpr::Utf8(Utf8Expr::Split { regex }) | FunctionExpr::Utf8(Utf8Expr::Replace { regex }) => {
                vec![format!("regex={regex}")]
            }
            FunctionExpr::Utf8(Utf8Expr::Extract { index }) | FunctionExpr::Utf8(Utf8Expr::ExtractAll { index }) => {
                vec![format!("index={index}")]
            }
            FunctionExpr::Struct(StructExpr::Get(name)) => vec![format!("name=\"{name}\"")],
            FunctionExpr::Image(ImageExpr::Decode { raise_on_error }) => vec![format!("raise_on_error={raise_on_error}")],
            FunctionExpr::Image(ImageExpr::Encode { format }) => vec![format!("format={format}")],
            FunctionExpr::Image(ImageExpr::Resize { w, h }) => vec![format!("w={w}"), format!("h={h}")],
            FunctionExpr::Json(JsonExpr::Query(query)) => vec![format!("query=\"{query}\"")],
            FunctionExpr::Uri(UriExpr::Download { max_connections, raise_on_error, multi_thread, .. }) => vec![
                format!("max_connections={max_connections}"),
                format!("raise_on_error={raise_on_error}"),
                format!("multi_thread={multi_thread}"),
            ],
            FunctionExpr::Partitioning(PartitioningExpr::IcebergBucket(n)) => vec![format!("n={n}")],
            FunctionExpr::Partitioning(PartitioningExpr::IcebergTruncate(w)) => vec![format!("w={w}")],
            _ => vec![],
        }
    }

    pub(crate) fn fmt_call(&self, f: &mut fmt::Formatter<'_>, inputs: &[impl Display]) -> fmt::Result {
        write!(f, "{}(", self.fn_name())?;
        let mut first = true;
        for input in inputs {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{input}")?;
            first = false;
        }
        for param in self.params() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
            first = false;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_format_parses_case_insensitively() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        let err = "webp".parse::<ImageFormat>().unwrap_err();
        assert!(err.to_string().contains("webp"));
    }

    #[test]
    fn on_error_parses_known_policies() {
        assert_eq!("raise".parse::<OnError>().unwrap(), OnError::Raise);
        assert_eq!("null".parse::<OnError>().unwrap(), OnError::Null);
        assert!(!OnError::Null.raise_on_error());
        match "ignore".parse::<OnError>() {
            Err(ExprError::Unsupported(message)) => assert_eq!(message, "Unimplemented on_error option: ignore."),
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }
}
