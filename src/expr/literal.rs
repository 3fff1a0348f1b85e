use std::fmt::{self, Display};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{schema::{DataType, TimeUnit}, ExprError, ExprResult};

/// A constant value embedded in an expression.
///
/// Floats use `OrderedFloat` so literals (and the expressions holding them)
/// can be hashed and compared structurally, NaN included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Utf8(String),
    Binary(Vec<u8>),
    Int32(i32),
    Int64(i64),
    UInt64(u64),
    Float64(OrderedFloat<f64>),
    /// Unscaled value, precision, scale.
    Decimal(i128, u8, i8),
    /// Days since 1970-01-01.
    Date(i32),
    Time(i64, TimeUnit),
    Timestamp(i64, TimeUnit, Option<String>),
    /// A single list value.
    List(Vec<LiteralValue>),
    /// A column of values, e.g. the right-hand side of `is_in`.
    Series(Vec<LiteralValue>),
}

fn unix_epoch() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

impl LiteralValue {
    /// Build a series literal, failing when the values have no common type.
    pub fn series(values: Vec<LiteralValue>) -> ExprResult<LiteralValue> {
        Self::element_type(&values, "series")?;
        Ok(LiteralValue::Series(values))
    }

    /// Build a list literal, failing when the values have no common type.
    pub fn list(values: Vec<LiteralValue>) -> ExprResult<LiteralValue> {
        Self::element_type(&values, "list")?;
        Ok(LiteralValue::List(values))
    }

    /// Decimal from sign, base-10 digits and exponent: `(-1)^negative * digits * 10^exponent`.
    pub fn decimal(negative: bool, digits: &[u8], exponent: i32) -> ExprResult<LiteralValue> {
        if !(-38..=38).contains(&exponent) {
            return ExprError::InvalidArgument(format!("decimal exponent {exponent} exceeds Decimal128 limits")).err();
        }
        let mut unscaled: i128 = 0;
        for digit in digits {
            if *digit > 9 {
                return ExprError::InvalidArgument(format!("decimal digit out of range: {digit}")).err();
            }
            unscaled = unscaled
                .checked_mul(10)
                .and_then(|v| v.checked_add(*digit as i128))
                .ok_or_else(|| ExprError::InvalidArgument("decimal does not fit in 128 bits".into()))?;
        }
        let mut digit_count = digits.len().max(1) as i32;
        let scale = if exponent < 0 {
            -exponent
        } else {
            for _ in 0..exponent {
                unscaled = unscaled
                    .checked_mul(10)
                    .ok_or_else(|| ExprError::InvalidArgument("decimal does not fit in 128 bits".into()))?;
            }
            digit_count += exponent;
            0
        };
        let precision = digit_count.max(scale).max(1);
        if precision > 38 || scale > i8::MAX as i32 {
            return ExprError::InvalidArgument(format!(
                "decimal precision {precision} with scale {scale} exceeds Decimal128 limits"
            ))
            .err();
        }
        if negative {
            unscaled = -unscaled;
        }
        Ok(LiteralValue::Decimal(unscaled, precision as u8, scale as i8))
    }

    fn element_type(values: &[LiteralValue], kind: &str) -> ExprResult<DataType> {
        let mut dtype = DataType::Null;
        for value in values {
            let next = value.dtype();
            dtype = DataType::supertype(&dtype, &next).ok_or_else(|| {
                ExprError::type_mismatch(&format!("{kind} literal"), "values with a common type", &[dtype.clone(), next.clone()])
            })?;
        }
        Ok(dtype)
    }

    pub fn dtype(&self) -> DataType {
        match self {
            LiteralValue::Null => DataType::Null,
            LiteralValue::Boolean(_) => DataType::Boolean,
            LiteralValue::Utf8(_) => DataType::Utf8,
            LiteralValue::Binary(_) => DataType::Binary,
            LiteralValue::Int32(_) => DataType::Int32,
            LiteralValue::Int64(_) => DataType::Int64,
            LiteralValue::UInt64(_) => DataType::UInt64,
            LiteralValue::Float64(_) => DataType::Float64,
            LiteralValue::Decimal(_, precision, scale) => DataType::Decimal128(*precision, *scale),
            LiteralValue::Date(_) => DataType::Date,
            LiteralValue::Time(_, unit) => DataType::Time(*unit),
            LiteralValue::Timestamp(_, unit, tz) => DataType::Timestamp(*unit, tz.clone()),
            LiteralValue::List(values) => {
                DataType::List(Box::new(Self::element_type(values, "list").unwrap_or(DataType::Null)))
            }
            LiteralValue::Series(values) => Self::element_type(values, "series").unwrap_or(DataType::Null),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub(crate) fn date_value(days: i32) -> Option<NaiveDate> {
        unix_epoch().checked_add_signed(chrono::Duration::days(days as i64))
    }

    pub(crate) fn timestamp_value(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
        let per_second = unit.ticks_per_second();
        let secs = value.div_euclid(per_second);
        let nanos = value.rem_euclid(per_second) * (1_000_000_000 / per_second);
        DateTime::from_timestamp(secs, nanos as u32).map(|dt| dt.naive_utc())
    }

    pub(crate) fn time_value(value: i64, unit: TimeUnit) -> Option<NaiveTime> {
        let per_second = unit.ticks_per_second();
        let secs = u32::try_from(value.div_euclid(per_second)).ok()?;
        let nanos = value.rem_euclid(per_second) * (1_000_000_000 / per_second);
        NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos as u32)
    }

    pub(crate) fn format_decimal(unscaled: i128, scale: i8) -> String {
        if scale <= 0 {
            return unscaled.to_string();
        }
        let digits = unscaled.unsigned_abs().to_string();
        let scale = scale as usize;
        let padded = if digits.len() <= scale { format!("{}{}", "0".repeat(scale - digits.len() + 1), digits) } else { digits };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        let sign = if unscaled < 0 { "-" } else { "" };
        format!("{sign}{int_part}.{frac_part}")
    }
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "Null"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Utf8(s) => write!(f, "\"{s}\""),
            LiteralValue::Binary(bytes) => write!(f, "Binary[{}]", bytes.len()),
            LiteralValue::Int32(v) => write!(f, "{v}"),
            LiteralValue::Int64(v) => write!(f, "{v}"),
            LiteralValue::UInt64(v) => write!(f, "{v}"),
            LiteralValue::Float64(v) => write!(f, "{:?}", v.into_inner()),
            LiteralValue::Decimal(v, _, scale) => write!(f, "{}", Self::format_decimal(*v, *scale)),
            LiteralValue::Date(days) => match Self::date_value(*days) {
                Some(date) => write!(f, "{date}"),
                None => write!(f, "Date({days})"),
            },
            LiteralValue::Time(v, unit) => match Self::time_value(*v, *unit) {
                Some(time) => write!(f, "{time}"),
                None => write!(f, "Time({v}{unit})"),
            },
            LiteralValue::Timestamp(v, unit, tz) => {
                match Self::timestamp_value(*v, *unit) {
                    Some(ts) => write!(f, "{ts}")?,
                    None => write!(f, "Timestamp({v}{unit})")?,
                }
                match tz {
                    Some(tz) => write!(f, " {tz}"),
                    None => Ok(()),
                }
            }
            LiteralValue::List(values) | LiteralValue::Series(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! impl_literal_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for LiteralValue {
                fn from(value: $t) -> Self {
                    LiteralValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_literal_from!(
    bool => Boolean,
    i32 => Int32,
    i64 => Int64,
    u32 => UInt64,
    u64 => UInt64,
    String => Utf8,
    Vec<u8> => Binary,
);

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::Utf8(value.to_string())
    }
}

impl From<&[u8]> for LiteralValue {
    fn from(value: &[u8]) -> Self {
        LiteralValue::Binary(value.to_vec())
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Float64(OrderedFloat(value))
    }
}

impl From<f32> for LiteralValue {
    fn from(value: f32) -> Self {
        LiteralValue::Float64(OrderedFloat(value as f64))
    }
}

impl From<NaiveDate> for LiteralValue {
    fn from(value: NaiveDate) -> Self {
        LiteralValue::Date(value.signed_duration_since(unix_epoch()).num_days() as i32)
    }
}

impl From<NaiveDateTime> for LiteralValue {
    fn from(value: NaiveDateTime) -> Self {
        LiteralValue::Timestamp(value.and_utc().timestamp_micros(), TimeUnit::Microseconds, None)
    }
}

impl From<DateTime<Utc>> for LiteralValue {
    fn from(value: DateTime<Utc>) -> Self {
        LiteralValue::Timestamp(value.timestamp_micros(), TimeUnit::Microseconds, Some("UTC".to_string()))
    }
}

impl From<NaiveTime> for LiteralValue {
    fn from(value: NaiveTime) -> Self {
        let micros = value.num_seconds_from_midnight() as i64 * 1_000_000 + (value.nanosecond() as i64 / 1_000);
        LiteralValue::Time(micros, TimeUnit::Microseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_literal_counts_days_from_epoch() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 11).unwrap();
        assert_eq!(LiteralValue::from(date), LiteralValue::Date(10));
        assert_eq!(LiteralValue::Date(10).to_string(), "1970-01-11");
        let before = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        assert_eq!(LiteralValue::from(before), LiteralValue::Date(-1));
    }

    #[test]
    fn timestamp_literal_uses_microseconds() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 30, 0).unwrap();
        let lit = LiteralValue::from(ts);
        assert_eq!(lit.dtype(), DataType::Timestamp(TimeUnit::Microseconds, None));
        assert_eq!(lit.to_string(), "2024-03-01 12:30:00");

        let utc = ts.and_utc();
        assert_eq!(
            LiteralValue::from(utc).dtype(),
            DataType::Timestamp(TimeUnit::Microseconds, Some("UTC".into()))
        );
    }

    #[test]
    fn time_literal() {
        let time = NaiveTime::from_hms_micro_opt(1, 2, 3, 4).unwrap();
        let lit = LiteralValue::from(time);
        assert_eq!(lit, LiteralValue::Time(3_723_000_004, TimeUnit::Microseconds));
        assert_eq!(lit.to_string(), "01:02:03.000004");
    }

    #[test]
    fn decimal_from_digits() {
        // 123.45
        let lit = LiteralValue::decimal(false, &[1, 2, 3, 4, 5], -2).unwrap();
        assert_eq!(lit, LiteralValue::Decimal(12345, 5, 2));
        assert_eq!(lit.to_string(), "123.45");

        // -0.05
        let lit = LiteralValue::decimal(true, &[5], -2).unwrap();
        assert_eq!(lit.dtype(), DataType::Decimal128(2, 2));
        assert_eq!(lit.to_string(), "-0.05");

        // 12E+2
        let lit = LiteralValue::decimal(false, &[1, 2], 2).unwrap();
        assert_eq!(lit, LiteralValue::Decimal(1200, 4, 0));

        assert!(LiteralValue::decimal(false, &[12], 0).is_err());
        assert!(LiteralValue::decimal(false, &[1; 39], 0).is_err());
    }

    #[test]
    fn decimal_exponent_out_of_range() {
        for exponent in [i32::MIN, -39, 39, i32::MAX] {
            match LiteralValue::decimal(false, &[1], exponent) {
                Err(ExprError::InvalidArgument(msg)) => assert!(msg.contains("exponent")),
                other => panic!("expected InvalidArgument for {exponent}, got {other:?}"),
            }
        }
        assert!(LiteralValue::decimal(false, &[0], i32::MAX).is_err());
        assert_eq!(LiteralValue::decimal(false, &[1], -38).unwrap(), LiteralValue::Decimal(1, 38, 38));
    }

    #[test]
    fn series_requires_common_type() {
        let series = LiteralValue::series(vec![1i32.into(), 2i64.into(), LiteralValue::Null]).unwrap();
        assert_eq!(series.dtype(), DataType::Int64);
        assert!(LiteralValue::series(vec![1i64.into(), "a".into()]).is_err());
    }

    #[test]
    fn list_literal_dtype() {
        let list = LiteralValue::list(vec![1u64.into(), 2u64.into()]).unwrap();
        assert_eq!(list.dtype(), DataType::List(Box::new(DataType::UInt64)));
        assert_eq!(list.to_string(), "[1, 2]");
    }

    #[test]
    fn float_display_keeps_fraction() {
        assert_eq!(LiteralValue::from(1.0f64).to_string(), "1.0");
        assert_eq!(LiteralValue::from(f64::NAN), LiteralValue::from(f64::NAN));
    }
}
