use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::schema::{Field, TimeUnit};

/// Pixel layout of an image column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMode {
    L,
    LA,
    RGB,
    RGBA,
}

impl Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageMode::L => "L",
            ImageMode::LA => "LA",
            ImageMode::RGB => "RGB",
            ImageMode::RGBA => "RGBA",
        };
        write!(f, "{s}")
    }
}

/// Logical type of a column.
///
/// Nested types (`List`, `FixedSizeList`, `Struct`) carry their children so
/// that resolution can look through them, e.g. `explode` on `List[Int64]`
/// yields `Int64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// Precision and scale.
    Decimal128(u8, i8),
    Utf8,
    Binary,
    /// Days since 1970-01-01.
    Date,
    Time(TimeUnit),
    Timestamp(TimeUnit, Option<String>),
    Duration(TimeUnit),
    List(Box<DataType>),
    FixedSizeList(Box<DataType>, usize),
    Struct(Vec<Field>),
    Image(Option<ImageMode>),
    /// Mode, height, width.
    FixedShapeImage(ImageMode, u32, u32),
}

impl DataType {
    pub fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    pub fn is_integer(&self) -> bool {
        self.integer_width().is_some()
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_floating() || matches!(self, DataType::Decimal128(..))
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::Time(_) | DataType::Timestamp(..) | DataType::Duration(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, DataType::Image(_) | DataType::FixedShapeImage(..))
    }

    /// Types that support ordering comparisons and min/max.
    pub fn is_comparable(&self) -> bool {
        self.is_numeric()
            || self.is_temporal()
            || matches!(self, DataType::Null | DataType::Boolean | DataType::Utf8 | DataType::Binary)
    }

    /// Element type of a list-like type.
    pub fn list_inner(&self) -> Option<&DataType> {
        match self {
            DataType::List(inner) | DataType::FixedSizeList(inner, _) => Some(inner),
            _ => None,
        }
    }

    /// `(signed, bits)` for integer types.
    fn integer_width(&self) -> Option<(bool, u8)> {
        match self {
            DataType::Int8 => Some((true, 8)),
            DataType::Int16 => Some((true, 16)),
            DataType::Int32 => Some((true, 32)),
            DataType::Int64 => Some((true, 64)),
            DataType::UInt8 => Some((false, 8)),
            DataType::UInt16 => Some((false, 16)),
            DataType::UInt32 => Some((false, 32)),
            DataType::UInt64 => Some((false, 64)),
            _ => None,
        }
    }

    fn integer_of(signed: bool, bits: u8) -> DataType {
        match (signed, bits) {
            (true, 8) => DataType::Int8,
            (true, 16) => DataType::Int16,
            (true, 32) => DataType::Int32,
            (true, _) => DataType::Int64,
            (false, 8) => DataType::UInt8,
            (false, 16) => DataType::UInt16,
            (false, 32) => DataType::UInt32,
            (false, _) => DataType::UInt64,
        }
    }

    /// Common type two inputs can both be represented as, if any.
    ///
    /// Integers widen (mixing signed and unsigned picks a signed type wide
    /// enough for both, falling back to `Float64` past 64 bits), integers and
    /// floats meet at a float, `Null` yields the other side and temporal types
    /// meet at the finer unit. Strings and binaries only match themselves.
    pub fn supertype(a: &DataType, b: &DataType) -> Option<DataType> {
        use DataType::*;
        if a == b {
            return Some(a.clone());
        }
        match (a, b) {
            (Null, other) | (other, Null) => Some(other.clone()),

            (x, y) if x.is_integer() && y.is_integer() => {
                let (sa, ba) = x.integer_width()?;
                let (sb, bb) = y.integer_width()?;
                if sa == sb {
                    return Some(Self::integer_of(sa, ba.max(bb)));
                }
                let (signed_bits, unsigned_bits) = if sa { (ba, bb) } else { (bb, ba) };
                if signed_bits > unsigned_bits {
                    Some(Self::integer_of(true, signed_bits))
                } else if unsigned_bits < 64 {
                    Some(Self::integer_of(true, unsigned_bits * 2))
                } else {
                    Some(Float64)
                }
            }

            (Float32, Float64) | (Float64, Float32) => Some(Float64),
            (Float32, x) | (x, Float32) if x.is_integer() => match x.integer_width() {
                Some((_, bits)) if bits <= 16 => Some(Float32),
                _ => Some(Float64),
            },
            (Float64, x) | (x, Float64) if x.is_integer() => Some(Float64),

            (Decimal128(pa, sa), Decimal128(pb, sb)) => {
                let scale = (*sa).max(*sb);
                let int_digits = (*pa as i16 - *sa as i16).max(*pb as i16 - *sb as i16);
                let precision = (int_digits + scale as i16).clamp(1, 38) as u8;
                Some(Decimal128(precision, scale))
            }
            (Decimal128(p, s), x) | (x, Decimal128(p, s)) if x.is_integer() => Some(Decimal128(*p, *s)),
            (Decimal128(..), x) | (x, Decimal128(..)) if x.is_floating() => Some(Float64),

            (Date, Timestamp(unit, tz)) | (Timestamp(unit, tz), Date) => Some(Timestamp(*unit, tz.clone())),
            (Timestamp(ua, tza), Timestamp(ub, tzb)) if tza == tzb => {
                Some(Timestamp(TimeUnit::finest(*ua, *ub), tza.clone()))
            }
            (Duration(ua), Duration(ub)) => Some(Duration(TimeUnit::finest(*ua, *ub))),
            (Time(ua), Time(ub)) => Some(Time(TimeUnit::finest(*ua, *ub))),

            (List(x), List(y)) | (List(x), FixedSizeList(y, _)) | (FixedSizeList(x, _), List(y)) => {
                Some(List(Box::new(Self::supertype(x, y)?)))
            }
            (FixedSizeList(x, n), FixedSizeList(y, m)) => {
                let inner = Self::supertype(x, y)?;
                if n == m {
                    Some(FixedSizeList(Box::new(inner), *n))
                } else {
                    Some(List(Box::new(inner)))
                }
            }

            (Image(_), Image(_)) => Some(Image(None)),
            (Image(mode), FixedShapeImage(fixed, ..)) | (FixedShapeImage(fixed, ..), Image(mode)) => match mode {
                Some(m) if m == fixed => Some(Image(Some(*m))),
                _ => Some(Image(None)),
            },

            _ => None,
        }
    }

    /// Whether a value of this type may be cast to `target`.
    pub fn can_cast_to(&self, target: &DataType) -> bool {
        use DataType::*;
        if self == target || self.is_null() {
            return true;
        }
        match (self, target) {
            (Struct(_) | List(_) | FixedSizeList(..) | Image(_) | FixedShapeImage(..), Utf8) => false,
            (_, Utf8) => true,
            (Utf8, t) => t.is_numeric() || t.is_temporal() || matches!(t, Boolean | Binary),
            (s, t) if (s.is_numeric() || *s == Boolean) && (t.is_numeric() || *t == Boolean) => true,
            (s, t) if s.is_integer() && t.is_temporal() => true,
            (s, t) if s.is_temporal() && t.is_integer() => true,
            (Date, Timestamp(..)) | (Timestamp(..), Date) => true,
            (Timestamp(..), Timestamp(..)) | (Time(_), Time(_)) | (Duration(_), Duration(_)) => true,
            (Timestamp(..), Time(_)) => true,
            (List(s) | FixedSizeList(s, _), List(t)) => s.can_cast_to(t),
            (List(s), FixedSizeList(t, _)) => s.can_cast_to(t),
            (FixedSizeList(s, n), FixedSizeList(t, m)) => n == m && s.can_cast_to(t),
            (Struct(from), Struct(to)) => {
                from.len() == to.len()
                    && from.iter().zip(to.iter()).all(|(a, b)| a.name == b.name && a.dtype.can_cast_to(&b.dtype))
            }
            (Image(_) | FixedShapeImage(..), Image(_) | FixedShapeImage(..)) => true,
            _ => false,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Decimal128(p, s) => write!(f, "Decimal128({p}, {s})"),
            DataType::Time(unit) => write!(f, "Time[{unit}]"),
            DataType::Timestamp(unit, None) => write!(f, "Timestamp[{unit}]"),
            DataType::Timestamp(unit, Some(tz)) => write!(f, "Timestamp[{unit}; {tz}]"),
            DataType::Duration(unit) => write!(f, "Duration[{unit}]"),
            DataType::List(inner) => write!(f, "List[{inner}]"),
            DataType::FixedSizeList(inner, size) => write!(f, "FixedSizeList[{inner}; {size}]"),
            DataType::Struct(fields) => {
                write!(f, "Struct[")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.dtype)?;
                }
                write!(f, "]")
            }
            DataType::Image(None) => write!(f, "Image[MIXED]"),
            DataType::Image(Some(mode)) => write!(f, "Image[{mode}]"),
            DataType::FixedShapeImage(mode, h, w) => write!(f, "Image[{mode}; {h} x {w}]"),
            other => write!(f, "{other:?}"),
        }
    }
}
