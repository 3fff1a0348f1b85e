use std::fmt::{self, Display};

use crate::schema::DataType;

pub type ExprResult<T> = Result<T, ExprError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Two fields or projection entries share an output name.
    DuplicateName(String),
    /// A union met a name collision and no rename prefix was given.
    DuplicateNameInUnion { name: String, seen: String, current: String },
    /// An output name is not part of a projection.
    NameNotFound(String),
    /// A column is not part of the schema being resolved against.
    FieldNotFound { name: String, available: Vec<String> },
    /// An operation received inputs of types it does not accept.
    TypeMismatch { op: String, expected: String, got: Vec<DataType> },
    InvalidRegex { pattern: String, message: String },
    InvalidArgument(String),
    Unsupported(String),
    Serialization(String),
}

impl ExprError {
    pub fn type_mismatch(op: &str, expected: &str, got: &[DataType]) -> Self {
        ExprError::TypeMismatch {
            op: op.to_string(),
            expected: expected.to_string(),
            got: got.to_vec(),
        }
    }

    pub fn err<T>(self) -> ExprResult<T> {
        Err(self)
    }
}

impl Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::DuplicateName(name) => {
                write!(f, "Expressions must all have unique names; saw {name} twice")
            }
            ExprError::DuplicateNameInUnion { name, seen, current } => write!(
                f,
                "Duplicate name found with different expression. name: {name}, seen: {seen}, current: {current}"
            ),
            ExprError::NameNotFound(name) => write!(f, "{name} not found in ExpressionsProjection"),
            ExprError::FieldNotFound { name, available } => {
                write!(f, "Column \"{name}\" not found in schema: [{}]", available.join(", "))
            }
            ExprError::TypeMismatch { op, expected, got } => {
                let got = got.iter().map(|dtype| dtype.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "{op} expects {expected}, got ({got})")
            }
            ExprError::InvalidRegex { pattern, message } => {
                write!(f, "Invalid regex pattern '{pattern}': {message}")
            }
            ExprError::InvalidArgument(message) => write!(f, "Invalid argument: {message}"),
            ExprError::Unsupported(message) => write!(f, "Unsupported: {message}"),
            ExprError::Serialization(message) => write!(f, "Serialization error: {message}"),
        }
    }
}

impl std::error::Error for ExprError {}

impl From<serde_json::Error> for ExprError {
    fn from(value: serde_json::Error) -> Self {
        ExprError::Serialization(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_lists_input_types() {
        let err = ExprError::type_mismatch("utf8_lower", "Utf8", &[DataType::Int64]);
        assert_eq!(err.to_string(), "utf8_lower expects Utf8, got (Int64)");
    }

    #[test]
    fn duplicate_name_message() {
        assert_eq!(
            ExprError::DuplicateName("x".into()).to_string(),
            "Expressions must all have unique names; saw x twice"
        );
    }
}
