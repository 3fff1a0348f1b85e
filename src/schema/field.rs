use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::schema::DataType;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub dtype: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        Self { name: name.into(), dtype }
    }

    pub fn rename(&self, name: impl Into<String>) -> Field {
        Field { name: name.into(), dtype: self.dtype.clone() }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.dtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_keeps_type() {
        let a = Field::new("a", DataType::Float64);
        let b = a.rename("b");
        assert_eq!(b.name, "b");
        assert_eq!(b.dtype, DataType::Float64);
        assert_eq!(b.to_string(), "b#Float64");
    }
}
