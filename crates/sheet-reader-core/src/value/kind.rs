//! Logical value kinds and type-name normalization

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Path or namespace qualifiers: `System.Int32`, `chrono::NaiveDateTime`
static QUALIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\w+(?:\.|::))+(?P<name>\w+)").expect("valid pattern"));

/// Optional wrappers: `Option<i32>`, `Nullable<int>`
static OPTIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:Option|Nullable)<(?P<name>\w+)>$").expect("valid pattern"));

/// Scalar kinds a cell can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Boolean,
    Char,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    DateTime,
    Duration,
}

impl ScalarKind {
    /// Short name used in messages
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Boolean => "bool",
            ScalarKind::Char => "char",
            ScalarKind::Int16 => "i16",
            ScalarKind::Int32 => "i32",
            ScalarKind::Int64 => "i64",
            ScalarKind::Float32 => "f32",
            ScalarKind::Float64 => "f64",
            ScalarKind::Decimal => "decimal",
            ScalarKind::DateTime => "date-time",
            ScalarKind::Duration => "duration",
        }
    }

    fn from_alias(alias: &str) -> Option<Self> {
        let kind = match alias {
            "string" | "String" | "str" => ScalarKind::String,
            "bool" | "Boolean" => ScalarKind::Boolean,
            "char" | "Char" => ScalarKind::Char,
            "short" | "Int16" | "i16" => ScalarKind::Int16,
            "int" | "Int32" | "i32" => ScalarKind::Int32,
            "long" | "Int64" | "i64" => ScalarKind::Int64,
            "float" | "Single" | "f32" => ScalarKind::Float32,
            "double" | "Double" | "f64" => ScalarKind::Float64,
            "decimal" | "Decimal" => ScalarKind::Decimal,
            "DateTime" | "NaiveDateTime" => ScalarKind::DateTime,
            "TimeSpan" | "Duration" | "TimeDelta" => ScalarKind::Duration,
            _ => return None,
        };
        Some(kind)
    }
}

/// A logical target kind, optionally nullable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueKind {
    /// Scalar kind
    pub scalar: ScalarKind,
    /// Whether a blank cell reads as "no value" rather than zero
    pub nullable: bool,
}

impl ValueKind {
    /// A non-nullable kind
    pub const fn new(scalar: ScalarKind) -> Self {
        Self {
            scalar,
            nullable: false,
        }
    }

    /// A nullable kind
    pub const fn nullable(scalar: ScalarKind) -> Self {
        Self {
            scalar,
            nullable: true,
        }
    }

    /// Resolve a kind from a type name
    ///
    /// Qualifiers are stripped and optional wrappers become a trailing `?`, so
    /// `System.Int32`, `Option<i32>`, `Nullable<int>` and `int?` are all
    /// understood.
    ///
    /// # Examples
    /// ```
    /// use sheet_reader_core::{ScalarKind, ValueKind};
    ///
    /// let kind = ValueKind::from_type_name("Option<chrono::NaiveDateTime>").unwrap();
    /// assert_eq!(kind, ValueKind::nullable(ScalarKind::DateTime));
    /// assert!(ValueKind::from_type_name("u8").is_err());
    /// ```
    pub fn from_type_name(name: &str) -> Result<Self> {
        let normalized = Self::normalize(name);
        let (alias, nullable) = match normalized.strip_suffix('?') {
            Some(alias) => (alias, true),
            None => (normalized.as_str(), false),
        };

        ScalarKind::from_alias(alias)
            .map(|scalar| Self { scalar, nullable })
            .ok_or_else(|| Error::UnsupportedTargetType(name.to_string()))
    }

    fn normalize(name: &str) -> String {
        let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        let unqualified = QUALIFIER.replace_all(&compact, "$name");
        OPTIONAL.replace(&unqualified, "$name?").into_owned()
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scalar.name())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
