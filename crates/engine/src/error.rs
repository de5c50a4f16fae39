use std::fmt;

use crate::fields::CanonicalField;

/// Rejected alias configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A canonical field has no aliases at all.
    NoAliases(CanonicalField),
    /// An alias is the empty string.
    EmptyAlias(CanonicalField),
    /// The same header spelling is claimed by two canonical fields.
    SharedAlias {
        alias: String,
        first: CanonicalField,
        second: CanonicalField,
    },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAliases(field) => write!(f, "field '{field}' has no aliases"),
            Self::EmptyAlias(field) => write!(f, "field '{field}' has an empty alias"),
            Self::SharedAlias { alias, first, second } => {
                write!(f, "alias '{alias}' is used by both '{first}' and '{second}'")
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// Failure to compute a price-per-unit rank for a record.
#[derive(Debug, Clone, PartialEq)]
pub enum RankError {
    /// Price or weight text is not a number.
    InvalidNumber {
        field: CanonicalField,
        value: String,
        source_file: String,
    },
    /// Weight parsed to zero.
    ZeroWeight { value: String, source_file: String },
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { field, value, source_file } => {
                write!(f, "{source_file}: cannot parse {field} '{value}' as a number")
            }
            Self::ZeroWeight { value, source_file } => {
                write!(f, "{source_file}: weight '{value}' is zero, per-unit price is undefined")
            }
        }
    }
}

impl std::error::Error for RankError {}
