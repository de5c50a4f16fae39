//! Canonical fields and the header aliases that map onto them.
//!
//! Price lists from different suppliers spell the same column differently
//! (`название`, `товар`, `наименование`, ...). A [`FieldMapping`] holds, for each
//! canonical field, an ordered alias list. Matching is exact and case-sensitive.
//! When a header row carries several aliases of one field, the alias listed
//! first in the mapping wins.

use crate::error::MappingError;

// =============================================================================
// CanonicalField
// =============================================================================

/// Normalized attribute name used internally regardless of source spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Name,
    Price,
    Weight,
}

impl CanonicalField {
    /// Every canonical field, in resolution order.
    pub const ALL: [CanonicalField; 3] = [Self::Name, Self::Price, Self::Weight];

    fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Price => 1,
            Self::Weight => 2,
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Price => write!(f, "price"),
            Self::Weight => write!(f, "weight"),
        }
    }
}

pub const DEFAULT_NAME_ALIASES: [&str; 4] = ["название", "продукт", "товар", "наименование"];
pub const DEFAULT_PRICE_ALIASES: [&str; 2] = ["цена", "розница"];
pub const DEFAULT_WEIGHT_ALIASES: [&str; 3] = ["фасовка", "масса", "вес"];

// =============================================================================
// FieldMapping
// =============================================================================

/// Canonical field -> ordered alias list. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    aliases: [Vec<String>; 3],
}

impl Default for FieldMapping {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            aliases: [
                owned(&DEFAULT_NAME_ALIASES),
                owned(&DEFAULT_PRICE_ALIASES),
                owned(&DEFAULT_WEIGHT_ALIASES),
            ],
        }
    }
}

impl FieldMapping {
    /// Build a custom mapping. Each list must be non-empty, contain no empty
    /// strings, and no alias may belong to two fields.
    pub fn from_aliases(
        name: Vec<String>,
        price: Vec<String>,
        weight: Vec<String>,
    ) -> Result<Self, MappingError> {
        let mapping = Self { aliases: [name, price, weight] };

        for field in CanonicalField::ALL {
            let list = mapping.aliases(field);
            if list.is_empty() {
                return Err(MappingError::NoAliases(field));
            }
            if list.iter().any(|a| a.is_empty()) {
                return Err(MappingError::EmptyAlias(field));
            }
        }

        for (i, first) in CanonicalField::ALL.iter().enumerate() {
            for second in &CanonicalField::ALL[i + 1..] {
                if let Some(alias) = mapping
                    .aliases(*first)
                    .iter()
                    .find(|a| mapping.aliases(*second).contains(a))
                {
                    return Err(MappingError::SharedAlias {
                        alias: alias.clone(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }

        Ok(mapping)
    }

    /// Aliases for `field`, highest priority first.
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        &self.aliases[field.index()]
    }

    /// Which canonical field a raw header spells, if any.
    pub fn resolve_header(&self, header: &str) -> Option<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .find(|field| self.aliases(*field).iter().any(|a| a == header))
    }

    /// Resolve a file's header row to column positions.
    ///
    /// For each field the first alias (in mapping order) present in `headers`
    /// wins. A header name repeated in the row resolves to its last column,
    /// matching dictionary-row semantics where later columns overwrite earlier
    /// ones.
    pub fn resolve_columns<S: AsRef<str>>(&self, headers: &[S]) -> ColumnMap {
        let mut columns = [None; 3];
        for field in CanonicalField::ALL {
            columns[field.index()] = self.aliases(field).iter().find_map(|alias| {
                headers.iter().rposition(|h| h.as_ref() == alias.as_str())
            });
        }
        ColumnMap { columns }
    }
}

// =============================================================================
// ColumnMap
// =============================================================================

/// Column positions of the canonical fields within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnMap {
    columns: [Option<usize>; 3],
}

impl ColumnMap {
    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns[field.index()]
    }

    /// True when no canonical field was recognized.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolve_default_aliases() {
        let mapping = FieldMapping::default();
        assert_eq!(mapping.resolve_header("товар"), Some(CanonicalField::Name));
        assert_eq!(mapping.resolve_header("розница"), Some(CanonicalField::Price));
        assert_eq!(mapping.resolve_header("масса"), Some(CanonicalField::Weight));
        assert_eq!(mapping.resolve_header("артикул"), None);
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let mapping = FieldMapping::default();
        assert_eq!(mapping.resolve_header("Цена"), None);
        assert_eq!(mapping.resolve_header("ВЕС"), None);
        assert_eq!(mapping.resolve_header(" цена"), None);
    }

    #[test]
    fn first_configured_alias_wins() {
        let mapping = FieldMapping::default();
        // "наименование" appears first in the row but "название" has priority
        let headers = ["наименование", "цена", "название", "вес"];
        let cols = mapping.resolve_columns(&headers);
        assert_eq!(cols.column(CanonicalField::Name), Some(2));
        assert_eq!(cols.column(CanonicalField::Price), Some(1));
        assert_eq!(cols.column(CanonicalField::Weight), Some(3));
    }

    #[test]
    fn price_priority_over_retail() {
        let mapping = FieldMapping::default();
        let headers = ["розница", "товар", "цена"];
        let cols = mapping.resolve_columns(&headers);
        assert_eq!(cols.column(CanonicalField::Price), Some(2));
    }

    #[test]
    fn unresolved_fields_are_absent() {
        let mapping = FieldMapping::default();
        let cols = mapping.resolve_columns(&["продукт", "артикул"]);
        assert_eq!(cols.column(CanonicalField::Name), Some(0));
        assert_eq!(cols.column(CanonicalField::Price), None);
        assert_eq!(cols.column(CanonicalField::Weight), None);
        assert!(!cols.is_empty());

        let none = mapping.resolve_columns(&["a", "b"]);
        assert!(none.is_empty());
    }

    #[test]
    fn repeated_header_uses_last_column() {
        let mapping = FieldMapping::default();
        let cols = mapping.resolve_columns(&["цена", "товар", "цена"]);
        assert_eq!(cols.column(CanonicalField::Price), Some(2));
    }

    #[test]
    fn custom_aliases() {
        let mapping = FieldMapping::from_aliases(
            strings(&["product", "name"]),
            strings(&["price"]),
            strings(&["kg"]),
        )
        .unwrap();
        assert_eq!(mapping.aliases(CanonicalField::Name), &["product", "name"]);
        assert_eq!(mapping.resolve_header("kg"), Some(CanonicalField::Weight));
        assert_eq!(mapping.resolve_header("название"), None);
    }

    #[test]
    fn reject_empty_alias_list() {
        let err = FieldMapping::from_aliases(vec![], strings(&["p"]), strings(&["w"])).unwrap_err();
        assert_eq!(err, MappingError::NoAliases(CanonicalField::Name));
    }

    #[test]
    fn reject_empty_alias() {
        let err =
            FieldMapping::from_aliases(strings(&["n"]), strings(&["p", ""]), strings(&["w"])).unwrap_err();
        assert_eq!(err, MappingError::EmptyAlias(CanonicalField::Price));
    }

    #[test]
    fn reject_shared_alias() {
        let err = FieldMapping::from_aliases(
            strings(&["n"]),
            strings(&["x", "p"]),
            strings(&["w", "x"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("'x'"));
        assert!(err.to_string().contains("'price'"));
        assert!(err.to_string().contains("'weight'"));
    }
}
