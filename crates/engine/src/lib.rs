//! `pricelist-engine`: normalized price-list catalog and price-per-unit ranking.
//!
//! Pure engine crate: no filesystem access. Loading and report writing live in
//! `pricelist-io`.

pub mod catalog;
pub mod error;
pub mod fields;
pub mod rank;
pub mod record;
pub mod search;

pub use catalog::Catalog;
pub use error::{MappingError, RankError};
pub use fields::{CanonicalField, ColumnMap, FieldMapping};
pub use rank::{rank, sort_ascending, Ranked};
pub use record::Record;
