use crate::catalog::Catalog;
use crate::error::RankError;
use crate::rank::{sort_ascending, Ranked};
use crate::record::Record;

/// Records whose name contains `query`, ignoring case, in catalog order.
/// Records without a name never match.
pub fn matching<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Record> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|record| {
            record
                .name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Matching records ranked by price per unit, cheapest first.
pub fn find<'a>(catalog: &'a Catalog, query: &str) -> Result<Vec<Ranked<'a>>, RankError> {
    sort_ascending(matching(catalog, query))
}
