use crate::model::PriceTable;

/// Best-effort name suggestion when a focus country misses exact lookup.
///
/// Case-insensitive equality wins over substring containment. This lives
/// outside the analyzer: lookup there stays case-sensitive exact match.
pub fn suggest_country<'a>(table: &'a PriceTable, query: &str) -> Option<&'a str> {
    if query.is_empty() {
        return None;
    }
    let needle = query.to_lowercase();
    let mut containment: Option<&str> = None;

    for record in &table.records {
        let hay = record.country.to_lowercase();
        if hay == needle {
            return Some(&record.country);
        }
        if containment.is_none() && (hay.contains(&needle) || needle.contains(&hay)) {
            containment = Some(&record.country);
        }
    }

    containment
}
