//! Deduplication gate: has this image been cataloged already?

use super::record::CraterRecord;
use super::Catalog;

/// First record whose image id matches exactly.
pub fn already_processed<'a>(catalog: &'a Catalog, image_id: &str) -> Option<&'a CraterRecord> {
    catalog.records().iter().find(|r| r.image_id == image_id)
}

/// Every record for `image_id`, in catalog order.
pub fn existing_records(catalog: &Catalog, image_id: &str) -> Vec<CraterRecord> {
    catalog
        .records()
        .iter()
        .filter(|r| r.image_id == image_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::Token;

    fn record(image_id: &str, token: &str) -> CraterRecord {
        CraterRecord {
            image_id: image_id.into(),
            token: Token(token.into()),
            ..CraterRecord::default()
        }
    }

    #[test]
    fn test_exact_match_only() {
        let catalog = Catalog::from_records(
            "unused.csv",
            vec![record("a.png", "1"), record("b.png", "2"), record("a.png", "1")],
        );
        assert_eq!(already_processed(&catalog, "a.png").map(|r| r.token.0.as_str()), Some("1"));
        assert!(already_processed(&catalog, "A.png").is_none());
        assert!(already_processed(&catalog, "./a.png").is_none());
        assert_eq!(existing_records(&catalog, "a.png").len(), 2);
        assert!(existing_records(&catalog, "c.png").is_empty());
    }
}
