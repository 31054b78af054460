//! Region catalog
//!
//! The fixed, ordered list of regions a fleet scan covers. The catalog is an
//! immutable value so tests can build reduced catalogs instead of patching a
//! global list.

use std::collections::HashSet;

/// Regions scanned by default, grouped by continent for display.
pub const DEFAULT_REGIONS: &[&str] = &[
    // United States
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    // Asia Pacific
    "ap-southeast-5",
    "ap-south-1",
    "ap-northeast-3",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    // Canada
    "ca-central-1",
    "ca-west-1",
    // Europe
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    // Middle East
    "me-south-1",
    "me-central-1",
    // South America
    "sa-east-1",
];

/// An ordered set of known region codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: Vec<String>,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_REGIONS.iter().copied())
    }
}

impl RegionCatalog {
    /// Build a catalog from region codes, keeping their order.
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
        }
    }

    /// The full catalog in display order.
    pub fn list_all(&self) -> &[String] {
        &self.regions
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Resolve the regions to scan.
    ///
    /// With no request the whole catalog is returned. Otherwise the requested
    /// codes are kept in the caller's order, unknown codes are dropped and
    /// duplicates pass through unchanged.
    pub fn filter(&self, requested: Option<&[String]>) -> Vec<String> {
        match requested {
            None => self.regions.clone(),
            Some(requested) => {
                let known: HashSet<&str> = self.regions.iter().map(String::as_str).collect();
                requested
                    .iter()
                    .filter(|r| known.contains(r.as_str()))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Requested codes that are not in the catalog, for operator warnings.
    pub fn unknown<'a>(&self, requested: &'a [String]) -> Vec<&'a str> {
        requested
            .iter()
            .filter(|r| !self.contains(r))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_catalog_has_all_regions() {
        let catalog = RegionCatalog::default();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.list_all()[0], "us-east-1");
        assert_eq!(catalog.list_all()[20], "sa-east-1");
    }

    #[test]
    fn filter_without_request_returns_everything() {
        let catalog = RegionCatalog::default();
        assert_eq!(catalog.filter(None), catalog.list_all().to_vec());
    }

    #[test]
    fn filter_keeps_request_order_and_drops_unknown() {
        let catalog = RegionCatalog::default();
        let requested = strings(&["eu-west-1", "mars-north-1", "us-east-1"]);

        assert_eq!(
            catalog.filter(Some(requested.as_slice())),
            strings(&["eu-west-1", "us-east-1"])
        );
    }

    #[test]
    fn filter_passes_duplicates_through() {
        let catalog = RegionCatalog::new(["r1", "r2"]);
        let requested = strings(&["r2", "r1", "r2"]);
        assert_eq!(catalog.filter(Some(requested.as_slice())), requested);
    }

    #[test]
    fn filter_with_empty_request_is_empty() {
        let catalog = RegionCatalog::default();
        assert!(catalog.filter(Some(&[][..])).is_empty());
    }

    #[test]
    fn filter_result_is_subset_of_catalog_and_request() {
        let catalog = RegionCatalog::new(["a", "b", "c"]);
        let requested = strings(&["c", "x", "a", "y"]);
        let filtered = catalog.filter(Some(requested.as_slice()));

        for region in &filtered {
            assert!(catalog.contains(region));
            assert!(requested.contains(region));
        }
        assert_eq!(filtered, strings(&["c", "a"]));
    }

    #[test]
    fn unknown_lists_rejected_codes() {
        let catalog = RegionCatalog::default();
        let requested = strings(&["us-east-1", "moon-1"]);
        assert_eq!(catalog.unknown(&requested), vec!["moon-1"]);
    }
}
