use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// Rigid-region indices for one chain, as supplied by callers.
///
/// A flat list describes a single folded domain; a nested list describes one
/// domain per inner list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RegionSpec {
    Flat(Vec<usize>),
    Nested(Vec<Vec<usize>>),
}

impl RegionSpec {
    /// Splits the region list into one index list per domain.
    pub fn into_domains(self) -> Vec<Vec<usize>> {
        match self {
            RegionSpec::Flat(indices) if indices.is_empty() => Vec::new(),
            RegionSpec::Flat(indices) => vec![indices],
            RegionSpec::Nested(domains) => domains.into_iter().filter(|d| !d.is_empty()).collect(),
        }
    }
}

impl From<Vec<usize>> for RegionSpec {
    fn from(indices: Vec<usize>) -> Self {
        RegionSpec::Flat(indices)
    }
}

impl From<Vec<Vec<usize>>> for RegionSpec {
    fn from(domains: Vec<Vec<usize>>) -> Self {
        RegionSpec::Nested(domains)
    }
}

/// The rigid domains of a single chain, as chain-local bead indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobularRegions {
    domains: Vec<Vec<usize>>,
}

impl GlobularRegions {
    pub fn new(spec: impl Into<RegionSpec>) -> Self {
        Self {
            domains: spec.into().into_domains(),
        }
    }

    pub fn domains(&self) -> &[Vec<usize>] {
        &self.domains
    }

    /// All rigid indices of the chain, sorted and deduplicated.
    pub fn flattened(&self) -> BTreeSet<usize> {
        self.domains.iter().flatten().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// The first index that does not fit a chain of `chain_len` beads.
    pub fn first_out_of_bounds(&self, chain_len: usize) -> Option<usize> {
        self.domains
            .iter()
            .flatten()
            .copied()
            .find(|&i| i >= chain_len)
    }
}

/// Chain id to rigid domains; chains without an entry are fully flexible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobularRegionMap {
    regions: HashMap<String, GlobularRegions>,
}

impl GlobularRegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chain_id: &str, regions: GlobularRegions) -> &mut Self {
        self.regions.insert(chain_id.to_string(), regions);
        self
    }

    pub fn with_chain(mut self, chain_id: &str, spec: impl Into<RegionSpec>) -> Self {
        self.insert(chain_id, GlobularRegions::new(spec));
        self
    }

    pub fn get(&self, chain_id: &str) -> Option<&GlobularRegions> {
        self.regions.get(chain_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GlobularRegions)> {
        self.regions.iter().map(|(id, r)| (id.as_str(), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_spec_becomes_a_single_domain() {
        let regions = GlobularRegions::new(vec![3usize, 4, 5]);
        assert_eq!(regions.domains(), &[vec![3, 4, 5]]);
    }

    #[test]
    fn nested_spec_keeps_domains_separate_and_drops_empty_ones() {
        let regions = GlobularRegions::new(vec![vec![0usize, 1], vec![], vec![7, 8]]);
        assert_eq!(regions.domains().len(), 2);
        assert_eq!(
            regions.flattened().into_iter().collect::<Vec<_>>(),
            vec![0, 1, 7, 8]
        );
    }

    #[test]
    fn empty_flat_spec_has_no_domains() {
        assert!(GlobularRegions::new(Vec::<usize>::new()).is_empty());
    }

    #[test]
    fn first_out_of_bounds_reports_offending_index() {
        let regions = GlobularRegions::new(vec![vec![0usize, 1], vec![9, 12]]);
        assert_eq!(regions.first_out_of_bounds(10), Some(12));
        assert_eq!(regions.first_out_of_bounds(13), None);
    }

    #[test]
    fn region_spec_deserializes_flat_and_nested_lists() {
        #[derive(Deserialize)]
        struct Wrapper {
            regions: RegionSpec,
        }
        let flat: Wrapper = toml::from_str("regions = [1, 2, 3]").unwrap();
        assert_eq!(flat.regions, RegionSpec::Flat(vec![1, 2, 3]));
        let nested: Wrapper = toml::from_str("regions = [[1, 2], [5]]").unwrap();
        assert_eq!(nested.regions, RegionSpec::Nested(vec![vec![1, 2], vec![5]]));
    }

    #[test]
    fn map_returns_regions_by_chain_id() {
        let map = GlobularRegionMap::new().with_chain("A", vec![vec![0usize, 1, 2]]);
        assert!(map.get("A").is_some());
        assert!(map.get("B").is_none());
    }
}
