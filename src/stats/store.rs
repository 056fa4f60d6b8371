use std::collections::HashMap;

use super::{CountryDelta, CountryStat, StatsSummary};

/// Per-country query counts.
///
/// Entries keep insertion order; `index` maps a country code to its slot.
#[derive(Debug, Default)]
pub struct CountryStats {
    entries: Vec<CountryStat>,
    index: HashMap<String, usize>,
}

impl CountryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, country_code: &str) -> Option<&CountryStat> {
        self.index.get(country_code).map(|&slot| &self.entries[slot])
    }

    /// Sum of all query counts
    pub fn total_queries(&self) -> u64 {
        self.entries.iter().map(|stat| stat.queries).sum()
    }

    /// Add `delta.count` to its country, creating the entry on first sighting.
    ///
    /// Name and distance of an existing entry are left as first recorded.
    pub fn record(&mut self, delta: CountryDelta) {
        match self.index.get(&delta.country_code) {
            Some(&slot) => {
                let stat = &mut self.entries[slot];
                stat.queries = stat.queries.saturating_add(delta.count);
            }
            None => {
                self.index
                    .insert(delta.country_code.clone(), self.entries.len());
                self.entries.push(delta.into());
            }
        }
    }

    /// Closest, furthest and weighted average distance, `None` without data
    pub fn summarize(&self) -> Option<StatsSummary> {
        let mut by_distance: Vec<&CountryStat> = self.entries.iter().collect();
        // stable, ties keep insertion order
        by_distance.sort_by_key(|stat| stat.distance);

        let closest = by_distance.first()?;
        let furthest = by_distance.last()?;

        let (weighted, queries) = self
            .entries
            .iter()
            .fold((0.0_f64, 0_u64), |(weighted, queries), stat| {
                (
                    weighted + stat.queries as f64 * stat.distance as f64,
                    queries.saturating_add(stat.queries),
                )
            });

        let average_distance = if queries == 0 {
            0
        } else {
            (weighted / queries as f64).round() as u64
        };

        Some(StatsSummary {
            furthest_distance: furthest.distance,
            closest_distance: closest.distance,
            average_distance,
        })
    }

    /// Every entry in insertion order, `None` without data
    pub fn list_all(&self) -> Option<Vec<CountryStat>> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.clone())
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(code: &str, distance: u64, count: u64) -> CountryDelta {
        CountryDelta {
            country_code: code.to_string(),
            country_name: format!("name of {code}"),
            distance,
            count,
        }
    }

    #[test]
    fn test_repeat_country_accumulates() {
        let mut stats = CountryStats::new();
        stats.record(delta("AR", 0, 3));
        stats.record(delta("AR", 0, 2));

        assert_eq!(stats.len(), 1);
        assert_eq!(stats.get("AR").unwrap().queries, 5);
        assert_eq!(stats.total_queries(), 5);
    }

    #[test]
    fn test_first_sighting_keeps_name_and_distance() {
        let mut stats = CountryStats::new();
        stats.record(delta("ES", 10_004, 1));
        stats.record(CountryDelta::single("ES", "other", 1));

        let es = stats.get("ES").unwrap();
        assert_eq!(es.country_name, "name of ES");
        assert_eq!(es.distance, 10_004);
        assert_eq!(es.queries, 2);
    }

    #[test]
    fn test_summary() {
        let mut stats = CountryStats::new();
        stats.record(delta("US", 100, 1));
        stats.record(delta("AR", 0, 1));
        stats.record(delta("BR", 50, 2));

        assert_eq!(
            stats.summarize(),
            Some(StatsSummary {
                furthest_distance: 100,
                closest_distance: 0,
                average_distance: 50,
            })
        );
    }

    #[test]
    fn test_average_rounds_instead_of_truncating() {
        let mut stats = CountryStats::new();
        stats.record(delta("AR", 0, 1));
        stats.record(delta("UY", 201, 1));
        stats.record(delta("CL", 1_136, 1));

        // (0 + 201 + 1136) / 3 = 445.67
        assert_eq!(stats.summarize().unwrap().average_distance, 446);
    }

    #[test]
    fn test_summary_leaves_entries_untouched() {
        let mut stats = CountryStats::new();
        stats.record(delta("AU", 13_076, 1));
        stats.record(delta("AR", 0, 1));
        stats.record(delta("ES", 10_005, 1));

        stats.summarize();
        stats.record(delta("AU", 13_076, 4));

        let codes: Vec<_> = stats
            .list_all()
            .unwrap()
            .into_iter()
            .map(|stat| stat.country_code)
            .collect();
        assert_eq!(codes, vec!["AU", "AR", "ES"]);
        assert_eq!(stats.get("AU").unwrap().queries, 5);
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn test_single_entry_summary() {
        let mut stats = CountryStats::new();
        stats.record(delta("IN", 15_813, 7));

        let summary = stats.summarize().unwrap();
        assert_eq!(summary.closest_distance, 15_813);
        assert_eq!(summary.furthest_distance, 15_813);
        assert_eq!(summary.average_distance, 15_813);
    }

    #[test]
    fn test_empty_store_has_no_data() {
        let stats = CountryStats::new();
        assert_eq!(stats.summarize(), None);
        assert_eq!(stats.list_all(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut stats = CountryStats::new();
        stats.record(delta("AR", 0, 1));
        stats.clear();
        stats.clear();

        assert!(stats.is_empty());
        assert_eq!(stats.summarize(), None);
        assert_eq!(stats.list_all(), None);
        assert!(stats.get("AR").is_none());

        stats.record(delta("AR", 0, 1));
        assert_eq!(stats.get("AR").unwrap().queries, 1);
    }
}
