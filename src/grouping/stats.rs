use crate::models::{GroupStats, SearchGroup};

/// Size bucket a group falls into, keyed by its original count
fn size_bucket(count: usize) -> &'static str {
    match count {
        0..=1 => "1",
        2..=3 => "2-3",
        4..=5 => "4-5",
        6..=10 => "6-10",
        _ => "10+",
    }
}

pub fn calculate_stats(groups: &[SearchGroup]) -> GroupStats {
    if groups.is_empty() {
        return GroupStats::default();
    }

    let counts: Vec<usize> = groups.iter().map(|g| g.count).collect();
    let sum: usize = counts.iter().sum();
    let average = (sum as f64 / counts.len() as f64).round() as usize;

    let mut stats = GroupStats {
        average_group_size: average,
        largest_group_size: counts.iter().copied().max().unwrap_or(0),
        smallest_group_size: counts.iter().copied().min().unwrap_or(0),
        ..Default::default()
    };

    for count in counts {
        *stats
            .group_size_distribution
            .entry(size_bucket(count).to_string())
            .or_insert(0) += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemType, SearchableItem};

    fn group_of(n: usize) -> SearchGroup {
        let items = (0..n)
            .map(|i| SearchableItem::new(i.to_string(), ItemType::Page, "x"))
            .collect();
        SearchGroup::new(format!("g{n}"), "g", items, 0)
    }

    #[test]
    fn test_empty_stats() {
        let stats = calculate_stats(&[]);
        assert_eq!(stats, GroupStats::default());
        assert!(stats.group_size_distribution.is_empty());
    }

    #[test]
    fn test_sizes_and_histogram() {
        let groups = vec![group_of(1), group_of(2), group_of(3), group_of(12)];
        let stats = calculate_stats(&groups);

        assert_eq!(stats.average_group_size, 5); // 18 / 4 = 4.5
        assert_eq!(stats.largest_group_size, 12);
        assert_eq!(stats.smallest_group_size, 1);
        assert_eq!(stats.group_size_distribution["1"], 1);
        assert_eq!(stats.group_size_distribution["2-3"], 2);
        assert_eq!(stats.group_size_distribution["10+"], 1);
        assert!(!stats.group_size_distribution.contains_key("4-5"));
    }

    #[test]
    fn test_histogram_uses_original_count() {
        let mut group = group_of(7);
        group.truncate(2);
        let stats = calculate_stats(&[group]);
        assert_eq!(stats.group_size_distribution["6-10"], 1);
        assert_eq!(stats.largest_group_size, 7);
    }
}
