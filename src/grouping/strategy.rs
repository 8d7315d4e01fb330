use crate::grouping::config::GroupingConfig;
use crate::models::{SearchGroup, SearchableItem};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied partitioning function
pub type CustomGrouper =
    Arc<dyn Fn(&[SearchableItem], &GroupingConfig) -> Vec<SearchGroup> + Send + Sync>;

/// How items are partitioned into groups
#[derive(Clone, Default)]
pub enum GroupingStrategy {
    #[default]
    Type,
    Category,
    Hybrid,
    Intelligent,
    /// Falls back to `Type` when no grouper is supplied
    Custom(Option<CustomGrouper>),
}

impl GroupingStrategy {
    /// Map a wire name; anything unrecognized groups by type
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "category" => GroupingStrategy::Category,
            "hybrid" => GroupingStrategy::Hybrid,
            "intelligent" => GroupingStrategy::Intelligent,
            "custom" => GroupingStrategy::Custom(None),
            _ => GroupingStrategy::Type,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupingStrategy::Type => "type",
            GroupingStrategy::Category => "category",
            GroupingStrategy::Hybrid => "hybrid",
            GroupingStrategy::Intelligent => "intelligent",
            GroupingStrategy::Custom(_) => "custom",
        }
    }

    pub fn custom<F>(grouper: F) -> Self
    where
        F: Fn(&[SearchableItem], &GroupingConfig) -> Vec<SearchGroup> + Send + Sync + 'static,
    {
        GroupingStrategy::Custom(Some(Arc::new(grouper)))
    }
}

impl fmt::Debug for GroupingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingStrategy::Custom(grouper) => f
                .debug_tuple("Custom")
                .field(&grouper.as_ref().map(|_| "<fn>"))
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(GroupingStrategy::from_name("category").name(), "category");
        assert_eq!(GroupingStrategy::from_name("HYBRID").name(), "hybrid");
        assert_eq!(GroupingStrategy::from_name("intelligent").name(), "intelligent");
        assert!(matches!(
            GroupingStrategy::from_name("custom"),
            GroupingStrategy::Custom(None)
        ));
        assert_eq!(GroupingStrategy::from_name("alphabetical").name(), "type");
    }
}
