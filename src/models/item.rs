use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Content kind of a searchable item.
///
/// The five canonical tags are the ones the scorer knows catalogs for;
/// `Action` only ever arrives from client-originated lists. Anything else is
/// carried through untouched as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    #[strum(serialize = "page")]
    Page,
    #[strum(serialize = "order")]
    Order,
    #[strum(serialize = "product")]
    Product,
    #[strum(serialize = "user")]
    User,
    #[strum(serialize = "setting")]
    Setting,
    #[strum(serialize = "action")]
    Action,
    #[strum(default)]
    Other(String),
}

impl ItemType {
    /// Searchable tags, in default priority order
    pub const CANONICAL: [ItemType; 5] = [
        ItemType::Page,
        ItemType::Order,
        ItemType::Product,
        ItemType::User,
        ItemType::Setting,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Page => "page",
            ItemType::Order => "order",
            ItemType::Product => "product",
            ItemType::User => "user",
            ItemType::Setting => "setting",
            ItemType::Action => "action",
            ItemType::Other(raw) => raw,
        }
    }

    /// Whether the scorer has a candidate catalog for this tag
    pub fn is_searchable(&self) -> bool {
        Self::CANONICAL.contains(self)
    }

    /// Bucket for items that arrive without a type
    pub fn unknown() -> Self {
        ItemType::Other("unknown".to_string())
    }

    /// Lenient parse: blank tags become `unknown`, unrecognized tags `Other`
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return ItemType::unknown();
        }
        // EnumString falls back to `Other`, so this never fails
        ItemType::from_str(trimmed).unwrap_or_else(|_| ItemType::Other(trimmed.to_string()))
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        ItemType::parse(&value)
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        value.as_str().to_string()
    }
}

/// A candidate result, as held by a catalog or handed to the grouping engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableItem {
    pub id: String,

    #[serde(rename = "type", default = "ItemType::unknown")]
    pub item_type: ItemType,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Match-only terms, never rendered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Relevance computed during matching
    #[serde(skip)]
    pub score: u32,
}

impl SearchableItem {
    pub fn new(id: impl Into<String>, item_type: ItemType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type,
            title: title.into(),
            description: String::new(),
            url: None,
            icon: None,
            category: None,
            keywords: Vec::new(),
            score: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Composite key used for deduplication: same id under two types is two items
    pub fn dedup_key(&self) -> (ItemType, String) {
        (self.item_type.clone(), self.id.clone())
    }

    /// Category, if one is set and non-blank
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// The public projection of a matched item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedItem {
    pub id: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    pub url: Option<String>,

    pub icon: Option<String>,

    pub category: Option<String>,
}

impl From<SearchableItem> for ProjectedItem {
    fn from(item: SearchableItem) -> Self {
        Self {
            id: item.id,
            item_type: item.item_type,
            title: item.title,
            description: item.description,
            url: item.url,
            icon: item.icon,
            category: item.category,
        }
    }
}

impl From<ProjectedItem> for SearchableItem {
    fn from(item: ProjectedItem) -> Self {
        Self {
            id: item.id,
            item_type: item.item_type,
            title: item.title,
            description: item.description,
            url: item.url,
            icon: item.icon,
            category: item.category,
            keywords: Vec::new(),
            score: 0,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_parsing() {
        assert_eq!(ItemType::parse("page"), ItemType::Page);
        assert_eq!(ItemType::parse("ORDER"), ItemType::Order);
        assert_eq!(ItemType::parse("action"), ItemType::Action);
        assert_eq!(ItemType::parse("report"), ItemType::Other("report".to_string()));
        assert_eq!(ItemType::parse(" "), ItemType::Other("unknown".to_string()));
    }

    #[test]
    fn test_item_type_round_trips_as_string() {
        let json = serde_json::to_string(&ItemType::Product).unwrap();
        assert_eq!(json, "\"product\"");

        let other: ItemType = serde_json::from_str("\"workflow\"").unwrap();
        assert_eq!(other.as_str(), "workflow");
        assert!(!other.is_searchable());
    }

    #[test]
    fn test_null_title_becomes_empty() {
        let item: SearchableItem =
            serde_json::from_str(r#"{"id":"1","type":"page","title":null}"#).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_projection_drops_keywords_and_score() {
        let mut item = SearchableItem::new("p1", ItemType::Page, "仪表板").with_keywords(["dashboard"]);
        item.score = 130;

        let value = serde_json::to_value(ProjectedItem::from(item)).unwrap();
        assert!(value.get("keywords").is_none());
        assert!(value.get("score").is_none());
        assert_eq!(value["type"], "page");
    }

    #[test]
    fn test_dedup_key_includes_type() {
        let page = SearchableItem::new("1", ItemType::Page, "a");
        let order = SearchableItem::new("1", ItemType::Order, "a");
        assert_ne!(page.dedup_key(), order.dedup_key());
        assert_eq!(page.dedup_key(), (ItemType::Page, "1".to_string()));
    }

    #[test]
    fn test_item_type_display_matches_wire_tag() {
        assert_eq!(ItemType::Order.to_string(), "order");
        assert_eq!(ItemType::Setting.to_string(), "setting");
        assert_eq!(ItemType::Other("workflow".to_string()).to_string(), "workflow");
        assert_eq!(format!("type-{}", ItemType::Page), "type-page");
    }
}
