//! Query suggestions

/// Display names of the searchable content types, Chinese then English
pub const SUGGESTION_LABELS: [&str; 10] = [
    "页面", "订单", "产品", "用户", "设置", "Pages", "Orders", "Products", "Users", "Settings",
];

/// Labels containing `query` (case-insensitive), in source order, at most `max`
pub fn suggestions(query: &str, max: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    SUGGESTION_LABELS
        .iter()
        .filter(|label| label.to_lowercase().contains(&needle))
        .take(max)
        .map(|label| label.to_string())
        .collect()
}
