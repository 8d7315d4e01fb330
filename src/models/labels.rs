//! Static display tables for item types and categories
//!
//! Every lookup has an explicit fallback, so unknown tags and free-text
//! categories still render.

use crate::models::ItemType;

/// Priority assigned to anything without a configured rank
pub const UNKNOWN_PRIORITY: u32 = 999;

/// Bucket name used when an item carries no category
pub const UNCATEGORIZED: &str = "其他";

pub fn type_label(item_type: &ItemType) -> &str {
    match item_type {
        ItemType::Page => "页面",
        ItemType::Order => "订单",
        ItemType::Product => "产品",
        ItemType::User => "用户",
        ItemType::Setting => "设置",
        ItemType::Action => "操作",
        ItemType::Other(raw) => raw,
    }
}

pub fn type_description(item_type: &ItemType) -> String {
    match item_type {
        ItemType::Page => "系统页面和功能模块".to_string(),
        ItemType::Order => "生产订单和工单".to_string(),
        ItemType::Product => "产品目录和物料".to_string(),
        ItemType::User => "团队成员和联系人".to_string(),
        ItemType::Setting => "账户与系统设置".to_string(),
        ItemType::Action => "快捷操作".to_string(),
        ItemType::Other(raw) => format!("{}相关结果", raw),
    }
}

pub fn type_icon(item_type: &ItemType) -> &'static str {
    match item_type {
        ItemType::Page => "📋",
        ItemType::Order => "📦",
        ItemType::Product => "🏭",
        ItemType::User => "👤",
        ItemType::Setting => "⚙️",
        ItemType::Action => "⚡",
        ItemType::Other(_) => "📄",
    }
}

/// Default inter-type ordering; lower sorts first
pub fn type_priority(item_type: &ItemType) -> u32 {
    match item_type {
        ItemType::Page => 0,
        ItemType::Order => 1,
        ItemType::Product => 2,
        ItemType::User => 3,
        ItemType::Setting => 4,
        ItemType::Action | ItemType::Other(_) => UNKNOWN_PRIORITY,
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "导航" => "🧭",
        "业务" => "💼",
        "系统" => "🖥️",
        "待处理" => "⏳",
        "生产中" => "🔧",
        "已完成" => "✅",
        "零部件" => "🔩",
        "电机" => "⚡",
        "电气" => "🔌",
        "管理员" => "🛡️",
        "成员" => "👥",
        "账户" => "🔐",
        "团队" => "🤝",
        "偏好" => "🎨",
        _ => "📁",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_falls_back_to_raw_tag() {
        let other = ItemType::Other("workflow".to_string());
        assert_eq!(type_label(&other), "workflow");
        assert_eq!(type_icon(&other), "📄");
        assert_eq!(type_priority(&other), UNKNOWN_PRIORITY);
    }

    #[test]
    fn test_canonical_priorities_are_ordered() {
        let priorities: Vec<u32> = ItemType::CANONICAL.iter().map(type_priority).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_category_icon_fallback() {
        assert_eq!(category_icon("业务"), "💼");
        assert_eq!(category_icon("anything"), "📁");
    }
}
