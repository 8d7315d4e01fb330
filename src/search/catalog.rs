//! Candidate sources for the scorer

use crate::models::{ItemType, SearchableItem};
use crate::search::error::SearchResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read-only source of candidate items, one collection per type
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Full candidate list for a type; unknown types yield an empty list
    async fn fetch_candidates(&self, item_type: &ItemType) -> SearchResult<Vec<SearchableItem>>;

    /// Provider name, for logging
    fn name(&self) -> &str;
}

/// Fixed in-memory catalogs
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    entries: HashMap<ItemType, Vec<SearchableItem>>,
}

impl StaticCatalog {
    /// Catalog with no entries
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Replace the candidates for one type
    pub fn with_items(mut self, item_type: ItemType, items: Vec<SearchableItem>) -> Self {
        self.entries.insert(item_type, items);
        self
    }

    pub fn items(&self, item_type: &ItemType) -> &[SearchableItem] {
        self.entries.get(item_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StaticCatalog {
    /// The built-in MES catalogs
    fn default() -> Self {
        Self::empty()
            .with_items(ItemType::Page, page_catalog())
            .with_items(ItemType::Order, order_catalog())
            .with_items(ItemType::Product, product_catalog())
            .with_items(ItemType::User, user_catalog())
            .with_items(ItemType::Setting, setting_catalog())
    }
}

#[async_trait]
impl CandidateProvider for StaticCatalog {
    async fn fetch_candidates(&self, item_type: &ItemType) -> SearchResult<Vec<SearchableItem>> {
        Ok(self.items(item_type).to_vec())
    }

    fn name(&self) -> &str {
        "static"
    }
}

fn page_catalog() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new("page-dashboard", ItemType::Page, "仪表板")
            .with_description("生产概览与关键指标")
            .with_url("/dashboard")
            .with_icon("📊")
            .with_category("导航")
            .with_keywords(["dashboard", "首页", "概览", "home"]),
        SearchableItem::new("page-orders", ItemType::Page, "订单管理")
            .with_description("查看和管理生产订单")
            .with_url("/orders")
            .with_icon("📦")
            .with_category("业务")
            .with_keywords(["orders", "工单", "生产订单"]),
        SearchableItem::new("page-products", ItemType::Page, "产品管理")
            .with_description("产品目录与物料清单")
            .with_url("/products")
            .with_icon("🏭")
            .with_category("业务")
            .with_keywords(["products", "物料", "BOM"]),
        SearchableItem::new("page-reports", ItemType::Page, "生产报表")
            .with_description("产量、良率与设备效率分析")
            .with_url("/reports")
            .with_icon("📈")
            .with_category("导航")
            .with_keywords(["reports", "报表", "OEE"]),
        SearchableItem::new("page-team", ItemType::Page, "团队管理")
            .with_description("团队成员与角色权限")
            .with_url("/teams")
            .with_icon("👥")
            .with_category("系统")
            .with_keywords(["team", "成员", "角色", "权限"]),
        SearchableItem::new("page-settings", ItemType::Page, "系统设置")
            .with_description("语言、主题与个人偏好")
            .with_url("/settings")
            .with_icon("⚙️")
            .with_category("系统")
            .with_keywords(["settings", "配置", "偏好"]),
    ]
}

fn order_catalog() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new("order-1001", ItemType::Order, "订单 #SO-2024-1001")
            .with_description("客户：华东精密 · 精密轴承 A100 × 500")
            .with_url("/orders/1001")
            .with_icon("📦")
            .with_category("待处理")
            .with_keywords(["SO-2024-1001", "华东精密", "pending"]),
        SearchableItem::new("order-1002", ItemType::Order, "订单 #SO-2024-1002")
            .with_description("客户：北方机电 · 伺服电机 M200 × 120")
            .with_url("/orders/1002")
            .with_icon("📦")
            .with_category("生产中")
            .with_keywords(["SO-2024-1002", "北方机电", "in progress"]),
        SearchableItem::new("order-1003", ItemType::Order, "加急订单 #SO-2024-1003")
            .with_description("客户：南方重工 · 控制面板 C300 × 40")
            .with_url("/orders/1003")
            .with_icon("🚚")
            .with_category("待处理")
            .with_keywords(["SO-2024-1003", "南方重工", "urgent", "加急"]),
        SearchableItem::new("order-1004", ItemType::Order, "#SO-2024-1004")
            .with_description("客户：西部装备 · 传动齿轮 G400 × 2000")
            .with_url("/orders/1004")
            .with_icon("✅")
            .with_category("已完成")
            .with_keywords(["SO-2024-1004", "西部装备", "completed", "订单"]),
    ]
}

fn product_catalog() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new("product-a100", ItemType::Product, "精密轴承 A100")
            .with_description("高精度深沟球轴承，内径 20mm")
            .with_url("/products/a100")
            .with_icon("🔩")
            .with_category("零部件")
            .with_keywords(["A100", "bearing", "轴承"]),
        SearchableItem::new("product-m200", ItemType::Product, "伺服电机 M200")
            .with_description("交流伺服电机，额定功率 2kW")
            .with_url("/products/m200")
            .with_icon("⚡")
            .with_category("电机")
            .with_keywords(["M200", "motor", "servo"]),
        SearchableItem::new("product-c300", ItemType::Product, "控制面板 C300")
            .with_description("触摸式 HMI 控制面板")
            .with_url("/products/c300")
            .with_icon("🔌")
            .with_category("电气")
            .with_keywords(["C300", "HMI", "panel"]),
        SearchableItem::new("product-g400", ItemType::Product, "传动齿轮 G400")
            .with_description("渗碳淬火斜齿轮，模数 2")
            .with_url("/products/g400")
            .with_icon("⚙️")
            .with_category("零部件")
            .with_keywords(["G400", "gear", "齿轮"]),
    ]
}

fn user_catalog() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new("user-1", ItemType::User, "张伟")
            .with_description("生产经理 · zhang.wei@example.com")
            .with_url("/users/1")
            .with_icon("👤")
            .with_category("管理员")
            .with_keywords(["admin", "manager", "zhang"]),
        SearchableItem::new("user-2", ItemType::User, "李娜")
            .with_description("质量工程师 · li.na@example.com")
            .with_url("/users/2")
            .with_icon("👤")
            .with_category("成员")
            .with_keywords(["quality", "质检", "li"]),
        SearchableItem::new("user-3", ItemType::User, "王强")
            .with_description("生产计划员 · wang.qiang@example.com")
            .with_url("/users/3")
            .with_icon("👤")
            .with_category("成员")
            .with_keywords(["planner", "排产", "wang"]),
    ]
}

fn setting_catalog() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new("setting-profile", ItemType::Setting, "个人资料")
            .with_description("修改姓名、邮箱与头像")
            .with_url("/settings/profile")
            .with_icon("🪪")
            .with_category("账户")
            .with_keywords(["profile", "账户", "头像"]),
        SearchableItem::new("setting-password", ItemType::Setting, "密码与安全")
            .with_description("修改密码与双重验证")
            .with_url("/settings/password")
            .with_icon("🔐")
            .with_category("账户")
            .with_keywords(["password", "security", "安全"]),
        SearchableItem::new("setting-team", ItemType::Setting, "团队设置")
            .with_description("团队名称与成员邀请")
            .with_url("/settings/team")
            .with_icon("🤝")
            .with_category("团队")
            .with_keywords(["team", "invite", "邀请"]),
        SearchableItem::new("setting-language", ItemType::Setting, "语言偏好")
            .with_description("界面语言切换（中文 / English）")
            .with_url("/settings/language")
            .with_icon("🌐")
            .with_category("偏好")
            .with_keywords(["language", "i18n", "语言"]),
        SearchableItem::new("setting-notifications", ItemType::Setting, "通知设置")
            .with_description("订单状态变更与生产告警通知")
            .with_url("/settings/notifications")
            .with_icon("🔔")
            .with_category("偏好")
            .with_keywords(["notification", "提醒"]),
    ]
}
