//! 每日精选数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::actions::product_location;
use super::image::ImageResolver;

/// 商品（由外部目录提供，只读使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub id: i64,
    #[validate(length(min = 1, message = "商品名称不能为空"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "价格不能为负数"))]
    pub price: f64,
    /// 折扣前价格，仅用于决定是否显示划线价
    #[serde(default)]
    #[validate(range(min = 0.0, message = "原价不能为负数"))]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// 折扣百分比
    #[serde(default)]
    #[validate(range(max = 100, message = "折扣必须在 0-100 之间"))]
    pub discount: u8,
    /// 为 true 时不参与首页随机展示
    #[serde(default)]
    pub hidden_on_home: bool,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0, message = "评分必须在 0-5 之间"))]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// 原价高于现价时才显示划线价
    pub fn strikethrough_price(&self) -> Option<f64> {
        self.original_price.filter(|original| *original > self.price)
    }
}

/// 当前展示内容的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Live,
    Fallback,
}

/// 单个商品卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseCard {
    pub product_id: i64,
    pub index: usize,
    pub name: String,
    pub category: String,
    pub price_label: String,
    pub original_price_label: Option<String>,
    pub image_src: String,
    pub view_href: String,
}

/// 每日精选面板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcasePanel {
    pub title: String,
    pub source: CatalogSource,
    pub columns: u8,
    pub visible: bool,
    pub placeholder_image: String,
    pub cards: Vec<ShowcaseCard>,
}

pub const PANEL_TITLE: &str = "★ Dope Daily Picks";

impl ShowcasePanel {
    /// 根据当前展示的商品构建面板，初始为不可见状态
    pub fn build(
        products: &[Product],
        source: CatalogSource,
        images: &dyn ImageResolver,
        placeholder_image: &str,
        product_path_prefix: &str,
    ) -> Self {
        let cards = products
            .iter()
            .enumerate()
            .map(|(index, product)| ShowcaseCard {
                product_id: product.id,
                index,
                name: product.name.clone(),
                category: product.category.clone(),
                price_label: format!("Rs {}", format_price(product.price)),
                original_price_label: product
                    .strikethrough_price()
                    .map(|price| format!("Rs {}", format_price(price))),
                image_src: images
                    .primary_image_url(product)
                    .unwrap_or_else(|| placeholder_image.to_string()),
                view_href: product_location(product_path_prefix, product.id),
            })
            .collect::<Vec<_>>();

        Self {
            title: PANEL_TITLE.to_string(),
            source,
            columns: if cards.len() == 1 { 1 } else { 2 },
            visible: false,
            placeholder_image: placeholder_image.to_string(),
            cards,
        }
    }

    /// 挂载后进入可见状态（淡入）
    pub fn mount(mut self) -> Self {
        self.visible = true;
        self
    }

    /// 图片加载失败时只替换对应卡片的图片为占位图
    ///
    /// 供进程内渲染使用；HTTP 客户端根据 `placeholder_image` 自行替换。
    pub fn report_image_error(&mut self, product_id: i64) -> bool {
        match self.cards.iter_mut().find(|card| card.product_id == product_id) {
            Some(card) => {
                card.image_src = self.placeholder_image.clone();
                true
            }
            None => false,
        }
    }
}

/// 千位分隔的价格格式，最多保留两位小数
pub fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped}.{}", f / 10),
        f => format!("{sign}{grouped}.{f:02}"),
    }
}
