//! 按钮动作：查看商品与加入购物车

use serde::{Deserialize, Serialize};
use tracing::info;

use super::model::Product;

/// 用户在面板上触发的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseAction {
    ViewProduct(i64),
    AddToCart(i64),
}

/// 动作执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Navigate(Navigation),
    AddedToCart(Product),
}

/// 导航目标，由外部路由解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum Navigation {
    FullPage(String),
}

impl Navigation {
    pub fn location(&self) -> &str {
        match self {
            Navigation::FullPage(location) => location,
        }
    }
}

/// 商品详情页地址，例如 `/product/42`
pub fn product_location(prefix: &str, id: i64) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), id)
}

/// "查看商品"：整页跳转到商品详情
pub fn view_product(prefix: &str, product: &Product) -> Navigation {
    Navigation::FullPage(product_location(prefix, product.id))
}

/// 外部提供的加入购物车处理器
pub trait CartHandler: Send + Sync {
    fn add_to_cart(&self, product: &Product);
}

impl<F> CartHandler for F
where
    F: Fn(&Product) + Send + Sync,
{
    fn add_to_cart(&self, product: &Product) {
        self(product)
    }
}

/// 只记录日志的购物车处理器
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCartHandler;

impl CartHandler for LoggingCartHandler {
    fn add_to_cart(&self, product: &Product) {
        info!(
            product_id = product.id,
            name = %product.name,
            price = product.price,
            "加入购物车"
        );
    }
}
