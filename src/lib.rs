//! # Dope Daily 每日精选服务
//!
//! 从商品目录中随机挑选商品组成"每日精选"面板：
//! - 过滤首页隐藏商品后均匀洗牌并截取
//! - 目录为空或全部隐藏时展示内置示例商品
//! - 同一目录重复渲染保持相同的精选结果
//! - "查看商品"跳转详情页，"加入购物车"转发给外部处理器

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::showcase::{
    handler::{create_router, AppState},
    Product, ShowcasePanel, ShowcaseService,
};
pub use config::{Config, ConfigError};
