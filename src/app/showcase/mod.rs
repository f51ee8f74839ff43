//! 每日精选：从商品目录中随机挑选商品展示

pub mod actions;
pub mod fallback;
pub mod handler;
pub mod image;
pub mod model;
pub mod selector;
pub mod service;

pub use actions::{ActionOutcome, CartHandler, LoggingCartHandler, Navigation, ShowcaseAction};
pub use model::{CatalogSource, Product, ShowcaseCard, ShowcasePanel};
pub use selector::{resolve_display_catalog, select_sample, RandomPickSelector};
pub use service::ShowcaseService;
