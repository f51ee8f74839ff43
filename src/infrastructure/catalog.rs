//! 目录快照加载

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::app::showcase::model::Product;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("目录文件读取错误: {0}")]
    Read(#[from] std::io::Error),
    #[error("目录解析错误: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 目录文件既可以是商品数组，也可以是 `{"products": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

/// 从 JSON 文件读取目录快照
pub async fn load_catalog_file(path: impl AsRef<Path>) -> Result<Vec<Product>, CatalogError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let products = parse_catalog(&content)?;

    debug!(path = %path.display(), count = products.len(), "读取目录快照");
    Ok(products)
}

pub fn parse_catalog(content: &str) -> Result<Vec<Product>, CatalogError> {
    let products = match serde_json::from_str(content)? {
        CatalogFile::List(products) => products,
        CatalogFile::Wrapped { products } => products,
    };
    Ok(products)
}
