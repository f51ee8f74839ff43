//! 商品图片地址解析

use super::model::Product;

/// 图片加载失败时使用的占位图
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-product.svg";

/// 从商品推导可展示的图片地址
pub trait ImageResolver: Send + Sync {
    /// 商品没有可用图片时返回 None，由调用方替换为占位图
    fn primary_image_url(&self, product: &Product) -> Option<String>;
}

/// 基于路径拼接的默认实现
#[derive(Debug, Clone, Default)]
pub struct PathImageResolver {
    base_url: String,
}

impl PathImageResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ImageResolver for PathImageResolver {
    fn primary_image_url(&self, product: &Product) -> Option<String> {
        let raw = product.image_url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("data:") {
            return Some(raw.to_string());
        }

        Some(format!("{}/{}", self.base_url, raw.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::showcase::fallback::fallback_products;

    fn with_image(image_url: Option<&str>) -> Product {
        let mut product = fallback_products().remove(0);
        product.image_url = image_url.map(str::to_string);
        product
    }

    #[test]
    fn test_relative_path_without_base() {
        let resolver = PathImageResolver::default();
        assert_eq!(
            resolver.primary_image_url(&with_image(Some("products/a.png"))),
            Some("/products/a.png".to_string())
        );
        assert_eq!(
            resolver.primary_image_url(&with_image(Some("/products/a.png"))),
            Some("/products/a.png".to_string())
        );
    }

    #[test]
    fn test_relative_path_with_base() {
        let resolver = PathImageResolver::new("https://cdn.example.com/media/");
        assert_eq!(
            resolver.primary_image_url(&with_image(Some("/products/a.png"))),
            Some("https://cdn.example.com/media/products/a.png".to_string())
        );
    }

    #[test]
    fn test_absolute_url_kept() {
        let resolver = PathImageResolver::new("https://cdn.example.com");
        assert_eq!(
            resolver.primary_image_url(&with_image(Some("https://img.example.com/x.png"))),
            Some("https://img.example.com/x.png".to_string())
        );
    }

    #[test]
    fn test_missing_image() {
        let resolver = PathImageResolver::default();
        assert_eq!(resolver.primary_image_url(&with_image(None)), None);
        assert_eq!(resolver.primary_image_url(&with_image(Some("  "))), None);
    }
}
