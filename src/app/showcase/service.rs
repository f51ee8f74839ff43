//! 每日精选业务服务

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use validator::Validate;

use super::actions::{view_product, ActionOutcome, CartHandler, ShowcaseAction};
use super::image::{ImageResolver, PathImageResolver};
use super::model::{Product, ShowcasePanel};
use super::selector::RandomPickSelector;
use crate::config::ShowcaseConfig;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ShowcaseService {
    settings: Arc<ShowcaseConfig>,
    catalog: Arc<RwLock<Option<Arc<[Product]>>>>,
    selector: Arc<Mutex<RandomPickSelector<StdRng>>>,
    images: Arc<dyn ImageResolver>,
    cart: Option<Arc<dyn CartHandler>>,
}

impl ShowcaseService {
    /// 按配置创建服务，配置了 seed 时抽取结果可复现
    pub fn new(settings: ShowcaseConfig) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, rng)
    }

    pub fn with_rng(settings: ShowcaseConfig, rng: StdRng) -> Self {
        let images = Arc::new(PathImageResolver::new(settings.image_base_url.clone()));
        let selector = RandomPickSelector::with_count(rng, settings.pick_count);
        Self {
            settings: Arc::new(settings),
            catalog: Arc::new(RwLock::new(None)),
            selector: Arc::new(Mutex::new(selector)),
            images,
            cart: None,
        }
    }

    pub fn with_cart_handler(mut self, handler: Arc<dyn CartHandler>) -> Self {
        self.cart = Some(handler);
        self
    }

    pub fn with_image_resolver(mut self, resolver: Arc<dyn ImageResolver>) -> Self {
        self.images = resolver;
        self
    }

    pub fn settings(&self) -> &ShowcaseConfig {
        &self.settings
    }

    /// 替换线上目录，新的目录引用会触发下一次渲染重新抽取
    pub fn replace_catalog(&self, products: Vec<Product>) -> Result<usize, CoreError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate().map_err(|e| {
                CoreError::BadRequest(format!("商品 {} 校验失败: {}", product.id, e))
            })?;
            if !seen.insert(product.id) {
                return Err(CoreError::BadRequest(format!(
                    "商品 ID 重复: {}",
                    product.id
                )));
            }
        }

        let count = products.len();
        let hidden = products.iter().filter(|p| p.hidden_on_home).count();
        *self.write_catalog()? = Some(Arc::from(products));

        info!(count, hidden, "目录已更新");
        Ok(count)
    }

    /// 清空目录，面板回退到内置示例
    pub fn clear_catalog(&self) -> Result<(), CoreError> {
        *self.write_catalog()? = None;
        info!("目录已清空");
        Ok(())
    }

    pub fn catalog(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self
            .current_catalog()?
            .map(|catalog| catalog.to_vec())
            .unwrap_or_default())
    }

    /// 渲染当前面板（已挂载、可见）
    pub fn panel(&self) -> Result<ShowcasePanel, CoreError> {
        let selector = self.refreshed_selector()?;

        let source = selector
            .source()
            .ok_or_else(|| CoreError::InternalServerError("选择器未初始化".to_string()))?;
        let panel = ShowcasePanel::build(
            selector.displayed(),
            source,
            self.images.as_ref(),
            &self.settings.placeholder_image,
            &self.settings.product_path_prefix,
        );
        Ok(panel.mount())
    }

    /// 执行面板上的按钮动作，只接受当前展示中的商品
    pub fn dispatch(&self, action: ShowcaseAction) -> Result<ActionOutcome, CoreError> {
        match action {
            ShowcaseAction::ViewProduct(id) => {
                let product = self.displayed_product(id)?;
                Ok(ActionOutcome::Navigate(view_product(
                    &self.settings.product_path_prefix,
                    &product,
                )))
            }
            ShowcaseAction::AddToCart(id) => {
                let product = self.displayed_product(id)?;
                match &self.cart {
                    Some(handler) => handler.add_to_cart(&product),
                    None => warn!(product_id = id, "未配置购物车处理器，忽略加入购物车"),
                }
                Ok(ActionOutcome::AddedToCart(product))
            }
        }
    }

    fn displayed_product(&self, id: i64) -> Result<Product, CoreError> {
        let selector = self.refreshed_selector()?;
        selector
            .displayed()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("商品 {} 不在当前精选中", id)))
    }

    /// 持有选择器锁后再读取目录，保证选择器只会前进到更新的目录
    fn refreshed_selector(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, RandomPickSelector<StdRng>>, CoreError> {
        let mut selector = self.lock_selector()?;
        let catalog = self.current_catalog()?;
        selector.refresh(catalog.as_ref());
        Ok(selector)
    }

    fn current_catalog(&self) -> Result<Option<Arc<[Product]>>, CoreError> {
        self.catalog
            .read()
            .map(|catalog| catalog.clone())
            .map_err(|_| CoreError::InternalServerError("目录读锁失败".to_string()))
    }

    fn write_catalog(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, Option<Arc<[Product]>>>, CoreError> {
        self.catalog
            .write()
            .map_err(|_| CoreError::InternalServerError("目录写锁失败".to_string()))
    }

    fn lock_selector(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, RandomPickSelector<StdRng>>, CoreError> {
        self.selector
            .lock()
            .map_err(|_| CoreError::InternalServerError("选择器加锁失败".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::showcase::actions::Navigation;
    use crate::app::showcase::fallback::fallback_products;
    use crate::app::showcase::model::CatalogSource;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn settings() -> ShowcaseConfig {
        ShowcaseConfig {
            seed: Some(17),
            ..ShowcaseConfig::default()
        }
    }

    fn catalog(n: i64) -> Vec<Product> {
        numbered_catalog(0, n)
    }

    /// 第 `round` 个目录的商品 ID 为 `round * 10 + 1 ..= round * 10 + n`
    fn numbered_catalog(round: i64, n: i64) -> Vec<Product> {
        (round * 10 + 1..=round * 10 + n)
            .map(|id| {
                let mut product = fallback_products().remove(0);
                product.id = id;
                product.name = format!("Product {id}");
                product
            })
            .collect()
    }

    #[test]
    fn test_empty_service_shows_fallback() {
        let service = ShowcaseService::new(settings());
        let panel = service.panel().unwrap();

        assert_eq!(panel.source, CatalogSource::Fallback);
        assert!(panel.visible);
        let ids: Vec<_> = panel.cards.iter().map(|c| c.product_id).collect();
        assert_eq!(ids, vec![999, 998]);
    }

    #[test]
    fn test_panel_stable_until_catalog_replaced() {
        let service = ShowcaseService::new(settings());
        service.replace_catalog(catalog(5)).unwrap();

        let first = service.panel().unwrap();
        assert_eq!(first.source, CatalogSource::Live);
        assert_eq!(first.cards.len(), 2);
        for _ in 0..5 {
            assert_eq!(service.panel().unwrap().cards, first.cards);
        }

        let generation = service.lock_selector().unwrap().generation();
        service.replace_catalog(catalog(5)).unwrap();
        service.panel().unwrap();
        assert_eq!(
            service.lock_selector().unwrap().generation(),
            generation + 1
        );
    }

    #[test]
    fn test_replace_catalog_rejects_duplicates_and_invalid() {
        let service = ShowcaseService::new(settings());

        let mut duplicated = catalog(2);
        duplicated[1].id = 1;
        assert!(matches!(
            service.replace_catalog(duplicated),
            Err(CoreError::BadRequest(_))
        ));

        let mut negative = catalog(1);
        negative[0].price = -5.0;
        assert!(matches!(
            service.replace_catalog(negative),
            Err(CoreError::BadRequest(_))
        ));

        assert!(service.catalog().unwrap().is_empty());
    }

    #[test]
    fn test_clear_catalog_falls_back() {
        let service = ShowcaseService::new(settings());
        service.replace_catalog(catalog(3)).unwrap();
        assert_eq!(service.panel().unwrap().source, CatalogSource::Live);

        service.clear_catalog().unwrap();
        assert_eq!(service.panel().unwrap().source, CatalogSource::Fallback);
    }

    #[test]
    fn test_view_displayed_product() {
        let service = ShowcaseService::new(settings());
        let outcome = service.dispatch(ShowcaseAction::ViewProduct(998)).unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Navigate(Navigation::FullPage("/product/998".to_string()))
        );

        assert!(matches!(
            service.dispatch(ShowcaseAction::ViewProduct(1)),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_to_cart_invokes_handler() {
        let added = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&added);
        let service = ShowcaseService::new(settings())
            .with_cart_handler(Arc::new(move |p: &Product| sink.lock().unwrap().push(p.id)));
        service.replace_catalog(catalog(4)).unwrap();

        let panel = service.panel().unwrap();
        let id = panel.cards[0].product_id;
        let outcome = service.dispatch(ShowcaseAction::AddToCart(id)).unwrap();

        assert!(matches!(outcome, ActionOutcome::AddedToCart(ref p) if p.id == id));
        assert_eq!(*added.lock().unwrap(), vec![id]);
        assert_eq!(service.catalog().unwrap().len(), 4);
    }

    #[test]
    fn test_add_to_cart_without_handler_is_noop() {
        let service = ShowcaseService::new(settings());
        let outcome = service.dispatch(ShowcaseAction::AddToCart(999)).unwrap();
        assert!(matches!(outcome, ActionOutcome::AddedToCart(ref p) if p.id == 999));
    }

    #[test]
    fn test_concurrent_panels_never_return_to_older_catalog() {
        let service = ShowcaseService::new(settings());
        service.replace_catalog(numbered_catalog(0, 3)).unwrap();
        let rounds = 500;
        let done = AtomicBool::new(false);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let mut last_round = 0;
                    while !done.load(Ordering::Acquire) {
                        let panel = service.panel().unwrap();
                        let round = panel.cards[0].product_id / 10;
                        assert!(
                            round >= last_round,
                            "面板从目录 {} 回退到目录 {}",
                            last_round,
                            round
                        );
                        last_round = round;
                    }
                });
            }

            for round in 1..=rounds {
                service.replace_catalog(numbered_catalog(round, 3)).unwrap();
            }
            done.store(true, Ordering::Release);
        });

        let panel = service.panel().unwrap();
        assert!(panel.cards.iter().all(|c| c.product_id / 10 == rounds));
        // 每个目录最多抽取一次
        let generation = service.lock_selector().unwrap().generation();
        assert!(generation <= rounds as u64 + 1, "抽取了 {} 次", generation);
    }
}
