//! 随机精选：过滤、均匀洗牌、截断，以及目录不可用时的兜底

use std::borrow::Cow;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::fallback::fallback_products;
use super::model::{CatalogSource, Product};

/// 默认展示数量
pub const DEFAULT_PICK_COUNT: usize = 2;

/// 从目录中随机抽取最多 `count` 个可展示的商品
///
/// 过滤掉 `hidden_on_home` 的商品后做 Fisher–Yates 洗牌，再截取前
/// `min(count, 可展示数量)` 个。目录为空或缺失时返回空列表。
pub fn select_sample<R>(catalog: Option<&[Product]>, count: usize, rng: &mut R) -> Vec<Product>
where
    R: Rng + ?Sized,
{
    let Some(catalog) = catalog else {
        return Vec::new();
    };

    let mut visible: Vec<&Product> = catalog.iter().filter(|p| !p.hidden_on_home).collect();
    if visible.is_empty() {
        return Vec::new();
    }

    visible.shuffle(rng);
    visible.truncate(count.min(visible.len()));
    visible.into_iter().cloned().collect()
}

/// 实际用于展示的目录
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCatalog<'a> {
    pub source: CatalogSource,
    pub products: Cow<'a, [Product]>,
}

/// 在渲染前决定使用线上目录还是内置示例
///
/// 只要目录里还有一个可展示的商品就使用线上目录，否则返回兜底集合。
pub fn resolve_display_catalog(catalog: Option<&[Product]>) -> DisplayCatalog<'_> {
    match catalog {
        Some(products) if products.iter().any(|p| !p.hidden_on_home) => DisplayCatalog {
            source: CatalogSource::Live,
            products: Cow::Borrowed(products),
        },
        _ => DisplayCatalog {
            source: CatalogSource::Fallback,
            products: Cow::Owned(fallback_products()),
        },
    }
}

/// 选择器状态
#[derive(Debug, Clone)]
pub enum SelectorState {
    Uninitialized,
    Sampled {
        catalog: Option<Arc<[Product]>>,
        source: CatalogSource,
        picks: Vec<Product>,
    },
}

/// 持有当前展示子集的随机选择器
///
/// 只有目录引用变化（或首次挂载）时才重新抽取，同一目录重复渲染得到相同结果。
#[derive(Debug)]
pub struct RandomPickSelector<R> {
    rng: R,
    count: usize,
    state: SelectorState,
    generation: u64,
}

impl<R: Rng> RandomPickSelector<R> {
    pub fn new(rng: R) -> Self {
        Self::with_count(rng, DEFAULT_PICK_COUNT)
    }

    pub fn with_count(rng: R, count: usize) -> Self {
        Self {
            rng,
            count,
            state: SelectorState::Uninitialized,
            generation: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    /// 已完成的抽取次数
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 目录引用变化时重新抽取，返回是否发生了重新计算
    pub fn refresh(&mut self, catalog: Option<&Arc<[Product]>>) -> bool {
        if let SelectorState::Sampled { catalog: current, .. } = &self.state {
            let unchanged = match (current, catalog) {
                (None, None) => true,
                (Some(current), Some(next)) => Arc::ptr_eq(current, next),
                _ => false,
            };
            if unchanged {
                return false;
            }
        }

        let display = resolve_display_catalog(catalog.map(|c| &c[..]));
        let source = display.source;
        let picks = match source {
            CatalogSource::Live => select_sample(Some(&*display.products), self.count, &mut self.rng),
            CatalogSource::Fallback => display.products.into_owned(),
        };

        self.generation += 1;
        match source {
            CatalogSource::Live => debug!(
                generation = self.generation,
                picks = ?picks.iter().map(|p| p.id).collect::<Vec<_>>(),
                "重新抽取每日精选"
            ),
            CatalogSource::Fallback => info!(
                generation = self.generation,
                "目录为空或全部隐藏，使用内置示例商品"
            ),
        }

        self.state = SelectorState::Sampled {
            catalog: catalog.cloned(),
            source,
            picks,
        };
        true
    }

    /// 当前展示的商品，未初始化时为空
    pub fn displayed(&self) -> &[Product] {
        match &self.state {
            SelectorState::Uninitialized => &[],
            SelectorState::Sampled { picks, .. } => picks,
        }
    }

    pub fn source(&self) -> Option<CatalogSource> {
        match &self.state {
            SelectorState::Uninitialized => None,
            SelectorState::Sampled { source, .. } => Some(*source),
        }
    }
}
