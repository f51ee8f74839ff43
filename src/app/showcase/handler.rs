//! 每日精选处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    middleware,
    response::{Json, Redirect},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use super::actions::{ActionOutcome, ShowcaseAction};
use super::model::{Product, ShowcasePanel};
use super::service::ShowcaseService;
use crate::core::{
    error::CoreError, middleware::request_logging_middleware, response::ApiResponse,
};

#[derive(Clone)]
pub struct AppState {
    pub showcase_service: ShowcaseService,
}

/// 目录更新结果
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub count: usize,
}

/// 创建路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/showcase", get(get_showcase))
        .route(
            "/catalog",
            get(get_catalog).put(replace_catalog).delete(clear_catalog),
        )
        .route("/showcase/products/:id/view", get(view_product))
        .route("/showcase/products/:id/cart", post(add_to_cart))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn get_showcase(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShowcasePanel>>, CoreError> {
    let panel = state.showcase_service.panel()?;
    Ok(Json(ApiResponse::success(panel)))
}

pub async fn get_catalog(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let catalog = state.showcase_service.catalog()?;
    Ok(Json(ApiResponse::success(catalog)))
}

pub async fn replace_catalog(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Product>>, JsonRejection>,
) -> Result<Json<ApiResponse<CatalogSummary>>, CoreError> {
    let Json(products) = payload.map_err(|rejection| {
        CoreError::BadRequest(format!("目录请求体无效: {}", rejection.body_text()))
    })?;
    let count = state.showcase_service.replace_catalog(products)?;
    Ok(Json(ApiResponse::success(CatalogSummary { count })))
}

pub async fn clear_catalog(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CatalogSummary>>, CoreError> {
    state.showcase_service.clear_catalog()?;
    Ok(Json(ApiResponse::success(CatalogSummary { count: 0 })))
}

/// 整页跳转到商品详情（303）
pub async fn view_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, CoreError> {
    match state
        .showcase_service
        .dispatch(ShowcaseAction::ViewProduct(id))?
    {
        ActionOutcome::Navigate(navigation) => Ok(Redirect::to(navigation.location())),
        ActionOutcome::AddedToCart(_) => Err(CoreError::InternalServerError(
            "查看商品返回了意外的结果".to_string(),
        )),
    }
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    match state
        .showcase_service
        .dispatch(ShowcaseAction::AddToCart(id))?
    {
        ActionOutcome::AddedToCart(product) => Ok(Json(ApiResponse::success(product))),
        ActionOutcome::Navigate(_) => Err(CoreError::InternalServerError(
            "加入购物车返回了意外的结果".to_string(),
        )),
    }
}
