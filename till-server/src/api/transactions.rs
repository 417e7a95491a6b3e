//! Transaction API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/transactions | POST | 创建交易 |
//! | /api/transactions/{id} | GET | 获取交易快照 |
//! | /api/transactions/{id}/items | POST | 添加商品行 |
//! | /api/transactions/{id}/items/{line_id} | PATCH/DELETE | 修改/删除商品行 |
//! | /api/transactions/{id}/discount | PUT | 设置整单折扣 |
//! | /api/transactions/{id}/shipping | PUT | 设置运费 |
//! | /api/transactions/{id}/payments | POST | 添加支付 |
//! | /api/transactions/{id}/complete | POST | 完成并提交交易 |

use axum::{
    extract::{Path, State},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;

use shared::transaction::{
    Discount, ItemChanges, LineItemInput, PaymentInput, TransactionSnapshot,
};

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/transactions", transaction_routes())
}

fn transaction_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", get(get_by_id))
        .route("/{id}/items", post(add_item))
        .route("/{id}/items/{line_id}", patch(modify_item).delete(remove_item))
        .route("/{id}/discount", put(set_discount))
        .route("/{id}/shipping", put(set_shipping))
        .route("/{id}/payments", post(add_payment))
        .route("/{id}/complete", post(complete))
}

/// Create transaction payload
#[derive(Debug, Deserialize, Default)]
pub struct TransactionCreate {
    pub customer_id: Option<String>,
}

/// Set shipping payload
#[derive(Debug, Deserialize)]
pub struct ShippingUpdate {
    pub shipping_charge: f64,
}

/// POST /api/transactions - 创建交易
async fn create(
    State(state): State<ServerState>,
    Json(req): Json<TransactionCreate>,
) -> AppResult<Json<TransactionSnapshot>> {
    let snapshot = state.checkout.create(req.customer_id)?;
    Ok(Json(snapshot))
}

/// GET /api/transactions/{id} - 获取交易快照
async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.get(&id)?))
}

/// POST /api/transactions/{id}/items - 添加商品行
async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<LineItemInput>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.add_item(&id, input)?))
}

/// PATCH /api/transactions/{id}/items/{line_id} - 修改商品行
async fn modify_item(
    State(state): State<ServerState>,
    Path((id, line_id)): Path<(String, String)>,
    Json(changes): Json<ItemChanges>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.modify_item(&id, &line_id, changes)?))
}

/// DELETE /api/transactions/{id}/items/{line_id} - 删除商品行
async fn remove_item(
    State(state): State<ServerState>,
    Path((id, line_id)): Path<(String, String)>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.remove_item(&id, &line_id)?))
}

/// PUT /api/transactions/{id}/discount - 设置整单折扣
async fn set_discount(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(discount): Json<Discount>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.set_discount(&id, discount)?))
}

/// PUT /api/transactions/{id}/shipping - 设置运费
async fn set_shipping(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(update): Json<ShippingUpdate>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.set_shipping(&id, update.shipping_charge)?))
}

/// POST /api/transactions/{id}/payments - 添加支付
async fn add_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payment): Json<PaymentInput>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.add_payment(&id, payment)?))
}

/// POST /api/transactions/{id}/complete - 完成并提交交易
async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TransactionSnapshot>> {
    Ok(Json(state.checkout.complete(&id).await?))
}
