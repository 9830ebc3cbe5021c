//! # Sale Endpoints
//!
//! Listings, auctions and bids, plus the on-chain list/buy/cancel actions
//! the backend performs on the seller's or buyer's behalf.

use shared::{Bid, CreateSaleDto, PlaceBidDto, Sale, UpdateSaleDto};

use super::client::ApiClient;
use crate::core::error::ApiResult;

fn empty_body() -> serde_json::Value {
    serde_json::json!({})
}

#[tracing::instrument(skip(client, dto), fields(nft_id = %dto.nft_id, price = dto.price))]
pub async fn create(client: &ApiClient, user_id: &str, dto: &CreateSaleDto) -> ApiResult<Sale> {
    client.post(&format!("/sales/{}", user_id), dto).await
}

pub async fn get_all(client: &ApiClient) -> ApiResult<Vec<Sale>> {
    client.get("/sales").await
}

pub async fn get_by_collection(client: &ApiClient, collection_id: &str) -> ApiResult<Vec<Sale>> {
    client.get(&format!("/sales/collection/{}", collection_id)).await
}

pub async fn get_by_seller(client: &ApiClient, seller_id: &str) -> ApiResult<Vec<Sale>> {
    client.get(&format!("/sales/seller/{}", seller_id)).await
}

pub async fn get_by_buyer(client: &ApiClient, buyer_id: &str) -> ApiResult<Vec<Sale>> {
    client.get(&format!("/sales/buyer/{}", buyer_id)).await
}

pub async fn get_one(client: &ApiClient, id: &str) -> ApiResult<Sale> {
    client.get(&format!("/sales/{}", id)).await
}

#[tracing::instrument(skip(client, dto))]
pub async fn update(client: &ApiClient, id: &str, user_id: &str, dto: &UpdateSaleDto) -> ApiResult<Sale> {
    client.patch(&format!("/sales/{}/{}", id, user_id), dto).await
}

/// Withdraw a listing.
#[tracing::instrument(skip(client))]
pub async fn cancel(client: &ApiClient, id: &str, user_id: &str) -> ApiResult<()> {
    client.delete(&format!("/sales/{}/{}", id, user_id)).await
}

/// Buy a fixed-price listing.
#[tracing::instrument(skip(client))]
pub async fn buy(client: &ApiClient, id: &str, buyer_id: &str) -> ApiResult<Sale> {
    client.post(&format!("/sales/{}/buy/{}", id, buyer_id), &empty_body()).await
}

#[tracing::instrument(skip(client, dto), fields(sale_id = %dto.sale_id, amount = dto.amount))]
pub async fn place_bid(client: &ApiClient, buyer_id: &str, dto: &PlaceBidDto) -> ApiResult<Bid> {
    client.post(&format!("/sales/bid/{}", buyer_id), dto).await
}

#[tracing::instrument(skip(client))]
pub async fn end_auction(client: &ApiClient, id: &str, user_id: &str) -> ApiResult<Sale> {
    client
        .post(&format!("/sales/{}/end-auction/{}", id, user_id), &empty_body())
        .await
}

#[tracing::instrument(skip(client))]
pub async fn list_on_blockchain(client: &ApiClient, sale_id: &str) -> ApiResult<Sale> {
    client
        .post(&format!("/sales/blockchain/list/{}", sale_id), &empty_body())
        .await
}

#[tracing::instrument(skip(client))]
pub async fn buy_on_blockchain(client: &ApiClient, sale_id: &str, buyer_id: &str) -> ApiResult<Sale> {
    client
        .post(&format!("/sales/blockchain/buy/{}/{}", sale_id, buyer_id), &empty_body())
        .await
}

#[tracing::instrument(skip(client))]
pub async fn cancel_on_blockchain(client: &ApiClient, sale_id: &str) -> ApiResult<Sale> {
    client
        .post(&format!("/sales/blockchain/cancel/{}", sale_id), &empty_body())
        .await
}
