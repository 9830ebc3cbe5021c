//! # Sale and Bid Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Active,
    Completed,
    Cancelled,
}

/// Bid placed on an auction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    #[serde(rename = "_id")]
    pub id: String,
    pub buyer_id: String,
    pub sale_id: String,
    pub amount: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Fixed-price listing or auction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(rename = "_id")]
    pub id: String,
    pub nft_id: String,
    pub seller_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub is_auction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_bid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve_price: Option<f64>,
    pub status: SaleStatus,
    #[serde(default)]
    pub bids: Vec<Bid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_bid: Option<Bid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /sales/{userId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleDto {
    pub nft_id: String,
    pub price: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auction: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_bid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve_price: Option<f64>,
}

/// Partial update for `PATCH /sales/{id}/{userId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auction: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_bid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve_price: Option<f64>,
}

/// Payload for `POST /sales/bid/{buyerId}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidDto {
    pub sale_id: String,
    pub amount: f64,
    pub currency: String,
}
