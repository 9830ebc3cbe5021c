//! # Collection Endpoints

use shared::{Collection, CreateCollectionDto, UpdateCollectionDto};

use super::client::ApiClient;
use crate::core::error::ApiResult;

/// Create a collection owned by `user_id`.
#[tracing::instrument(skip(client, dto), fields(name = %dto.name))]
pub async fn create(client: &ApiClient, user_id: &str, dto: &CreateCollectionDto) -> ApiResult<Collection> {
    client.post(&format!("/collections/{}", user_id), dto).await
}

/// All collections.
pub async fn get_all(client: &ApiClient) -> ApiResult<Vec<Collection>> {
    client.get("/collections").await
}

/// Collections created by `creator_id`.
pub async fn get_by_creator(client: &ApiClient, creator_id: &str) -> ApiResult<Vec<Collection>> {
    client.get(&format!("/collections/creator/{}", creator_id)).await
}

pub async fn get_one(client: &ApiClient, id: &str) -> ApiResult<Collection> {
    client.get(&format!("/collections/{}", id)).await
}

#[tracing::instrument(skip(client, dto))]
pub async fn update(client: &ApiClient, id: &str, user_id: &str, dto: &UpdateCollectionDto) -> ApiResult<Collection> {
    client.patch(&format!("/collections/update/{}/{}", id, user_id), dto).await
}

#[tracing::instrument(skip(client))]
pub async fn delete(client: &ApiClient, id: &str, user_id: &str) -> ApiResult<()> {
    client.delete(&format!("/collections/delete/{}/{}", id, user_id)).await
}

/// Attach an existing NFT to a collection.
pub async fn add_nft(client: &ApiClient, collection_id: &str, nft_id: &str) -> ApiResult<Collection> {
    client
        .post(&format!("/collections/{}/nft/{}", collection_id, nft_id), &serde_json::json!({}))
        .await
}

pub async fn remove_nft(client: &ApiClient, collection_id: &str, nft_id: &str) -> ApiResult<()> {
    client
        .delete(&format!("/collections/{}/remove-nft/{}", collection_id, nft_id))
        .await
}
