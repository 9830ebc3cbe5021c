//! # NFT Endpoints

use shared::{CreateNftDto, Nft, UpdateNftDto};

use super::client::ApiClient;
use crate::core::error::ApiResult;

/// Mint an NFT for `user_id`.
///
/// When the payload names a collection the collection-scoped endpoint is
/// used so the backend links both in one step.
#[tracing::instrument(skip(client, dto), fields(name = %dto.name, collection = ?dto.collection_id))]
pub async fn create(client: &ApiClient, user_id: &str, dto: &CreateNftDto) -> ApiResult<Nft> {
    let path = match dto.collection_id.as_deref() {
        Some(collection_id) => format!("/nfts/collection/{}/user/{}", collection_id, user_id),
        None => format!("/nfts/{}", user_id),
    };
    client.post(&path, dto).await
}

pub async fn get_all(client: &ApiClient) -> ApiResult<Vec<Nft>> {
    client.get("/nfts").await
}

pub async fn get_by_owner(client: &ApiClient, owner_id: &str) -> ApiResult<Vec<Nft>> {
    client.get(&format!("/nfts/owner/{}", owner_id)).await
}

pub async fn get_by_collection(client: &ApiClient, collection_id: &str) -> ApiResult<Vec<Nft>> {
    client.get(&format!("/collections/{}/nfts", collection_id)).await
}

pub async fn get_one(client: &ApiClient, id: &str) -> ApiResult<Nft> {
    client.get(&format!("/nfts/{}", id)).await
}

#[tracing::instrument(skip(client, dto))]
pub async fn update(client: &ApiClient, id: &str, user_id: &str, dto: &UpdateNftDto) -> ApiResult<Nft> {
    client.patch(&format!("/nfts/update/{}/{}", id, user_id), dto).await
}

#[tracing::instrument(skip(client))]
pub async fn delete(client: &ApiClient, id: &str, user_id: &str) -> ApiResult<()> {
    client.delete(&format!("/nfts/delete/{}/{}", id, user_id)).await
}

pub async fn add_to_collection(client: &ApiClient, nft_id: &str, collection_id: &str) -> ApiResult<Nft> {
    client
        .post(&format!("/nfts/{}/collection/{}", nft_id, collection_id), &serde_json::json!({}))
        .await
}

pub async fn remove_from_collection(client: &ApiClient, nft_id: &str) -> ApiResult<Nft> {
    client
        .delete(&format!("/nfts/{}/remove-from-collection", nft_id))
        .await
}
