//! Share link handlers: owner CRUD plus the anonymous resolution paths.

use axum::Json;
use axum::extract::{Path, Query, State};

use wishlink_core::error::AppError;
use wishlink_core::types::payload::SharePayload;
use wishlink_core::types::short_link::ShortLinkRecord;
use wishlink_service::share::resolver::ShareQuery;

use crate::dto::request::CreateShareLinkRequest;
use crate::dto::response::{ApiResponse, ShareLinkCreated};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/share-links
pub async fn create_share_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareLinkRequest>,
) -> Result<Json<ApiResponse<ShareLinkCreated>>, ApiError> {
    let url = state
        .share_link_service
        .create_link(&auth, &req.payload, req.expires_at)
        .await?;

    Ok(Json(ApiResponse::ok(ShareLinkCreated { url })))
}

/// GET /api/share-links
pub async fn list_share_links(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ShortLinkRecord>>>, ApiError> {
    let links = state.share_link_service.list_links(&auth).await?;
    Ok(Json(ApiResponse::ok(links)))
}

/// DELETE /api/share-links/{id}
pub async fn delete_share_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.share_link_service.delete_link(&auth, &id).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Share link deleted" }),
    )))
}

/// GET /api/s/{id} — anonymous short link access
pub async fn access_share_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SharePayload>>, ApiError> {
    let query = ShareQuery {
        s: Some(id),
        share: None,
    };
    let payload = state
        .link_resolver
        .resolve(&query)
        .await
        .ok_or_else(|| AppError::not_found("Invalid or expired share link"))?;

    Ok(Json(ApiResponse::ok(payload)))
}

/// GET /api/resolve — anonymous resolution of either link form
///
/// Always responds 200; an unusable link is `data: null`, and the client
/// renders a uniform "link invalid" state without distinguishing causes.
pub async fn resolve_share_query(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Json<ApiResponse<Option<SharePayload>>> {
    let payload = state.link_resolver.resolve(&query).await;
    Json(ApiResponse::ok(payload))
}
