/*
 * Responsibility
 * - /posts/{pid} handlers (edit / purge / state / vote / bookmark)
 * - each one: required-field check → identity + pid → one forum call → response
 * - requireUser / validatePid have already run (see routes.rs)
 */
use axum::{Json, extract::State};

use crate::{
    api::v2::{
        dto::posts::{BookmarkResponse, EditPostRequest, EmptyPayload, OkResponse, VoteRequest},
        extractors::{AuthCtxExtractor, JsonBody, PostPid},
    },
    error::AppError,
    services::forum::{EditPostPayload, TOPICS_READ, VoteDirection, VoteResult},
    state::AppState,
};

type Empty = Json<OkResponse<EmptyPayload>>;

pub async fn edit_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
    JsonBody(mut req): JsonBody<EditPostRequest>,
) -> Result<Empty, AppError> {
    let content = req.take_content()?;
    let uid = auth.user_uid().ok_or(AppError::Unauthorized)?;

    let payload = EditPostPayload::builder(uid, pid, content)
        .handle(req.handle)
        .title(req.title)
        .topic_thumb(req.topic_thumb)
        .tags(req.tags)
        .build();

    state.posts.edit(payload).await?;
    Ok(Json(OkResponse::empty()))
}

pub async fn purge_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
) -> Result<Empty, AppError> {
    let uid = auth.user_uid().ok_or(AppError::Unauthorized)?;
    state.posts.purge(&pid, uid).await?;
    Ok(Json(OkResponse::empty()))
}

pub async fn restore_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
) -> Result<Empty, AppError> {
    let uid = auth.user_uid().ok_or(AppError::Unauthorized)?;
    state.posts.restore(&pid, uid).await?;
    Ok(Json(OkResponse::empty()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
) -> Result<Empty, AppError> {
    let uid = auth.user_uid().ok_or(AppError::Unauthorized)?;
    state.posts.delete(&pid, uid).await?;
    Ok(Json(OkResponse::empty()))
}

pub async fn vote_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
    JsonBody(req): JsonBody<VoteRequest>,
) -> Result<Json<OkResponse<VoteResult>>, AppError> {
    let direction = req.direction()?;
    let uid = auth.user_uid().ok_or(AppError::Unauthorized)?;

    let result = match direction {
        VoteDirection::Up => state.posts.upvote(&pid, uid).await?,
        VoteDirection::Down => state.posts.downvote(&pid, uid).await?,
        VoteDirection::Clear => state.posts.unvote(&pid, uid).await?,
    };

    Ok(Json(OkResponse::new(result)))
}

// The request body is never read here: removal does not depend on a delta.
pub async fn unvote_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
) -> Result<Json<OkResponse<VoteResult>>, AppError> {
    let uid = auth.user_uid().ok_or(AppError::Unauthorized)?;
    let result = state.posts.unvote(&pid, uid).await?;
    Ok(Json(OkResponse::new(result)))
}

pub async fn bookmark_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
) -> Result<Json<BookmarkResponse>, AppError> {
    let uid = auth.effective_uid().ok_or(AppError::Unauthorized)?;

    let post = state
        .posts
        .get_post_fields(&pid)
        .await?
        .filter(|p| p.pid.is_some())
        .ok_or(AppError::not_found("post"))?;

    // A post whose topic or category cannot be resolved is treated as unreadable.
    let cid = match post.tid.as_deref() {
        Some(tid) => state
            .topics
            .get_topic_fields(tid)
            .await?
            .and_then(|t| t.cid),
        None => None,
    };
    let can_read = match cid.as_deref() {
        Some(cid) => state.privileges.can(TOPICS_READ, cid, uid).await?,
        None => false,
    };
    if !can_read {
        tracing::debug!(pid = %pid, uid, "bookmark rejected: no read privilege");
        return Err(AppError::Forbidden);
    }

    state.posts.bookmark(&pid, uid).await?;
    Ok(Json(BookmarkResponse::new(true)))
}

pub async fn unbookmark_post(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PostPid(pid): PostPid,
) -> Result<Json<BookmarkResponse>, AppError> {
    let uid = auth.effective_uid().ok_or(AppError::Unauthorized)?;
    state.posts.unbookmark(&pid, uid).await?;
    Ok(Json(BookmarkResponse::new(false)))
}
