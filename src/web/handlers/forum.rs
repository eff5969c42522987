//! Thread and reply handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::attachment::{Attachment, AttachmentRepository};
use crate::db::Database;
use crate::forum::{self, resolve_author, NewReply, NewThread, ReplyRepository, ThreadRepository};
use crate::web::dto::{
    ApiResponse, CreateReplyRequest, CreateThreadRequest, ReplyResponse, ThreadResponse,
    ThreadSummaryResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::OptionalAuthUser;

/// Load the attachment behind an optional image reference.
fn load_attachment(
    db: &Database,
    image_ref: Option<&str>,
) -> Result<Option<Attachment>, ApiError> {
    match image_ref {
        Some(image_ref) => {
            let repo = AttachmentRepository::new(db);
            repo.get_by_ref(image_ref).map_err(|e| {
                tracing::error!("Failed to load attachment {}: {}", image_ref, e);
                ApiError::internal("Failed to load attachment")
            })
        }
        None => Ok(None),
    }
}

/// POST /api/threads - Create a new thread.
///
/// Authentication is optional. Authorship is resolved once at creation
/// time: unauthenticated requests and authenticated requests with the
/// anonymous flag both produce an unattributed thread.
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(claims): OptionalAuthUser,
    ValidatedJson(req): ValidatedJson<CreateThreadRequest>,
) -> Result<Json<ApiResponse<ThreadResponse>>, ApiError> {
    let identity = claims.as_ref().map(|c| c.sub.as_str());

    let mut new_thread = NewThread::new(req.title, req.content);
    new_thread.author_username = resolve_author(identity, req.anonymous);
    new_thread.image_ref = req.image_ref;

    let db = state.db.lock().await;
    let thread = forum::create_thread(&db, &new_thread)?;
    let attachment = load_attachment(&db, thread.image_ref.as_deref())?;

    Ok(Json(ApiResponse::new(ThreadResponse::from_thread(
        thread, attachment,
    ))))
}

/// GET /api/threads - List all threads, newest first.
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ThreadSummaryResponse>>>, ApiError> {
    let threads = {
        let db = state.db.lock().await;
        ThreadRepository::new(&db).list().map_err(|e| {
            tracing::error!("Failed to list threads: {}", e);
            ApiError::internal("Failed to list threads")
        })?
    };

    let responses = threads
        .into_iter()
        .map(ThreadSummaryResponse::from_thread)
        .collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/threads/:id - Get a single thread with its full content.
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<i64>,
) -> Result<Json<ApiResponse<ThreadResponse>>, ApiError> {
    let db = state.db.lock().await;

    let thread = ThreadRepository::new(&db)
        .get_by_id(thread_id)
        .map_err(|e| {
            tracing::error!("Failed to get thread: {}", e);
            ApiError::internal("Failed to get thread")
        })?
        .ok_or_else(|| ApiError::not_found("Thread not found"))?;

    let attachment = load_attachment(&db, thread.image_ref.as_deref())?;

    Ok(Json(ApiResponse::new(ThreadResponse::from_thread(
        thread, attachment,
    ))))
}

/// GET /api/threads/:id/replies - List replies in a thread, oldest first.
///
/// An unknown thread id yields an empty list, the same as a thread with
/// no replies.
pub async fn list_replies(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ReplyResponse>>>, ApiError> {
    let db = state.db.lock().await;

    let replies = ReplyRepository::new(&db)
        .list_by_thread(thread_id)
        .map_err(|e| {
            tracing::error!("Failed to list replies: {}", e);
            ApiError::internal("Failed to list replies")
        })?;

    let mut responses = Vec::with_capacity(replies.len());
    for reply in replies {
        let attachment = load_attachment(&db, reply.image_ref.as_deref())?;
        responses.push(ReplyResponse::from_reply(reply, attachment));
    }

    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/threads/:id/replies - Create a reply in a thread.
///
/// Authentication is optional; authorship follows the same rules as
/// thread creation. The reply insert and the thread's reply-count
/// increment are atomic.
pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Path(thread_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateReplyRequest>,
) -> Result<Json<ApiResponse<ReplyResponse>>, ApiError> {
    let identity = claims.as_ref().map(|c| c.sub.as_str());

    let mut new_reply = NewReply::new(req.content);
    new_reply.author_username = resolve_author(identity, req.anonymous);
    new_reply.image_ref = req.image_ref;

    let mut db = state.db.lock().await;
    let reply = forum::create_reply(&mut db, thread_id, &new_reply)?;
    let attachment = load_attachment(&db, reply.image_ref.as_deref())?;

    Ok(Json(ApiResponse::new(ReplyResponse::from_reply(
        reply, attachment,
    ))))
}
