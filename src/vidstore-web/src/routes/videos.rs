//! Video resource handlers

use crate::validate::{self, CreateVideo, RequestArgs};
use crate::{ApiError, AppState};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use vidstore_db::{self, DatabaseError, Video};

/// Response body for a video; always exactly these four fields
#[derive(Debug, Serialize)]
pub struct VideoBody {
    pub id: i64,
    pub name: String,
    pub likes: i64,
    pub views: i64,
}

impl From<Video> for VideoBody {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            name: video.name,
            likes: video.likes,
            views: video.views,
        }
    }
}

/// `video_id` path segment. Only unsigned decimal ids route; anything else is a 404.
#[derive(Debug, Clone, Copy)]
pub struct VideoId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for VideoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.body_text()))?;

        parse_video_id(&raw)
            .map(VideoId)
            .ok_or_else(|| ApiError::NotFound(format!("no route for /{}", raw)))
    }
}

fn parse_video_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// GET /:video_id
pub async fn get_video(
    State(state): State<AppState>,
    VideoId(id): VideoId,
) -> Result<Json<VideoBody>, ApiError> {
    let db = state.conn()?;

    let video = vidstore_db::get_video(&db, id)?
        .ok_or_else(|| ApiError::NotFound("ID could not be found".to_string()))?;

    Ok(Json(video.into()))
}

/// PUT /:video_id
pub async fn put_video(
    State(state): State<AppState>,
    VideoId(id): VideoId,
    args: RequestArgs,
) -> Result<(StatusCode, Json<VideoBody>), ApiError> {
    let video = CreateVideo::parse(&args)?.into_video(id);

    let db = state.conn()?;
    match vidstore_db::insert_video(&db, &video) {
        Ok(()) => {}
        Err(DatabaseError::Conflict(_)) => {
            return Err(ApiError::Conflict("ID already exists!!".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    info!(id, "created video");
    Ok((StatusCode::CREATED, Json(video.into())))
}

/// PATCH /:video_id
pub async fn patch_video(
    State(state): State<AppState>,
    VideoId(id): VideoId,
    args: RequestArgs,
) -> Result<Json<VideoBody>, ApiError> {
    let patch = validate::parse_update(&args)?;

    let db = state.conn()?;
    let video = match vidstore_db::update_video(&db, id, &patch) {
        Ok(video) => video,
        Err(DatabaseError::NotFound(_)) => {
            return Err(ApiError::NotFound("ID does not exists!!".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(video.into()))
}

/// DELETE /:video_id
///
/// A missing id is a 404; any other store failure is reported as a 500
/// instead of being folded into the 404.
pub async fn delete_video(
    State(state): State<AppState>,
    VideoId(id): VideoId,
) -> Result<Json<Value>, ApiError> {
    let db = state.conn()?;

    match vidstore_db::delete_video(&db, id) {
        Ok(()) => {}
        Err(DatabaseError::NotFound(_)) => {
            return Err(ApiError::NotFound("Post not deleted".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    info!(id, "deleted video");
    Ok(Json(json!({ "Message": "Successfully Deleted!!" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_id() {
        assert_eq!(parse_video_id("5"), Some(5));
        assert_eq!(parse_video_id("007"), Some(7));
        assert_eq!(parse_video_id("-1"), None);
        assert_eq!(parse_video_id("+1"), None);
        assert_eq!(parse_video_id("abc"), None);
        assert_eq!(parse_video_id(""), None);
        assert_eq!(parse_video_id("99999999999999999999"), None);
    }

    #[test]
    fn test_body_has_fixed_fields() {
        let video = Video { id: 1, name: "a".into(), views: 2, likes: 3 };
        let body = serde_json::to_value(VideoBody::from(video)).unwrap();
        assert_eq!(body, json!({"id": 1, "name": "a", "likes": 3, "views": 2}));
    }
}
