//! Request argument parsing for the video resource
//!
//! Arguments are gathered from the request body (JSON object or urlencoded
//! form) and the query string, then coerced per field. Coercion is the only
//! check performed; there are no range or length rules beyond a non-empty
//! name on creation.

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::header,
    Form,
};
use serde_json::{Map, Value};
use vidstore_db::{Video, VideoPatch};

use crate::ApiError;

/// A named request argument with the help text reported when it is rejected
#[derive(Debug, Clone, Copy)]
pub struct Argument {
    pub name: &'static str,
    pub help: &'static str,
}

pub const NAME: Argument = Argument { name: "name", help: "Name of the video" };
pub const LIKES: Argument = Argument { name: "likes", help: "Likes of the video" };
pub const VIEWS: Argument = Argument { name: "views", help: "Views of the video" };

/// Raw arguments of one request, before coercion
#[derive(Debug, Default)]
pub struct RequestArgs {
    values: Map<String, Value>,
}

impl RequestArgs {
    /// Build from an already-decoded JSON object
    pub fn from_json(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Layer string pairs underneath what is already present
    fn merge_strings(&mut self, pairs: HashMap<String, String>) {
        for (key, value) in pairs {
            self.values.entry(key).or_insert(Value::String(value));
        }
    }

    fn lookup(&self, arg: Argument) -> Option<&Value> {
        self.values.get(arg.name).filter(|v| !v.is_null())
    }

    /// Text argument; numbers are accepted and rendered as text
    pub fn text(&self, arg: Argument) -> Result<Option<String>, ApiError> {
        let Some(value) = self.lookup(arg) else {
            return Ok(None);
        };

        match value {
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            _ => Err(rejected(arg)),
        }
    }

    /// Integer argument; decimal strings are accepted
    pub fn integer(&self, arg: Argument) -> Result<Option<i64>, ApiError> {
        let Some(value) = self.lookup(arg) else {
            return Ok(None);
        };

        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        parsed.map(Some).ok_or_else(|| rejected(arg))
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestArgs
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let mut args = if is_form {
            let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            let mut args = RequestArgs::default();
            args.merge_strings(pairs);
            args
        } else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            decode_json(&body)?
        };

        args.merge_strings(query);
        Ok(args)
    }
}

fn decode_json(body: &[u8]) -> Result<RequestArgs, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RequestArgs::default());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(values)) => Ok(RequestArgs::from_json(values)),
        _ => Err(ApiError::BadRequest("Failed to decode JSON object".to_string())),
    }
}

fn rejected(arg: Argument) -> ApiError {
    ApiError::MissingArgument { field: arg.name, help: arg.help }
}

fn required<T>(arg: Argument, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| rejected(arg))
}

/// Fields required to create a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVideo {
    pub name: String,
    pub likes: i64,
    pub views: i64,
}

impl CreateVideo {
    /// All three fields must be present and coercible; checked in order
    /// `name`, `likes`, `views`, reporting the first failure.
    pub fn parse(args: &RequestArgs) -> Result<Self, ApiError> {
        let name = required(NAME, args.text(NAME)?.filter(|n| !n.is_empty()))?;
        let likes = required(LIKES, args.integer(LIKES)?)?;
        let views = required(VIEWS, args.integer(VIEWS)?)?;

        Ok(Self { name, likes, views })
    }

    pub fn into_video(self, id: i64) -> Video {
        Video {
            id,
            name: self.name,
            views: self.views,
            likes: self.likes,
        }
    }
}

/// Optional fields of a partial update.
///
/// Zero counts are applied as supplied. An empty name is dropped so the
/// stored name never becomes empty.
pub fn parse_update(args: &RequestArgs) -> Result<VideoPatch, ApiError> {
    let name = args.text(NAME)?.filter(|n| !n.is_empty());
    let likes = args.integer(LIKES)?;
    let views = args.integer(VIEWS)?;

    Ok(VideoPatch { name, views, likes })
}
