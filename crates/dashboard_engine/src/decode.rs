use serde::Deserialize;
use serde_json::Value;

use crate::{ApiError, ArticleRecord, FailureKind, SelectAck};

/// Decodes a `GET /articles/` body.
///
/// The whole payload is rejected unless `articles` is an array of decodable
/// entries; a partially valid list is never returned.
pub fn decode_article_list(body: &[u8]) -> Result<Vec<ArticleRecord>, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::malformed(format!("invalid JSON: {err}")))?;

    let field = value
        .get("articles")
        .ok_or_else(|| ApiError::malformed("missing `articles` field"))?;
    if !field.is_array() {
        return Err(ApiError::malformed(format!(
            "`articles` is not a list (got {})",
            json_kind(field)
        )));
    }

    Vec::<ArticleRecord>::deserialize(field)
        .map_err(|err| ApiError::malformed(format!("invalid article entry: {err}")))
}

/// Decodes a `POST /articles/select/{id}` body.
///
/// Only a non-empty string `message` counts as an acknowledgement.
pub fn decode_select_ack(body: &[u8]) -> Result<SelectAck, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::malformed(format!("invalid JSON: {err}")))?;

    match value.get("message").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => Ok(SelectAck {
            message: message.to_string(),
        }),
        _ => match value.get("error").and_then(Value::as_str) {
            Some(error) => Err(ApiError::new(FailureKind::Rejected, error)),
            None => Err(ApiError::malformed("acknowledgement has no `message`")),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
