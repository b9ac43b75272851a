use super::*;

pub(crate) type ApiResult<T = ()> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
  #[error("{message} ({status} {status_text})")]
  Status {
    message: String,
    status: u16,
    status_text: String,
  },
  #[error(transparent)]
  Transport(#[from] reqwest::Error),
}

impl ApiError {
  pub(crate) async fn from_response(
    response: reqwest::Response,
    default_message: &str,
  ) -> Self {
    let status = response.status();

    let body = match response.text().await {
      Ok(body) => body,
      Err(error) => {
        debug!(%error, "could not read error body");
        String::new()
      }
    };

    Self::status(status, error_message(&body, default_message))
  }

  /// True when the backend reports the resource as gone.
  pub(crate) fn is_not_found(&self) -> bool {
    match self {
      Self::Status {
        message, status, ..
      } => *status == StatusCode::NOT_FOUND.as_u16() || message.contains("404"),
      Self::Transport(error) => error.status() == Some(StatusCode::NOT_FOUND),
    }
  }

  pub(crate) fn not_found(message: impl Into<String>) -> Self {
    Self::status(StatusCode::NOT_FOUND, message.into())
  }

  fn status(status: StatusCode, message: String) -> Self {
    Self::Status {
      message,
      status: status.as_u16(),
      status_text: status.canonical_reason().unwrap_or_default().to_string(),
    }
  }
}

/// Picks the human-readable text out of an error body, preferring `message`
/// over `detail`, falling back to `default_message`.
pub(crate) fn error_message(body: &str, default_message: &str) -> String {
  let value = match serde_json::from_str::<Value>(body) {
    Ok(value) => value,
    Err(error) => {
      debug!(%error, "error body is not json");
      return default_message.to_string();
    }
  };

  ["message", "detail"]
    .iter()
    .filter_map(|key| value.get(key).and_then(Value::as_str))
    .find(|text| !text.is_empty())
    .map_or_else(|| default_message.to_string(), str::to_string)
}
