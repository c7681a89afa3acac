use std::collections::BTreeMap;

use thiserror::Error;

/// Failure of a single API request.
///
/// Errors are cloneable because one failed fetch may be handed to every
/// reader that was waiting on it. The display string is what the UI shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
  /// Transport failure: connection refused, DNS, timeout, truncated body
  #[error("Network error: {0}")]
  Network(String),

  /// Any 4xx response, with field-level messages when the server sent them
  #[error("{message}")]
  Validation {
    status: u16,
    message: String,
    fields: BTreeMap<String, Vec<String>>,
  },

  /// Any 5xx response
  #[error("Server error (HTTP {status}): {message}")]
  Server { status: u16, message: String },

  /// 2xx response whose body did not match the expected record
  #[error("Unexpected response: {0}")]
  Decode(String),
}

impl ApiError {
  /// True when the requested resource does not exist (HTTP 404)
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::Validation { status: 404, .. })
  }

  /// HTTP status, if the server answered at all
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
      Self::Network(_) | Self::Decode(_) => None,
    }
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(e: reqwest::Error) -> Self {
    Self::Network(e.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_not_found_is_a_validation_error() {
    let err = ApiError::Validation {
      status: 404,
      message: "Not Found".to_string(),
      fields: BTreeMap::new(),
    };
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Not Found");
  }

  #[test]
  fn test_server_error_display() {
    let err = ApiError::Server {
      status: 500,
      message: "boom".to_string(),
    };
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "Server error (HTTP 500): boom");
  }
}
