use std::future::Future;
use tokio::sync::oneshot;

use crate::api::ApiError;

/// A mutation running in the background.
///
/// The mutation keeps running if the submission is dropped, so a write that
/// reached the server still invalidates the cache after its view is closed.
pub struct Submission<T> {
  rx: oneshot::Receiver<Result<T, ApiError>>,
}

impl<T: Send + 'static> Submission<T> {
  pub fn spawn<F>(mutation: F) -> Self
  where
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
  {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(mutation.await);
    });
    Self { rx }
  }

  /// Result if the mutation finished, for tick polling
  pub fn try_take(&mut self) -> Option<Result<T, ApiError>> {
    match self.rx.try_recv() {
      Ok(result) => Some(result),
      Err(oneshot::error::TryRecvError::Empty) => None,
      Err(oneshot::error::TryRecvError::Closed) => Some(Err(cancelled())),
    }
  }

  /// Wait for the mutation to finish
  #[cfg(test)]
  pub async fn wait(self) -> Result<T, ApiError> {
    self.rx.await.unwrap_or_else(|_| Err(cancelled()))
  }
}

fn cancelled() -> ApiError {
  ApiError::Network("Request was cancelled".to_string())
}

impl<T> std::fmt::Debug for Submission<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Submission").finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[tokio::test]
  async fn test_try_take_before_and_after_completion() {
    let mut submission = Submission::spawn(async {
      tokio::time::sleep(Duration::from_millis(20)).await;
      Ok(42)
    });

    assert!(submission.try_take().is_none());
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(submission.try_take(), Some(Ok(42)));
  }

  #[tokio::test]
  async fn test_wait_returns_error() {
    let submission: Submission<()> =
      Submission::spawn(async { Err(ApiError::Network("refused".to_string())) });
    assert_eq!(
      submission.wait().await,
      Err(ApiError::Network("refused".to_string()))
    );
  }
}
