/// Outcome of the last submit, shown under a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationStatus {
  #[default]
  Idle,
  Pending {
    message: String,
  },
  Success {
    message: String,
    /// Id (or line number) of a resource the mutation created
    created_id: Option<i64>,
  },
  Error {
    message: String,
  },
}

impl MutationStatus {
  pub fn saving() -> Self {
    MutationStatus::Pending {
      message: "Saving...".to_string(),
    }
  }

  pub fn deleting() -> Self {
    MutationStatus::Pending {
      message: "Deleting...".to_string(),
    }
  }

  pub fn saved() -> Self {
    MutationStatus::Success {
      message: "Saved successfully".to_string(),
      created_id: None,
    }
  }

  pub fn deleted() -> Self {
    MutationStatus::Success {
      message: "Deleted successfully".to_string(),
      created_id: None,
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    MutationStatus::Error {
      message: message.into(),
    }
  }

  pub fn is_pending(&self) -> bool {
    matches!(self, MutationStatus::Pending { .. })
  }

  pub fn is_error(&self) -> bool {
    matches!(self, MutationStatus::Error { .. })
  }

  pub fn message(&self) -> Option<&str> {
    match self {
      MutationStatus::Idle => None,
      MutationStatus::Pending { message }
      | MutationStatus::Success { message, .. }
      | MutationStatus::Error { message } => Some(message),
    }
  }

  pub fn created_id(&self) -> Option<i64> {
    match self {
      MutationStatus::Success { created_id, .. } => *created_id,
      _ => None,
    }
  }
}
