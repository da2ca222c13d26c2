use thiserror::Error;

#[derive(Error, Debug)]
pub enum NonceError {
    /// The store rejected the write; no nonce was issued.
    #[error("Failed to create nonce: {0}")]
    CreateFailed(eyre::Report),

    /// Unknown, consumed and expired nonces are reported alike.
    #[error("Nonce already used or expired")]
    AlreadyUsed,

    #[error("Failed to read nonce: {0}")]
    ReadFailed(eyre::Report),

    /// The entry was found but its removal could not be confirmed, so the
    /// payload is withheld.
    #[error("Failed to delete nonce: {0}")]
    DeleteFailed(eyre::Report),
}

impl NonceError {
    /// Whether repeating the same call may succeed. Failed creates left
    /// nothing behind and failed reads consumed nothing.
    pub fn is_retryable(&self) -> bool {
        matches!(self, NonceError::CreateFailed(_) | NonceError::ReadFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::eyre;

    #[test]
    fn test_messages_name_the_operation() {
        let err = NonceError::CreateFailed(eyre!("connection refused"));
        assert_eq!(err.to_string(), "Failed to create nonce: connection refused");

        let err = NonceError::ReadFailed(eyre!("timeout"));
        assert_eq!(err.to_string(), "Failed to read nonce: timeout");

        let err = NonceError::DeleteFailed(eyre!("timeout"));
        assert_eq!(err.to_string(), "Failed to delete nonce: timeout");

        assert_eq!(
            NonceError::AlreadyUsed.to_string(),
            "Nonce already used or expired"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(NonceError::ReadFailed(eyre!("timeout")).is_retryable());
        assert!(NonceError::CreateFailed(eyre!("full")).is_retryable());
        assert!(!NonceError::AlreadyUsed.is_retryable());
        assert!(!NonceError::DeleteFailed(eyre!("timeout")).is_retryable());
    }
}
