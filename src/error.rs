//! Store error taxonomy.

use thiserror::Error;

/// Failure of a remote store operation.
///
/// The display text of a `Transport` error is rendered verbatim in the
/// list view's error branch (e.g. "Erreur 404"), so the message carries
/// everything the user gets to see. No retry, no backoff.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_is_displayed_verbatim() {
        let err = StoreError::Transport("Erreur 404".to_string());
        assert_eq!(err.to_string(), "Erreur 404");
    }
}
