//! Cooperative cancellation shared between the trigger and the pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SynthesisError;

/// Cloneable cancellation flag.
///
/// Every clone observes the same flag. The pipeline checks it before each
/// workspace commit and hands it to the body generator.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of ongoing work.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fails with [`SynthesisError::Cancelled`] when cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the token has been cancelled.
    pub fn ensure_not_cancelled(&self) -> Result<(), SynthesisError> {
        if self.is_cancelled() {
            Err(SynthesisError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(observer.ensure_not_cancelled().is_ok());

        token.cancel();

        assert!(observer.is_cancelled());
        assert_eq!(observer.ensure_not_cancelled(), Err(SynthesisError::Cancelled));
    }
}
