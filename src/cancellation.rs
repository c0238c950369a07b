use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::errors::{SemanticTokensError, SemanticTokensResult};

/// Cooperative cancellation. Work checks the token at its own suspension
/// points; nothing is preempted.
pub trait CancellationToken {
    fn is_cancellation_requested(&self) -> bool;
}

pub fn throw_if_cancellation_requested<T>(token: &T) -> SemanticTokensResult
where
    T: CancellationToken + ?Sized,
{
    if token.is_cancellation_requested() {
        Err(SemanticTokensError::Cancelled)
    } else {
        Ok(())
    }
}

/// A token that is never cancelled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancelled;

impl CancellationToken for NeverCancelled {
    fn is_cancellation_requested(&self) -> bool {
        false
    }
}

/// Shared flag. Clones observe the same state, so the host keeps one clone and
/// hands another to the request.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> CancellationFlag {
        CancellationFlag::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl CancellationToken for CancellationFlag {
    fn is_cancellation_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl CancellationToken for AtomicBool {
    fn is_cancellation_requested(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

impl<T: CancellationToken + ?Sized> CancellationToken for &T {
    fn is_cancellation_requested(&self) -> bool {
        (**self).is_cancellation_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_clones_share_state() {
        let flag = CancellationFlag::new();
        let request = flag.clone();
        assert!(throw_if_cancellation_requested(&request).is_ok());

        flag.cancel();
        assert!(request.is_cancellation_requested());
        assert_eq!(
            throw_if_cancellation_requested(&request),
            Err(SemanticTokensError::Cancelled)
        );
    }

    #[test]
    fn never_cancelled_stays_clear() {
        assert!(!NeverCancelled.is_cancellation_requested());
        assert!(throw_if_cancellation_requested(&NeverCancelled).is_ok());
    }

    #[test]
    fn atomic_bool_is_a_token() {
        let flag = AtomicBool::new(false);
        assert!(!flag.is_cancellation_requested());
        flag.store(true, Ordering::SeqCst);
        assert!(throw_if_cancellation_requested(&flag).is_err());
    }
}
