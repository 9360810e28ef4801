use crate::channel::Subscription;
use crate::error::{NotifyError, Result};

/// Collection of subscriptions released together.
///
/// Owns every [`Subscription`] added to it and cancels them all, in insertion
/// order, on [`release`](DisposeBag::release). A released bag refuses further
/// additions instead of silently leaking them.
#[derive(Default)]
pub struct DisposeBag {
    items: Vec<Subscription>,
    released: bool,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `subscription`; it will be cancelled when the bag is
    /// released. Fails after [`release`](DisposeBag::release).
    pub fn add(&mut self, subscription: Subscription) -> Result {
        if self.released {
            return Err(NotifyError::UseAfterDispose("add_to_dispose_bag"));
        }
        self.items.push(subscription);
        Ok(())
    }

    /// Cancel every held subscription, in insertion order. Only the first call
    /// releases; later calls are no-ops.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let dropped = self.items.len();
        for sub in self.items.drain(..) {
            sub.cancel();
        }
        if dropped > 0 {
            tracing::debug!(subscriptions = dropped, "dispose bag released");
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.release();
    }
}
