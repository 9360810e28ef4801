use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Weak,
};

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::error::{NotifyError, Result};

type Callback = Arc<dyn Fn(&str) + Send + Sync>;

struct Subscriber {
    token: u64,
    live: Arc<AtomicBool>,
    callback: Callback,
}

struct ChannelState {
    disposed: bool,
    last_changed: Option<String>,
    next_token: u64,
    subscribers: SmallVec<[Subscriber; 4]>,
}

struct ChannelInner {
    state: Mutex<ChannelState>,
    // 串行化公告：跨线程公告必须按到达顺序完整送达（见 announce）。
    announce_gate: Mutex<()>,
}

/// Change-notification stream for one runtime instance.
///
/// Holds the name of the most recently announced property and a list of
/// subscribers. Delivery is synchronous and in subscription order; the handle
/// is cheap to clone and all clones share one stream.
///
/// Two states: Active (from construction) and Disposed (after [`dispose`]).
/// `announce` and `subscribe` fail with [`NotifyError::UseAfterDispose`] once
/// the channel is disposed; read-only accessors keep working.
///
/// [`dispose`]: NotificationChannel::dispose
#[derive(Clone)]
pub struct NotificationChannel {
    inner: Arc<ChannelInner>,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                state: Mutex::new(ChannelState {
                    disposed: false,
                    last_changed: None,
                    next_token: 0,
                    subscribers: SmallVec::new(),
                }),
                announce_gate: Mutex::new(()),
            }),
        }
    }

    /// Register a callback invoked with the property name on every announcement.
    ///
    /// No replay: the held last-changed name is not delivered to late
    /// subscribers; query it through [`last_changed`](Self::last_changed).
    pub fn subscribe(
        &self,
        callback: impl Fn(&str) + Send + Sync + 'static,
    ) -> Result<Subscription> {
        let mut state = self.inner.state.lock();
        if state.disposed {
            return Err(NotifyError::UseAfterDispose("subscribe"));
        }
        let token = state.next_token;
        state.next_token += 1;
        let live = Arc::new(AtomicBool::new(true));
        state.subscribers.push(Subscriber {
            token,
            live: live.clone(),
            callback: Arc::new(callback),
        });
        Ok(Subscription {
            channel: Arc::downgrade(&self.inner),
            live,
            token,
        })
    }

    /// Announce that `property` changed: record it as the last-changed name and
    /// invoke every live subscriber, in subscription order, on this thread.
    ///
    /// Concurrent announcers are serialized by an internal gate so subscribers
    /// observe announcements one at a time, in arrival order. Callbacks may
    /// subscribe or cancel, but must not announce (the gate is not reentrant);
    /// announcements belong to the owning object, not to observers.
    pub fn announce(&self, property: &str) -> Result {
        let _gate = self.inner.announce_gate.lock();
        // 快照后立即释放状态锁：送达期间允许订阅/退订。
        let snapshot: SmallVec<[(Arc<AtomicBool>, Callback); 4]> = {
            let mut state = self.inner.state.lock();
            if state.disposed {
                return Err(NotifyError::UseAfterDispose("announce"));
            }
            state.last_changed = Some(property.to_owned());
            state
                .subscribers
                .iter()
                .map(|s| (s.live.clone(), s.callback.clone()))
                .collect()
        };
        for (live, callback) in snapshot {
            if live.load(Ordering::Acquire) {
                callback(property);
            }
        }
        Ok(())
    }

    /// Name of the most recently announced property, or `None` before the
    /// first announcement. Still readable after dispose.
    pub fn last_changed(&self) -> Option<String> {
        self.inner.state.lock().last_changed.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().subscribers.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.lock().disposed
    }

    /// Release the stream: drop all subscribers and refuse further mutation.
    /// Safe to call more than once; only the first call does anything.
    pub fn dispose(&self) {
        let mut state = self.inner.state.lock();
        if state.disposed {
            return;
        }
        state.disposed = true;
        let dropped = state.subscribers.len();
        for sub in state.subscribers.drain(..) {
            sub.live.store(false, Ordering::Release);
        }
        tracing::debug!(subscribers = dropped, "notification channel disposed");
    }
}

/// One registration on a [`NotificationChannel`].
///
/// The single cancellation unit: [`cancel`](Subscription::cancel) releases this
/// registration and nothing else, independently of channel disposal. Dropping a
/// subscription cancels it.
pub struct Subscription {
    channel: Weak<ChannelInner>,
    live: Arc<AtomicBool>,
    token: u64,
}

impl Subscription {
    /// Idempotent; a second call (or a cancel racing channel disposal) is a no-op.
    pub fn cancel(&self) {
        if !self.live.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(inner) = self.channel.upgrade() {
            let mut state = inner.state.lock();
            state.subscribers.retain(|s| s.token != self.token);
        }
    }

    pub fn is_active(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
