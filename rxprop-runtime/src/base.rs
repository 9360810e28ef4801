use parking_lot::Mutex;

use crate::bag::DisposeBag;
use crate::channel::{NotificationChannel, Subscription};
use crate::error::Result;

/// What a type must expose for generated accessors to drive notifications.
///
/// Host classes satisfy this by deriving from a base carrying [`ReactiveBase`];
/// the synthesizer checks for that base and refuses classes without it, so
/// fragments can assume the capability is present.
pub trait ReactiveCapability {
    /// The change stream announcements are delivered on.
    fn changed(&self) -> &NotificationChannel;

    /// Hand a subscription to the instance; it is cancelled when the instance
    /// is disposed.
    fn add_to_dispose_bag(&self, subscription: Subscription) -> Result;
}

/// Notification core embedded in (or held by) every reactive host object.
///
/// Pairs one [`NotificationChannel`] with one [`DisposeBag`] and ties their
/// lifetimes together: `dispose` releases the bag first, then the channel, so
/// owned subscriptions are cancelled before the stream itself goes away.
#[derive(Default)]
pub struct ReactiveBase {
    channel: NotificationChannel,
    bag: Mutex<DisposeBag>,
}

impl ReactiveBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce a property change to every subscriber. Generated setters call
    /// this after writing the backing field.
    pub fn announce_change(&self, property: &str) -> Result {
        self.channel.announce(property)
    }

    /// Subscribe to change announcements. The returned subscription is the
    /// caller's to keep or to park in the bag via
    /// [`add_to_dispose_bag`](ReactiveCapability::add_to_dispose_bag).
    pub fn subscribe(
        &self,
        callback: impl Fn(&str) + Send + Sync + 'static,
    ) -> Result<Subscription> {
        self.channel.subscribe(callback)
    }

    pub fn last_changed(&self) -> Option<String> {
        self.channel.last_changed()
    }

    pub fn is_disposed(&self) -> bool {
        self.channel.is_disposed()
    }

    /// Tear down: release owned subscriptions, then dispose the channel.
    /// Idempotent; everything after the first call is a no-op.
    pub fn dispose(&self) {
        self.bag.lock().release();
        self.channel.dispose();
    }
}

impl ReactiveCapability for ReactiveBase {
    fn changed(&self) -> &NotificationChannel {
        &self.channel
    }

    fn add_to_dispose_bag(&self, subscription: Subscription) -> Result {
        self.bag.lock().add(subscription)
    }
}

impl Drop for ReactiveBase {
    fn drop(&mut self) {
        self.dispose();
    }
}
