//! # Change Notifier
//!
//! A small observer registry. Listeners are boxed closures keyed by a
//! [`SubscriptionToken`], called in subscription order with a shared reference
//! to the notifying subject.

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Broadcasts "something changed" to every subscribed listener.
///
/// `S` is the state listeners get to read while they are being notified.
pub struct ChangeNotifier<S: ?Sized> {
    next_token: u64,
    listeners: Vec<(SubscriptionToken, Box<dyn FnMut(&S)>)>,
}

impl<S: ?Sized> ChangeNotifier<S> {
    /// Creates a notifier with no listeners.
    pub fn new() -> Self {
        ChangeNotifier {
            next_token: 0,
            listeners: Vec::new(),
        }
    }

    /// Adds a listener and returns the token that removes it.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionToken
    where
        F: FnMut(&S) + 'static,
    {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.listeners.push((token, Box::new(listener)));
        token
    }

    /// Removes a listener. Returns `false` if the token was unknown.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != token);
        self.listeners.len() != before
    }

    /// Calls every listener once.
    pub fn notify(&mut self, subject: &S) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(subject);
        }
    }

    /// Number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<S: ?Sized> Default for ChangeNotifier<S> {
    fn default() -> Self {
        Self::new()
    }
}
