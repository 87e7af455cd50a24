//! Holder for the current source snippet, and the trait the view reports into.

/// Receiver of selection snippet updates.
///
/// Exactly one call is made per handled selection change: either
/// [`set_selection`](SelectionSink::set_selection) with the source snippet, or
/// [`clear_selection`](SelectionSink::clear_selection).
pub trait SelectionSink {
    fn set_selection(&mut self, snippet: String);
    fn clear_selection(&mut self);
}

/// Identifies a subscription made with [`SelectionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Option<&str>)>;

/// Current selection snippet plus change notification.
///
/// # Example
///
/// ```
/// use selection_map::{SelectionSink, SelectionStore};
///
/// let mut store = SelectionStore::new();
/// store.set_selection("<b>x</b>".to_string());
/// assert_eq!(store.get(), Some("<b>x</b>"));
/// store.clear_selection();
/// assert_eq!(store.get(), None);
/// assert_eq!(store.revision(), 2);
/// ```
#[derive(Default)]
pub struct SelectionStore {
    current: Option<String>,
    revision: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Monotonic counter, bumped on every update (including clears).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers `listener`, called with the new value after every update.
    pub fn subscribe(&mut self, listener: impl FnMut(Option<&str>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(candidate, _)| *candidate != id);
        self.listeners.len() != before
    }

    fn update(&mut self, value: Option<String>) {
        self.current = value;
        self.revision += 1;
        let current = self.current.as_deref();
        for (_, listener) in &mut self.listeners {
            listener(current);
        }
    }
}

impl SelectionSink for SelectionStore {
    fn set_selection(&mut self, snippet: String) {
        self.update(Some(snippet));
    }

    fn clear_selection(&mut self) {
        self.update(None);
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("current", &self.current)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
