//! Control notifications.
//!
//! Observers subscribe to `start`, `end` and `change` notifications from an
//! [`OrbitController`](super::OrbitController). Delivery is synchronous,
//! in registration order, and carries nothing beyond the event kind.

use rustc_hash::FxHashMap;

/// The notifications an orbit controller emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A pointer drag or wheel gesture began.
    Start,
    /// A pointer drag or wheel gesture finished.
    End,
    /// The camera moved by a numerically significant amount.
    Change,
}

/// Handle returned by [`EventDispatcher::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(ControlEvent)>;

/// Per-kind list of boxed callbacks.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    listeners: FxHashMap<ControlEvent, Vec<(ListenerId, Callback)>>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<(ControlEvent, usize)> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("listeners", &counts)
            .finish()
    }
}

impl EventDispatcher {
    /// Create an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to one event kind.
    pub fn add_event_listener(
        &mut self,
        kind: ControlEvent,
        callback: impl FnMut(ControlEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Unsubscribe. Returns `false` if the id was not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        for list in self.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|(lid, _)| *lid == id) {
                drop(list.remove(pos));
                return true;
            }
        }
        false
    }

    /// Whether anything listens for `kind`.
    #[must_use]
    pub fn has_event_listener(&self, kind: ControlEvent) -> bool {
        self.listeners.get(&kind).is_some_and(|list| !list.is_empty())
    }

    /// Invoke every callback registered for `kind`.
    pub fn dispatch(&mut self, kind: ControlEvent) {
        if let Some(list) = self.listeners.get_mut(&kind) {
            for (_, callback) in list.iter_mut() {
                callback(kind);
            }
        }
    }
}
