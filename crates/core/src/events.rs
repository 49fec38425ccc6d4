//! Input event subscription.
//!
//! The grid never reaches for ambient global state: whoever owns the event
//! loop hands it an [`EventSource`] and feeds events into it. [`EventHub`] is
//! the stock implementation, a cloneable handle to a shared listener registry.
//!
//! Click positions are physical pixels relative to the surface's top-left
//! corner; the grid converts them to cells.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

/// Token returned by every subscription, used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Pointer position in physical pixels relative to the surface origin.
///
/// Can be negative or past the surface size when the click lands on padding
/// or a border around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPos {
    pub x: i32,
    pub y: i32,
}

impl PointerPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

pub type KeyListener<K> = Box<dyn FnMut(&K)>;
pub type ClickListener = Box<dyn FnMut(PointerPos)>;

/// Something that delivers key-down and click events to subscribers.
pub trait EventSource {
    /// Key event payload, forwarded to listeners unfiltered.
    type Key;

    fn add_key_listener(&self, listener: KeyListener<Self::Key>) -> ListenerId;

    fn add_click_listener(&self, listener: ClickListener) -> ListenerId;

    /// Remove a listener. Returns false when the id is unknown.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// Placeholder event source for grids that take no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoEvents;

struct Slot<L> {
    id: ListenerId,
    // `None` while the listener is running.
    listener: Option<L>,
}

struct Registry<K> {
    next_id: u64,
    keys: Vec<Slot<KeyListener<K>>>,
    clicks: Vec<Slot<ClickListener>>,
}

impl<K> Registry<K> {
    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Shared listener registry with synchronous, in-order dispatch.
///
/// Clones share the same listeners. Listeners may subscribe or remove
/// listeners (themselves included) while they run: a listener added during a
/// dispatch first sees the next event, and a removed one is never called
/// again. A listener is not re-entered if it emits on the hub it is
/// registered with.
pub struct EventHub<K> {
    inner: Rc<RefCell<Registry<K>>>,
}

impl<K> EventHub<K> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                keys: Vec::new(),
                clicks: Vec::new(),
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        let reg = self.inner.borrow();
        reg.keys.len() + reg.clicks.len()
    }

    /// Deliver a key-down event to every key listener.
    pub fn emit_key(&self, key: &K) {
        let ids: Vec<ListenerId> = self.inner.borrow().keys.iter().map(|s| s.id).collect();
        for id in ids {
            let Some(mut listener) = take_listener(&mut self.inner.borrow_mut().keys, id) else {
                continue;
            };
            listener(key);
            restore_listener(&mut self.inner.borrow_mut().keys, id, listener);
        }
    }

    /// Deliver a click to every click listener.
    pub fn emit_click(&self, pos: PointerPos) {
        let ids: Vec<ListenerId> = self.inner.borrow().clicks.iter().map(|s| s.id).collect();
        for id in ids {
            let Some(mut listener) = take_listener(&mut self.inner.borrow_mut().clicks, id) else {
                continue;
            };
            listener(pos);
            restore_listener(&mut self.inner.borrow_mut().clicks, id, listener);
        }
    }
}

fn take_listener<L>(slots: &mut [Slot<L>], id: ListenerId) -> Option<L> {
    slots.iter_mut().find(|s| s.id == id)?.listener.take()
}

// A listener removed while it ran has no slot left and is dropped here.
fn restore_listener<L>(slots: &mut [Slot<L>], id: ListenerId, listener: L) {
    if let Some(slot) = slots.iter_mut().find(|s| s.id == id) {
        slot.listener = Some(listener);
    }
}

impl<K> EventSource for EventHub<K> {
    type Key = K;

    fn add_key_listener(&self, listener: KeyListener<K>) -> ListenerId {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id();
        reg.keys.push(Slot {
            id,
            listener: Some(listener),
        });
        debug!("key listener {:?} added", id);
        id
    }

    fn add_click_listener(&self, listener: ClickListener) -> ListenerId {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id();
        reg.clicks.push(Slot {
            id,
            listener: Some(listener),
        });
        debug!("click listener {:?} added", id);
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut reg = self.inner.borrow_mut();
        let before = reg.keys.len() + reg.clicks.len();
        reg.keys.retain(|s| s.id != id);
        reg.clicks.retain(|s| s.id != id);
        let removed = reg.keys.len() + reg.clicks.len() != before;
        if removed {
            debug!("listener {:?} removed", id);
        }
        removed
    }
}

impl<K> Clone for EventHub<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K> Default for EventHub<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for EventHub<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.inner.borrow();
        f.debug_struct("EventHub")
            .field("key_listeners", &reg.keys.len())
            .field("click_listeners", &reg.clicks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test_log::test]
    fn delivers_in_registration_order() {
        let hub: EventHub<char> = EventHub::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            hub.add_key_listener(Box::new(move |k: &char| log.borrow_mut().push(format!("{tag}{k}"))));
        }

        hub.emit_key(&'x');
        hub.emit_key(&'y');
        assert_eq!(*log.borrow(), vec!["ax", "bx", "ay", "by"]);
    }

    #[test_log::test]
    fn key_and_click_are_separate() {
        let hub: EventHub<u8> = EventHub::new();
        let keys = Rc::new(Cell::new(0));
        let clicks = Rc::new(Cell::new(0));

        let k = Rc::clone(&keys);
        hub.add_key_listener(Box::new(move |_: &u8| k.set(k.get() + 1)));
        let c = Rc::clone(&clicks);
        hub.add_click_listener(Box::new(move |_| c.set(c.get() + 1)));

        hub.emit_click(PointerPos::new(1, 1));
        assert_eq!((keys.get(), clicks.get()), (0, 1));
        hub.emit_key(&7);
        assert_eq!((keys.get(), clicks.get()), (1, 1));
    }

    #[test_log::test]
    fn removed_listener_stops_receiving() {
        let hub: EventHub<()> = EventHub::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = hub.add_click_listener(Box::new(move |_| h.set(h.get() + 1)));

        hub.emit_click(PointerPos::default());
        assert!(hub.remove_listener(id));
        assert!(!hub.remove_listener(id));
        hub.emit_click(PointerPos::default());

        assert_eq!(hits.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test_log::test]
    fn listener_can_remove_itself() {
        let hub: EventHub<()> = EventHub::new();
        let hits = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let (h, me, handle) = (Rc::clone(&hits), Rc::clone(&own_id), hub.clone());
        let id = hub.add_key_listener(Box::new(move |_: &()| {
            h.set(h.get() + 1);
            if let Some(id) = me.get() {
                handle.remove_listener(id);
            }
        }));
        own_id.set(Some(id));

        hub.emit_key(&());
        hub.emit_key(&());
        assert_eq!(hits.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test_log::test]
    fn listener_added_during_dispatch_waits_for_next_event() {
        let hub: EventHub<()> = EventHub::new();
        let late_hits = Rc::new(Cell::new(0));
        let added = Rc::new(Cell::new(false));

        let (handle, hits, flag) = (hub.clone(), Rc::clone(&late_hits), Rc::clone(&added));
        hub.add_key_listener(Box::new(move |_: &()| {
            if !flag.get() {
                flag.set(true);
                let hits = Rc::clone(&hits);
                handle.add_key_listener(Box::new(move |_: &()| hits.set(hits.get() + 1)));
            }
        }));

        hub.emit_key(&());
        assert_eq!(late_hits.get(), 0);
        hub.emit_key(&());
        assert_eq!(late_hits.get(), 1);
    }

    #[test_log::test]
    fn listener_removed_by_earlier_one_is_skipped() {
        let hub: EventHub<()> = EventHub::new();
        let victim_hits = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None));

        let (handle, v) = (hub.clone(), Rc::clone(&victim));
        hub.add_key_listener(Box::new(move |_: &()| {
            if let Some(id) = v.get() {
                handle.remove_listener(id);
            }
        }));
        let h = Rc::clone(&victim_hits);
        let id = hub.add_key_listener(Box::new(move |_: &()| h.set(h.get() + 1)));
        victim.set(Some(id));

        hub.emit_key(&());
        assert_eq!(victim_hits.get(), 0);
    }

    #[test_log::test]
    fn ids_are_unique_across_kinds() {
        let hub: EventHub<()> = EventHub::new();
        let a = hub.add_key_listener(Box::new(|_: &()| {}));
        let b = hub.add_click_listener(Box::new(|_| {}));
        assert_ne!(a, b);
        assert_eq!(hub.listener_count(), 2);
    }
}
