// ============================================================================
// REACTIVITY - shared value + subscribers
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Reactive state. Clones share the value and the subscriber list.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Callback<T>)>>>,
    next_id: Rc<Cell<u64>>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.value.borrow())
    }

    /// Replaces the value, then notifies once
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutates in place, then notifies once
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sub, _)| *sub != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    // Callbacks get a snapshot, so they may call set()/subscribe() themselves
    fn notify(&self) {
        let snapshot = self.get();
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_new_value() {
        let state = ReactiveState::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.subscribe(move |v| sink.borrow_mut().push(*v));

        state.set(2);
        state.update(|v| *v += 3);

        assert_eq!(*seen.borrow(), vec![2, 5]);
    }

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(String::from("a"));
        let other = state.clone();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        state.subscribe(move |_| counter.set(counter.get() + 1));

        other.set("b".to_string());

        assert_eq!(state.get(), "b");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let state = ReactiveState::new(0);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let id = state.subscribe(move |_| counter.set(counter.get() + 1));

        state.set(1);
        state.unsubscribe(id);
        state.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn callback_may_write_back() {
        let state = ReactiveState::new(0);
        let inner = state.clone();
        state.subscribe(move |v| {
            if *v == 1 {
                inner.set(10);
            }
        });

        state.set(1);

        assert_eq!(state.get(), 10);
    }
}
