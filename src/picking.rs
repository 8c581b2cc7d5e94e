use std::collections::HashSet;
use std::hash::Hash;
use std::sync::mpsc::{self, Receiver, Sender};

/// Published once per logical pick operation, carrying the whole resulting set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickEvent<T> {
    pub revision: u64,
    pub picked: Vec<T>,
}

/// Observable set of picked items.
///
/// The main viewer and the satellite viewer both read the same instance;
/// anything else that reacts to picking subscribes and drains its receiver.
#[derive(Debug)]
pub struct PickedState<T> {
    picked: Vec<T>,
    members: HashSet<T>,
    listeners: Vec<Sender<PickEvent<T>>>,
    revision: u64,
}

impl<T> Default for PickedState<T> {
    fn default() -> Self {
        Self {
            picked: Vec::new(),
            members: HashSet::new(),
            listeners: Vec::new(),
            revision: 0,
        }
    }
}

impl<T: Copy + Eq + Hash> PickedState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<PickEvent<T>> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    pub fn is_picked(&self, item: T) -> bool {
        self.members.contains(&item)
    }

    pub fn picked(&self) -> &[T] {
        &self.picked
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets the membership of one item; returns whether anything changed.
    pub fn pick(&mut self, item: T, picked: bool) -> bool {
        let changed = self.set_member(item, picked);
        if changed {
            self.publish();
        }
        changed
    }

    pub fn toggle(&mut self, item: T) -> bool {
        let picked = !self.is_picked(item);
        self.pick(item, picked);
        picked
    }

    pub fn clear(&mut self) -> bool {
        self.pick_exactly(std::iter::empty())
    }

    /// Replaces the whole set as a single batch.
    pub fn pick_exactly(&mut self, items: impl IntoIterator<Item = T>) -> bool {
        let wanted = items.into_iter().collect::<Vec<_>>();
        let wanted_set = wanted.iter().copied().collect::<HashSet<_>>();

        let mut changed = false;
        for item in self.picked.clone() {
            if !wanted_set.contains(&item) {
                changed |= self.set_member(item, false);
            }
        }
        for item in wanted {
            changed |= self.set_member(item, true);
        }

        if changed {
            self.publish();
        }
        changed
    }

    fn set_member(&mut self, item: T, picked: bool) -> bool {
        if picked {
            if !self.members.insert(item) {
                return false;
            }
            self.picked.push(item);
        } else {
            if !self.members.remove(&item) {
                return false;
            }
            self.picked.retain(|known| *known != item);
        }
        true
    }

    fn publish(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        let event = PickEvent {
            revision: self.revision,
            picked: self.picked.clone(),
        };
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_unpicks() {
        let mut state = PickedState::new();
        assert!(state.toggle(3));
        assert!(state.is_picked(3));
        assert!(!state.toggle(3));
        assert!(!state.is_picked(3));
        assert!(state.is_empty());
    }

    #[test]
    fn batch_publishes_one_event_with_the_full_set() {
        let mut state = PickedState::new();
        let rx = state.subscribe();
        state.pick(1, true);

        assert!(state.pick_exactly([4, 5, 6]));
        let events = rx.try_iter().collect::<Vec<_>>();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].picked, vec![4, 5, 6]);
        assert_eq!(events[1].revision, state.revision());
    }

    #[test]
    fn unchanged_batches_are_silent() {
        let mut state = PickedState::new();
        state.pick_exactly([1, 2]);
        let rx = state.subscribe();

        assert!(!state.pick_exactly([2, 1]));
        assert!(!state.pick(1, true));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn every_subscriber_sees_the_same_state() {
        let mut state = PickedState::new();
        let main = state.subscribe();
        let satellite = state.subscribe();

        state.toggle(8);
        assert_eq!(main.try_recv().unwrap().picked, vec![8]);
        assert_eq!(satellite.try_recv().unwrap().picked, vec![8]);

        drop(satellite);
        state.clear();
        assert_eq!(main.try_recv().unwrap().picked, Vec::<i32>::new());
    }
}
