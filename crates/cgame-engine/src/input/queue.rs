use std::collections::VecDeque;

use super::event::Event;

/// Events held for a game that never polls; older ones are discarded.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// FIFO of translated events waiting to be polled.
///
/// The runtime pushes events as the platform delivers them; the game pops them
/// with [`poll`](EventQueue::poll) at the top of its frame. At most
/// `capacity` events are kept: a push into a full queue drops the oldest one.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<Event>,
    capacity: usize,
    overflowing: bool,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_capacity(MAX_PENDING_EVENTS)
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue keeping at most `capacity` events (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            overflowing: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, ev: Event) {
        if self.events.len() >= self.capacity {
            if !self.overflowing {
                log::warn!("event queue full ({} pending); dropping oldest events", self.capacity);
                self.overflowing = true;
            }
            self.events.pop_front();
        }
        self.events.push_back(ev);
    }

    /// Pops the oldest pending event.
    pub fn poll(&mut self) -> Option<Event> {
        self.overflowing = false;
        self.events.pop_front()
    }

    /// Removes and yields every pending event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.overflowing = false;
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.overflowing = false;
        self.events.clear();
    }
}
