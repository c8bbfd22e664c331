//! External events delivered to the simulation between ticks

/// Events the UI layer can send to the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// The arena was resized to `width` x `height`
    ViewportResized { width: f64, height: f64 },
    /// Clear all balls and reseed at the arena center (double click)
    ResetRequested,
}

/// Single-consumer queue of pending events.
/// The UI adapter pushes; the simulation drains at the start of each tick.
#[derive(Debug)]
pub struct EventQueue {
    events: Vec<SimEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Take all pending events in arrival order, leaving the queue empty
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
