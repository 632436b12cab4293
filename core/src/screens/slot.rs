/// Holds the value for one visual slot and drops results from superseded loads.
///
/// Each load calls `begin` for a ticket; only the newest ticket may store
/// its value. Older completions are ignored even if they arrive later.
#[derive(Debug)]
pub struct LatestSlot<T> {
    generation: u64,
    value: Option<T>,
}

/// Identifies one load started on a `LatestSlot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            value: None,
        }
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Returns false and discards `value` if a newer load has started.
    pub fn complete(&mut self, ticket: Ticket, value: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Invalidates in-flight loads and empties the slot, as when a cell is reused.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.value = None;
    }
}
