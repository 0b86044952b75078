/// How long a success status stays on screen
pub const STATUS_DURATION_MS: u64 = 2000;

/// Identifies one shown status. Only the matching ticket can expire it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTicket(u64);

/// Single-slot transient status text.
///
/// Showing a new status replaces the old one and invalidates the old
/// ticket, so a timer armed for a previous status never clears a newer one.
#[derive(Debug, Default)]
pub struct StatusRegister {
    current: Option<String>,
    generation: u64,
}

impl StatusRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: &str) -> StatusTicket {
        self.generation += 1;
        self.current = Some(text.to_string());
        StatusTicket(self.generation)
    }

    /// Clear the status if `ticket` is still the latest. Returns true if cleared.
    pub fn expire(&mut self, ticket: StatusTicket) -> bool {
        if ticket.0 != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
