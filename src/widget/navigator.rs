/// Active-row state machine for the dropdown. `None` means no row is active
/// (the freshly-populated state); movement clamps at both ends and never
/// wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListNavigator {
    active: Option<usize>,
}

impl ListNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Called whenever the candidate list is replaced.
    pub fn reset(&mut self) {
        self.active = None;
    }

    pub fn move_down(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let next = match self.active {
            None => 0,
            Some(current) => current.saturating_add(1).min(len - 1),
        };
        let moved = self.active != Some(next);
        self.active = Some(next);
        moved
    }

    /// Clamps at the first row; never goes back to `None`.
    pub fn move_up(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let next = match self.active {
            None => 0,
            Some(current) => current.saturating_sub(1),
        };
        let moved = self.active != Some(next);
        self.active = Some(next);
        moved
    }

    /// Mouse hover jumps straight to a row.
    pub fn hover(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        let moved = self.active != Some(index);
        self.active = Some(index);
        moved
    }
}
