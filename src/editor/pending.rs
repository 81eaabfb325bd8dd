//! Dirty-state tracking between a draft and its last saved value

/// True when the draft value differs from the baseline
pub fn has_pending_change<T: PartialEq + ?Sized>(current: &T, baseline: &T) -> bool {
    current != baseline
}

/// A draft value paired with the baseline it was last saved as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracked<T> {
    baseline: T,
    current: T,
}

impl<T: Clone + PartialEq> Tracked<T> {
    pub fn new(baseline: T) -> Self {
        Self {
            current: baseline.clone(),
            baseline,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn baseline(&self) -> &T {
        &self.baseline
    }

    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.current);
    }

    pub fn is_dirty(&self) -> bool {
        has_pending_change(&self.current, &self.baseline)
    }

    /// Discard the draft
    pub fn reset(&mut self) {
        self.current = self.baseline.clone();
    }

    /// Move the baseline to a value confirmed saved, keeping the draft
    pub fn rebase(&mut self, saved: T) {
        self.baseline = saved;
    }
}

/// Per-field dirty flags of a lane editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub name: bool,
    pub custom_lists: bool,
    pub inherit_parent_restrictions: bool,
}

impl PendingChanges {
    /// Whether the "cancel changes" control should be offered
    pub fn any(&self) -> bool {
        self.name || self.custom_lists || self.inherit_parent_restrictions
    }
}
