//! Single-selection set of highlighted reports.

use scape_core::RecordId;

/// At most one selected report; selecting one clears the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<RecordId>);

impl Selection {
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn of(id: RecordId) -> Self {
        Self(Some(id))
    }

    pub const fn select(&mut self, id: RecordId) {
        self.0 = Some(id);
    }

    pub const fn clear(&mut self) {
        self.0 = None;
    }

    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.0 == Some(id)
    }

    #[must_use]
    pub const fn selected(&self) -> Option<RecordId> {
        self.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Drop the selection if it names a report no longer present.
    pub fn retain_in(&mut self, mut ids: impl Iterator<Item = RecordId>) {
        if let Some(id) = self.0 {
            if !ids.any(|candidate| candidate == id) {
                self.0 = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_replaces_previous() {
        let mut selection = Selection::of(1);
        selection.select(2);
        assert!(selection.contains(2));
        assert!(!selection.contains(1));
    }

    #[test]
    fn retain_in_drops_vanished_id() {
        let mut selection = Selection::of(5);
        selection.retain_in([1, 2, 3].into_iter());
        assert!(selection.is_empty());

        let mut kept = Selection::of(2);
        kept.retain_in([1, 2, 3].into_iter());
        assert_eq!(kept.selected(), Some(2));
    }
}
