use std::collections::HashMap;

/// Open/closed state for the detail popups of one marker layer, keyed by
/// the marker's position in that layer's own item sequence. Indices are
/// positional: reordering or re-merging the layer's items invalidates any
/// open entries, so callers must discard the set together with the old
/// ordering.
///
/// Entries are created lazily on first toggle and only ever overwritten,
/// never removed. Every layer owns its own independent instance.
#[derive(Debug, Clone, Default)]
pub(crate) struct ToggleSet {
    open: HashMap<usize, bool>,
}

impl ToggleSet {
    pub(crate) fn new() -> Self {
        ToggleSet::default()
    }

    /// Flips the flag for `index` and nothing else. An untouched index
    /// counts as closed.
    pub(crate) fn toggle(&mut self, index: usize) {
        let entry = self.open.entry(index).or_insert(false);
        *entry = !*entry;
    }

    #[allow(dead_code)]
    pub(crate) fn is_open(&self, index: usize) -> bool {
        self.open.get(&index).copied().unwrap_or(false)
    }

    /// Indices currently open, ascending. Used for the map export so the
    /// renderer can restore popup state.
    pub(crate) fn open_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .open
            .iter()
            .filter(|(_, open)| **open)
            .map(|(index, _)| *index)
            .collect();
        indices.sort_unstable();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_index_is_closed() {
        let set = ToggleSet::new();
        assert!(!set.is_open(0));
        assert!(!set.is_open(417));
    }

    #[test]
    fn toggle_opens_then_closes() {
        let mut set = ToggleSet::new();
        set.toggle(3);
        assert!(set.is_open(3));
        set.toggle(3);
        assert!(!set.is_open(3));
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut set = ToggleSet::new();
        set.toggle(7);
        let before = set.is_open(7);
        set.toggle(7);
        set.toggle(7);
        assert_eq!(set.is_open(7), before);
    }

    #[test]
    fn toggle_does_not_leak_across_indices() {
        let mut set = ToggleSet::new();
        set.toggle(2);
        assert!(set.is_open(2));
        assert!(!set.is_open(1));
        assert!(!set.is_open(3));
    }

    #[test]
    fn independent_sets_share_nothing() {
        let mut layer_a = ToggleSet::new();
        let layer_b = ToggleSet::new();
        layer_a.toggle(3);
        assert!(layer_a.is_open(3));
        assert!(!layer_b.is_open(3));
    }

    #[test]
    fn open_indices_sorted_and_filtered() {
        let mut set = ToggleSet::new();
        set.toggle(9);
        set.toggle(1);
        set.toggle(5);
        set.toggle(5); // closed again, entry stays behind
        assert_eq!(set.open_indices(), vec![1, 9]);
    }
}
