/*
 * Process-scoped bookkeeping for windows and hooks. Handles are stored as
 * raw `isize` values so the tables stay portable; the Win32 layer wraps and
 * unwraps them at the boundary.
 *
 * Both tables are owned by the process context behind one lock. The windows
 * registry replaces the per-window properties the classic approach would
 * scatter over `SetProp`: every "strategy already applied" fact lives here,
 * keyed by window identity, and is removed explicitly when the window is
 * destroyed.
 */
use crate::classify::MarkerKind;
use std::collections::{HashMap, HashSet};

/// Raw window identity (an `HWND` as `isize`).
pub type WindowKey = isize;

#[derive(Debug, Default)]
pub struct WindowRegistry {
    processed: HashSet<WindowKey>,
    markers: HashMap<WindowKey, HashSet<MarkerKind>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a top-level window as styled. Returns true only the first
    /// time, so repeated activation events collapse into one apply pass.
    pub fn insert_processed(&mut self, key: WindowKey) -> bool {
        self.processed.insert(key)
    }

    pub fn is_processed(&self, key: WindowKey) -> bool {
        self.processed.contains(&key)
    }

    /// Records strategy `kind` for a window. Returns true when newly set;
    /// a false return means the strategy was already applied and the caller
    /// must not attach again.
    pub fn mark(&mut self, key: WindowKey, kind: MarkerKind) -> bool {
        self.markers.entry(key).or_default().insert(kind)
    }

    pub fn has_marker(&self, key: WindowKey, kind: MarkerKind) -> bool {
        self.markers
            .get(&key)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Explicit cleanup on a destroy notification. The handle value may be
    /// recycled by the OS, so a later window at the same address starts
    /// fresh.
    pub fn forget_window(&mut self, key: WindowKey) {
        self.processed.remove(&key);
        self.markers.remove(&key);
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty() && self.markers.is_empty()
    }
}

/// Thread id → activation-hook handle. Invariant: at most one hook per
/// thread at any time.
#[derive(Debug, Default)]
pub struct ThreadHookTable {
    hooks: HashMap<u32, isize>,
}

impl ThreadHookTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, thread_id: u32) -> bool {
        self.hooks.contains_key(&thread_id)
    }

    /// Records a hook for `thread_id`. Returns false (without replacing the
    /// record) when one already exists; the caller owns unhooking the
    /// redundant handle.
    pub fn insert(&mut self, thread_id: u32, hook: isize) -> bool {
        if self.hooks.contains_key(&thread_id) {
            return false;
        }
        self.hooks.insert(thread_id, hook);
        true
    }

    pub fn remove(&mut self, thread_id: u32) -> Option<isize> {
        self.hooks.remove(&thread_id)
    }

    /// Empties the table, yielding every recorded hook for teardown.
    pub fn drain_all(&mut self) -> Vec<(u32, isize)> {
        self.hooks.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{self, ControlClass};

    #[test]
    fn processed_set_is_idempotent() {
        let mut registry = WindowRegistry::new();
        assert!(registry.insert_processed(0x10));
        assert!(!registry.insert_processed(0x10));
        assert!(registry.is_processed(0x10));
        assert!(!registry.is_processed(0x20));
    }

    #[test]
    fn markers_are_isolated_per_strategy() {
        let mut registry = WindowRegistry::new();
        assert!(registry.mark(0x10, MarkerKind::ListView));
        assert!(registry.has_marker(0x10, MarkerKind::ListView));
        assert!(!registry.has_marker(0x10, MarkerKind::StaticPaint));
        assert!(!registry.has_marker(0x10, MarkerKind::TabStrip));

        // A second strategy on the same window is independent.
        assert!(registry.mark(0x10, MarkerKind::StaticPaint));
        // Re-scanning does not re-mark.
        assert!(!registry.mark(0x10, MarkerKind::ListView));
        assert!(!registry.mark(0x10, MarkerKind::StaticPaint));
    }

    #[test]
    fn forget_window_clears_all_state_for_that_window_only() {
        let mut registry = WindowRegistry::new();
        registry.insert_processed(0x10);
        registry.mark(0x10, MarkerKind::TopLevel);
        registry.insert_processed(0x20);
        registry.mark(0x20, MarkerKind::TabStrip);

        registry.forget_window(0x10);

        assert!(!registry.is_processed(0x10));
        assert!(!registry.has_marker(0x10, MarkerKind::TopLevel));
        // A recreated window at the same handle value is styled again.
        assert!(registry.insert_processed(0x10));
        assert!(registry.is_processed(0x20));
        assert!(registry.has_marker(0x20, MarkerKind::TabStrip));
    }

    #[test]
    fn hook_table_keeps_at_most_one_record_per_thread() {
        let mut table = ThreadHookTable::new();
        assert!(table.insert(7, 0x100));
        assert!(!table.insert(7, 0x200));
        assert_eq!(table.len(), 1);

        assert_eq!(table.remove(7), Some(0x100));
        assert_eq!(table.remove(7), None);
        assert!(table.is_empty());
    }

    #[test]
    fn drain_all_leaves_the_hook_table_empty() {
        let mut table = ThreadHookTable::new();
        table.insert(1, 0x100);
        table.insert(2, 0x200);
        table.insert(3, 0x300);

        let mut drained = table.drain_all();
        drained.sort_unstable();

        assert_eq!(drained, vec![(1, 0x100), (2, 0x200), (3, 0x300)]);
        assert!(table.is_empty());
        // Teardown is repeatable.
        assert!(table.drain_all().is_empty());
    }

    /*
     * End-to-end over the pure pieces: a "#32770" dialog activates twice,
     * its "SysListView32" child is classified twice; the top-level routine
     * runs once and the list-view interceptor attaches once.
     */
    #[test]
    fn activation_scenario_applies_each_strategy_exactly_once() {
        let mut registry = WindowRegistry::new();
        let dialog: WindowKey = 0x1000;
        let listview: WindowKey = 0x2000;

        assert_eq!(
            ControlClass::from_class_name("#32770"),
            ControlClass::DialogPage
        );

        let mut top_level_applies = 0;
        for _ in 0..2 {
            if registry.insert_processed(dialog) {
                registry.mark(dialog, MarkerKind::TopLevel);
                top_level_applies += 1;
            }
        }
        assert_eq!(top_level_applies, 1);

        let strategy =
            classify::strategy_for(ControlClass::from_class_name("SysListView32"), false);
        let marker = strategy.marker.expect("list views carry a marker");
        let mut attaches = 0;
        for _ in 0..2 {
            if registry.mark(listview, marker) {
                attaches += 1;
            }
        }
        assert_eq!(attaches, 1);
        assert!(registry.has_marker(listview, MarkerKind::ListView));
        assert!(!registry.has_marker(listview, MarkerKind::StaticPaint));
    }
}
