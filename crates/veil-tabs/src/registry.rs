//! Tab Registry
//!
//! Holds the tabs of one browsing session in display order.
//! Exactly one tab is active at all times and the last tab cannot be closed.

use crate::error::TabError;
use crate::tab::{NewTabTemplate, Tab, TabId};
use crate::Result;

/// What `close_tab` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab was removed
    Closed { was_active: bool },
    /// The tab is the only one left and stays open
    LastTab,
    /// No tab has that id
    NotFound,
}

#[derive(Debug, Clone)]
pub struct TabRegistry {
    /// Tabs in display order
    tabs: Vec<Tab>,
    /// Next id to hand out
    next_id: u64,
    /// Placeholder for new tabs
    template: NewTabTemplate,
}

impl TabRegistry {
    /// Create a registry holding one active, non-incognito tab
    pub fn new() -> Self {
        Self::with_template(NewTabTemplate::default(), false)
    }

    /// Create a registry whose first tab takes the session's incognito mode
    pub fn with_template(template: NewTabTemplate, incognito: bool) -> Self {
        let mut registry = Self {
            tabs: Vec::new(),
            next_id: 1,
            template,
        };
        registry.create_tab(incognito);
        registry
    }

    pub fn template(&self) -> &NewTabTemplate {
        &self.template
    }

    /// Open a new tab at the end of the strip and make it active
    pub fn create_tab(&mut self, incognito: bool) -> TabId {
        let id = TabId::new(self.next_id);
        self.next_id += 1;

        for tab in &mut self.tabs {
            tab.blur();
        }

        let mut tab = Tab::new(id, &self.template, incognito);
        tab.activate();
        self.tabs.push(tab);

        tracing::info!(tab_id = %id, incognito, "Created new tab");

        id
    }

    /// Close a tab.
    ///
    /// The only remaining tab is never closed. When the active tab is closed
    /// the first remaining tab in strip order becomes active.
    pub fn close_tab(&mut self, id: TabId) -> CloseOutcome {
        let Some(index) = self.position(id) else {
            tracing::debug!(tab_id = %id, "Close ignored, unknown tab");
            return CloseOutcome::NotFound;
        };

        if self.tabs.len() == 1 {
            tracing::debug!(tab_id = %id, "Close ignored, last tab");
            return CloseOutcome::LastTab;
        }

        let removed = self.tabs.remove(index);
        if removed.is_active {
            if let Some(first) = self.tabs.first_mut() {
                first.activate();
            }
        }

        tracing::info!(tab_id = %id, was_active = removed.is_active, "Closed tab");

        CloseOutcome::Closed {
            was_active: removed.is_active,
        }
    }

    /// Make a tab the active one. Unknown ids leave the registry untouched
    /// and return false.
    pub fn switch_tab(&mut self, id: TabId) -> bool {
        if self.position(id).is_none() {
            tracing::debug!(tab_id = %id, "Switch ignored, unknown tab");
            return false;
        }

        for tab in &mut self.tabs {
            if tab.id == id {
                tab.activate();
            } else {
                tab.blur();
            }
        }

        true
    }

    /// Rewrite the active tab's location and title
    pub fn update_active_tab(&mut self, url: String, title: String) -> TabId {
        let tab = self.active_mut();
        tracing::debug!(tab_id = %tab.id, url = %url, "Updating active tab");
        tab.navigate(url, title);
        tab.id
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_or_err(&self, id: TabId) -> Result<&Tab> {
        self.get(id).ok_or(TabError::NotFound(id))
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.position(id).is_some()
    }

    pub fn active(&self) -> &Tab {
        let index = self.active_index();
        &self.tabs[index]
    }

    pub fn active_id(&self) -> TabId {
        self.active().id
    }

    /// All tabs in strip order
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Verify the registry invariants: at least one tab, exactly one active,
    /// ids strictly increasing in strip order.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.tabs.is_empty() {
            return Err("registry is empty".to_string());
        }

        let active = self.tabs.iter().filter(|t| t.is_active).count();
        if active != 1 {
            return Err(format!("expected one active tab, found {}", active));
        }

        if self.tabs.windows(2).any(|w| w[0].id >= w[1].id) {
            return Err("tab ids are not in creation order".to_string());
        }

        Ok(())
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn active_index(&self) -> usize {
        // Exactly one tab is active whenever the registry is consistent
        self.tabs.iter().position(|t| t.is_active).unwrap_or(0)
    }

    fn active_mut(&mut self) -> &mut Tab {
        let index = self.active_index();
        &mut self.tabs[index]
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn active_ids(registry: &TabRegistry) -> Vec<TabId> {
        registry
            .iter()
            .filter(|t| t.is_active)
            .map(|t| t.id)
            .collect()
    }

    #[test]
    fn test_starts_with_one_active_tab() {
        let registry = TabRegistry::new();
        assert_eq!(registry.len(), 1);
        assert!(registry.active().is_active);
        assert!(registry.active().is_blank());
        assert!(!registry.active().is_incognito);
        registry.check_invariants().unwrap();
    }

    #[test]
    fn test_first_tab_takes_session_incognito() {
        let registry = TabRegistry::with_template(NewTabTemplate::default(), true);
        assert_eq!(registry.len(), 1);
        assert!(registry.active().is_incognito);
        registry.check_invariants().unwrap();
    }

    #[test]
    fn test_create_activates_new_tab() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();

        let second = registry.create_tab(true);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_id(), second);
        assert!(!registry.get(first).unwrap().is_active);
        assert!(registry.get(second).unwrap().is_incognito);
        assert!(second > first);
        registry.check_invariants().unwrap();
    }

    #[test]
    fn test_close_last_tab_is_rejected() {
        let mut registry = TabRegistry::new();
        let only = registry.active_id();

        assert_eq!(registry.close_tab(only), CloseOutcome::LastTab);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_id(), only);
    }

    #[test]
    fn test_close_active_moves_to_first_remaining() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        let second = registry.create_tab(false);
        let third = registry.create_tab(false);

        registry.switch_tab(second);
        assert_eq!(
            registry.close_tab(second),
            CloseOutcome::Closed { was_active: true }
        );

        assert_eq!(registry.active_id(), first);
        assert_eq!(
            registry.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![first, third]
        );
        registry.check_invariants().unwrap();
    }

    #[test]
    fn test_close_first_active_tab_activates_next_in_order() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        let second = registry.create_tab(false);
        registry.create_tab(false);
        registry.switch_tab(first);

        registry.close_tab(first);

        assert_eq!(registry.active_id(), second);
    }

    #[test]
    fn test_close_background_tab_keeps_active() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        let second = registry.create_tab(false);

        assert_eq!(
            registry.close_tab(first),
            CloseOutcome::Closed { was_active: false }
        );
        assert_eq!(registry.active_id(), second);
    }

    #[test]
    fn test_close_unknown_tab() {
        let mut registry = TabRegistry::new();
        registry.create_tab(false);
        assert_eq!(registry.close_tab(TabId::new(99)), CloseOutcome::NotFound);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_switch_is_idempotent() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        registry.create_tab(false);

        assert!(registry.switch_tab(first));
        let once: Vec<_> = registry.iter().map(|t| (t.id, t.is_active)).collect();
        assert!(registry.switch_tab(first));
        let twice: Vec<_> = registry.iter().map(|t| (t.id, t.is_active)).collect();

        assert_eq!(once, twice);
        assert_eq!(active_ids(&registry), vec![first]);
    }

    #[test]
    fn test_switch_unknown_is_noop() {
        let mut registry = TabRegistry::new();
        let active = registry.active_id();
        registry.create_tab(false);
        let active_after_create = registry.active_id();

        assert!(!registry.switch_tab(TabId::new(1000)));
        assert_eq!(registry.active_id(), active_after_create);
        assert_ne!(active, active_after_create);
    }

    #[test]
    fn test_update_active_tab() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        let second = registry.create_tab(false);

        let updated =
            registry.update_active_tab("https://github.com".to_string(), "Github".to_string());

        assert_eq!(updated, second);
        assert_eq!(registry.get(second).unwrap().url, "https://github.com");
        assert!(registry.get(first).unwrap().is_blank());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut registry = TabRegistry::new();
        let second = registry.create_tab(false);
        registry.close_tab(second);
        let third = registry.create_tab(false);
        assert!(third > second);
    }

    #[test]
    fn test_get_or_err() {
        let registry = TabRegistry::new();
        assert_eq!(
            registry.get_or_err(TabId::new(5)).unwrap_err(),
            TabError::NotFound(TabId::new(5))
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create(bool),
        Close(usize),
        Switch(usize),
        Update,
    }

    fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
        prop::collection::vec(
            prop_oneof![
                3 => any::<bool>().prop_map(Op::Create),
                3 => (0..12usize).prop_map(Op::Close),
                2 => (0..12usize).prop_map(Op::Switch),
                1 => Just(Op::Update),
            ],
            1..80,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn registry_invariants_hold(ops in arb_ops()) {
            let mut registry = TabRegistry::new();

            for op in &ops {
                // Picking ids past the end exercises the unknown-id paths
                let pick = |registry: &TabRegistry, idx: usize| {
                    registry
                        .tabs()
                        .get(idx)
                        .map(|t| t.id)
                        .unwrap_or(TabId::new(10_000 + idx as u64))
                };

                match op {
                    Op::Create(incognito) => {
                        let before = registry.len();
                        let id = registry.create_tab(*incognito);
                        prop_assert_eq!(registry.len(), before + 1);
                        prop_assert_eq!(registry.active_id(), id);
                    }
                    Op::Close(idx) => {
                        let id = pick(&registry, *idx);
                        let before: Vec<TabId> = registry.iter().map(|t| t.id).collect();
                        let was_active = registry.active_id() == id;

                        match registry.close_tab(id) {
                            CloseOutcome::LastTab => prop_assert_eq!(before.len(), 1),
                            CloseOutcome::NotFound => prop_assert!(!before.contains(&id)),
                            CloseOutcome::Closed { was_active: reported } => {
                                prop_assert_eq!(reported, was_active);
                                prop_assert_eq!(registry.len(), before.len() - 1);
                                if was_active {
                                    prop_assert_eq!(registry.active_id(), registry.tabs()[0].id);
                                }
                            }
                        }
                    }
                    Op::Switch(idx) => {
                        let id = pick(&registry, *idx);
                        let previous = registry.active_id();
                        if registry.switch_tab(id) {
                            prop_assert_eq!(registry.active_id(), id);
                        } else {
                            prop_assert_eq!(registry.active_id(), previous);
                        }
                    }
                    Op::Update => {
                        let id = registry.update_active_tab(
                            "https://example.com".to_string(),
                            "Example".to_string(),
                        );
                        prop_assert_eq!(id, registry.active_id());
                    }
                }

                prop_assert!(registry.check_invariants().is_ok(), "{:?}", registry.check_invariants());
            }
        }
    }
}
