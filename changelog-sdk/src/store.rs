//! Ordered, id-keyed collection behind a view, plus its selection.
//!
//! The selection is stored as an id and resolved against the sequence on
//! every read, so the selected entry and its list entry cannot diverge.

use changelog_core::{Changelog, ChangelogId};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangelogListStore {
    items: Vec<Changelog>,
    selected: Option<ChangelogId>,
}

impl ChangelogListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Changelog] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ChangelogId) -> Option<&Changelog> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ChangelogId) -> bool {
        self.position(id).is_some()
    }

    pub fn selected_id(&self) -> Option<ChangelogId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Changelog> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Returns false, leaving the selection alone, when `id` is not listed.
    pub fn select(&mut self, id: ChangelogId) -> bool {
        if self.contains(id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Takes the server's order as-is. Later duplicates of an id are dropped
    /// and a selection that is no longer listed is cleared.
    pub fn replace_all(&mut self, items: Vec<Changelog>) {
        let mut seen = HashSet::with_capacity(items.len());
        self.items = items.into_iter().filter(|c| seen.insert(c.id)).collect();

        if let Some(id) = self.selected {
            if !self.contains(id) {
                self.selected = None;
            }
        }
    }

    /// Prepends `changelog`, dropping any stale entry with the same id.
    pub fn insert(&mut self, changelog: Changelog) {
        if let Some(index) = self.position(changelog.id) {
            self.items.remove(index);
        }
        self.items.insert(0, changelog);
    }

    /// Insert-on-create: prepend and move the selection to the new entry.
    pub fn insert_created(&mut self, changelog: Changelog) {
        let id = changelog.id;
        self.insert(changelog);
        self.selected = Some(id);
    }

    /// Replace-by-id in place. An id that is not listed is ignored, so a
    /// late response never resurrects a deleted entry.
    pub fn replace(&mut self, changelog: Changelog) -> bool {
        match self.position(changelog.id) {
            Some(index) => {
                self.items[index] = changelog;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ChangelogId) -> Option<Changelog> {
        let index = self.position(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.items.remove(index))
    }

    fn position(&self, id: ChangelogId) -> Option<usize> {
        self.items.iter().position(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use changelog_core::ChangelogInput;
    use proptest::prelude::*;

    fn entry(title: &str) -> Changelog {
        Changelog::new(ChangelogInput::new("1.0", title), format!("# {}", title))
    }

    #[test]
    fn test_insert_created_prepends_and_selects() {
        let mut store = ChangelogListStore::new();
        let first = entry("first");
        let second = entry("second");

        store.replace_all(vec![first.clone()]);
        store.insert_created(second.clone());

        assert_eq!(store.items(), &[second.clone(), first]);
        assert_eq!(store.selected(), Some(&second));
    }

    #[test]
    fn test_replace_preserves_position_and_refreshes_selection() {
        let mut store = ChangelogListStore::new();
        let a = entry("a");
        let b = entry("b");
        let c = entry("c");
        store.replace_all(vec![a.clone(), b.clone(), c.clone()]);
        store.select(b.id);

        let mut edited = b.clone();
        edited.title = "b edited".to_string();
        edited.published = true;
        assert!(store.replace(edited.clone()));

        assert_eq!(store.items()[1], edited);
        assert_eq!(store.selected(), Some(&edited));
        assert_eq!(store.get(b.id), store.selected());
    }

    #[test]
    fn test_replace_unknown_id_is_ignored() {
        let mut store = ChangelogListStore::new();
        store.replace_all(vec![entry("a")]);
        let before = store.clone();

        assert!(!store.replace(entry("ghost")));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut store = ChangelogListStore::new();
        let a = entry("a");
        let b = entry("b");
        store.replace_all(vec![a.clone(), b.clone()]);
        store.select(a.id);

        assert_eq!(store.remove(b.id), Some(b));
        assert_eq!(store.selected_id(), Some(a.id));

        assert_eq!(store.remove(a.id), Some(a));
        assert_eq!(store.selected_id(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_select_unknown_id_keeps_selection() {
        let mut store = ChangelogListStore::new();
        let a = entry("a");
        store.replace_all(vec![a.clone()]);
        store.select(a.id);

        assert!(!store.select(entry("ghost").id));
        assert_eq!(store.selected_id(), Some(a.id));
    }

    #[test]
    fn test_replace_all_drops_duplicates_and_stale_selection() {
        let mut store = ChangelogListStore::new();
        let a = entry("a");
        let b = entry("b");
        store.replace_all(vec![a.clone()]);
        store.select(a.id);

        let mut b_again = b.clone();
        b_again.title = "dup".to_string();
        store.replace_all(vec![b.clone(), b_again]);

        assert_eq!(store.items(), &[b]);
        assert_eq!(store.selected_id(), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create,
        Update(usize),
        Delete(usize),
        Select(usize),
        Reload,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Create),
            any::<usize>().prop_map(Op::Update),
            any::<usize>().prop_map(Op::Delete),
            any::<usize>().prop_map(Op::Select),
            Just(Op::Reload),
        ]
    }

    proptest! {
        #[test]
        fn prop_ids_stay_unique_and_selection_listed(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut store = ChangelogListStore::new();
            // Stands in for the server of record.
            let mut server: Vec<Changelog> = Vec::new();

            for op in ops {
                match op {
                    Op::Create => {
                        let created = entry("new");
                        server.insert(0, created.clone());
                        store.insert_created(created);
                    }
                    Op::Update(i) if !server.is_empty() => {
                        let index = i % server.len();
                        server[index].title.push('!');
                        server[index].published = !server[index].published;
                        store.replace(server[index].clone());
                    }
                    Op::Delete(i) if !server.is_empty() => {
                        let removed = server.remove(i % server.len());
                        store.remove(removed.id);
                    }
                    Op::Select(i) if !server.is_empty() => {
                        store.select(server[i % server.len()].id);
                    }
                    Op::Reload => store.replace_all(server.clone()),
                    _ => {}
                }

                let ids: HashSet<_> = store.items().iter().map(|c| c.id).collect();
                prop_assert_eq!(ids.len(), store.len());
                if let Some(id) = store.selected_id() {
                    prop_assert!(store.contains(id));
                }
                prop_assert_eq!(store.items(), server.as_slice());
            }
        }
    }
}
