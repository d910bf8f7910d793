// Copy-on-write entity collections.
//
// Every write builds a new backing slice and swaps it in. Readers that took a
// `snapshot()` keep seeing the slice they were handed; nothing is mutated in
// place once published.

use std::sync::Arc;

/// A record that can live in a [`Collection`].
pub trait Record: Clone {
    type Id: Copy + Eq + std::fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// An insertion-ordered, copy-on-write list of records.
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    items: Arc<[T]>,
    revision: u64,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            items: Arc::from(Vec::new()),
            revision: 0,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its id.
    pub fn insert(&mut self, record: T) -> T::Id {
        let id = record.id();
        let mut next = self.items.to_vec();
        next.push(record);
        self.publish(next);
        id
    }

    /// Insert a record at the front (newest-first collections).
    pub fn prepend(&mut self, record: T) -> T::Id {
        let id = record.id();
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(record);
        next.extend_from_slice(&self.items);
        self.publish(next);
        id
    }

    /// Replace the record with `id` by a modified copy.
    ///
    /// Returns `false` (and leaves the collection untouched) if no record has
    /// that id.
    pub fn update<F>(&mut self, id: T::Id, change: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let mut next = self.items.to_vec();
        change(&mut next[idx]);
        self.publish(next);
        true
    }

    /// Apply `change` to every record, publishing a single new snapshot.
    /// Returns how many records reported a change.
    pub fn update_all<F>(&mut self, mut change: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut next = self.items.to_vec();
        let mut changed = 0;
        for record in next.iter_mut() {
            if change(record) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.publish(next);
        }
        changed
    }

    /// Remove the record with `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: T::Id) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        let next: Vec<T> = self.items.iter().filter(|r| r.id() != id).cloned().collect();
        self.publish(next);
        true
    }

    /// Keep only records matching `keep`. Returns the number removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let next: Vec<T> = self.items.iter().filter(|r| keep(r)).cloned().collect();
        let removed = self.items.len() - next.len();
        if removed > 0 {
            self.publish(next);
        }
        removed
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.position(id).is_some()
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// An immutable view of the current contents. Later writes do not affect it.
    pub fn snapshot(&self) -> Arc<[T]> {
        Arc::clone(&self.items)
    }

    /// Number of successful writes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: T::Id) -> Option<usize> {
        self.items.iter().position(|r| r.id() == id)
    }

    fn publish(&mut self, next: Vec<T>) {
        self.items = Arc::from(next);
        self.revision += 1;
    }
}

impl<T: Record> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection {
            items: iter.into_iter().collect(),
            revision: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        label: &'static str,
    }

    impl Record for Item {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32, label: &'static str) -> Item {
        Item { id, label }
    }

    #[test]
    fn insert_keeps_insertion_order() {
        let mut c = Collection::new();
        c.insert(item(3, "c"));
        c.insert(item(1, "a"));
        c.insert(item(2, "b"));
        let ids: Vec<u32> = c.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(c.revision(), 3);
    }

    #[test]
    fn prepend_puts_newest_first() {
        let mut c = Collection::new();
        c.prepend(item(1, "old"));
        c.prepend(item(2, "new"));
        assert_eq!(c.list()[0].id, 2);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_writes() {
        let mut c = Collection::new();
        c.insert(item(1, "before"));
        let snap = c.snapshot();

        assert!(c.update(1, |i| i.label = "after"));
        c.insert(item(2, "x"));

        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].label, "before");
        assert_eq!(c.get(1).unwrap().label, "after");
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut c = Collection::new();
        c.insert(item(1, "a"));
        let rev = c.revision();
        assert!(!c.update(99, |i| i.label = "z"));
        assert_eq!(c.revision(), rev);
        assert_eq!(c.get(1).unwrap().label, "a");
    }

    #[test]
    fn remove_reports_presence() {
        let mut c = Collection::new();
        c.insert(item(1, "a"));
        assert!(c.remove(1));
        assert!(!c.remove(1));
        assert!(c.is_empty());
    }

    #[test]
    fn retain_counts_removed_records() {
        let mut c: Collection<Item> = (1..=5).map(|i| item(i, "n")).collect();
        let removed = c.retain(|i| i.id % 2 == 1);
        assert_eq!(removed, 2);
        assert_eq!(c.len(), 3);
        assert_eq!(c.retain(|_| true), 0);
    }

    #[test]
    fn update_all_publishes_only_on_change() {
        let mut c: Collection<Item> = (1..=3).map(|i| item(i, "n")).collect();
        assert_eq!(c.update_all(|_| false), 0);
        assert_eq!(c.revision(), 0);
        let changed = c.update_all(|i| {
            if i.id == 2 {
                i.label = "two";
                true
            } else {
                false
            }
        });
        assert_eq!(changed, 1);
        assert_eq!(c.get(2).unwrap().label, "two");
        assert_eq!(c.revision(), 1);
    }
}
