// ── Generic reactive entity collection ──
//
// Lock-free concurrent storage with O(1) id lookups and push-based
// change notification via `watch` channels.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// A reactive collection for a single entity type, keyed by entity id.
///
/// Every mutation rebuilds the snapshot that subscribers receive. Snapshots
/// are id-ordered so consumers render stable lists without sorting.
pub(crate) struct Collection<T: Clone + Send + Sync + 'static> {
    by_id: DashMap<String, Arc<T>>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> Collection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            by_id: DashMap::new(),
            snapshot,
        }
    }

    /// Replace the entire contents in one snapshot rebuild.
    pub(crate) fn replace_all(&self, entries: Vec<(String, T)>) {
        self.by_id.clear();
        for (id, entity) in entries {
            self.by_id.insert(id, Arc::new(entity));
        }
        self.rebuild_snapshot();
    }

    /// Look up an entity by id.
    pub(crate) fn get(&self, id: &str) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Mutate one entity in place. Returns `false` if the id is unknown.
    pub(crate) fn update(&self, id: &str, mutate: impl FnOnce(&mut T)) -> bool {
        let Some(mut entry) = self.by_id.get_mut(id) else {
            return false;
        };
        let mut value = (**entry.value()).clone();
        mutate(&mut value);
        *entry.value_mut() = Arc::new(value);
        drop(entry);

        self.rebuild_snapshot();
        true
    }

    /// Mutate every entity with one snapshot rebuild at the end.
    pub(crate) fn update_all(&self, mutate: impl Fn(&mut T)) {
        for mut entry in self.by_id.iter_mut() {
            let mut value = (**entry.value()).clone();
            mutate(&mut value);
            *entry.value_mut() = Arc::new(value);
        }
        self.rebuild_snapshot();
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Collect all values id-ordered and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let mut entries: Vec<(String, Arc<T>)> = self
            .by_id
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let values: Vec<Arc<T>> = entries.into_iter().map(|(_, v)| v).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn replace_all_populates_and_orders_by_id() {
        let col: Collection<String> = Collection::new();
        col.replace_all(vec![
            ("b".into(), "second".into()),
            ("a".into(), "first".into()),
        ]);

        let snap = col.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(*snap[0], "first");
        assert_eq!(*snap[1], "second");
    }

    #[test]
    fn replace_all_drops_previous_contents() {
        let col: Collection<String> = Collection::new();
        col.replace_all(vec![("a".into(), "x".into())]);
        col.replace_all(vec![("b".into(), "y".into())]);

        assert!(col.get("a").is_none());
        assert_eq!(*col.get("b").unwrap(), "y");
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn update_mutates_one_entity() {
        let col: Collection<String> = Collection::new();
        col.replace_all(vec![("a".into(), "x".into()), ("b".into(), "y".into())]);

        assert!(col.update("a", |v| v.push('!')));
        assert_eq!(*col.get("a").unwrap(), "x!");
        assert_eq!(*col.get("b").unwrap(), "y");
    }

    #[test]
    fn update_of_unknown_id_is_false() {
        let col: Collection<String> = Collection::new();
        assert!(!col.update("missing", |_| {}));
    }

    #[test]
    fn update_all_touches_every_entity() {
        let col: Collection<String> = Collection::new();
        col.replace_all(vec![("a".into(), "x".into()), ("b".into(), "y".into())]);

        col.update_all(|v| v.push('.'));
        let snap = col.snapshot();
        assert_eq!(*snap[0], "x.");
        assert_eq!(*snap[1], "y.");
    }

    #[test]
    fn subscribers_observe_mutations() {
        let col: Collection<String> = Collection::new();
        let mut rx = col.subscribe();
        assert!(rx.borrow().is_empty());

        col.replace_all(vec![("a".into(), "x".into())]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        col.update("a", |v| v.push('!'));
        assert!(rx.has_changed().unwrap());
    }
}
