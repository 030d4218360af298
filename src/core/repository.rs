use std::cell::RefCell;

/// Anything a [`Repository`] can key by id
pub trait Entity: Clone {
    fn id(&self) -> &str;
}

/// In-memory store holding the canonical copy of every entity of one type.
///
/// Entities are kept in insertion order. Ids are not deduplicated: lookups
/// and updates act on the first match, `remove` drops every match.
///
/// Methods take `&self` and release their borrow before returning, so a
/// handler can read, modify and write back while a nested publish is in
/// flight. Not `Sync`; one repository belongs to one thread.
#[derive(Debug)]
pub struct Repository<T: Entity> {
    entities: RefCell<Vec<T>>,
}

impl<T: Entity> Repository<T> {
    pub fn new() -> Self {
        Self {
            entities: RefCell::new(Vec::new()),
        }
    }

    /// Append an entity
    pub fn add(&self, entity: T) {
        self.entities.borrow_mut().push(entity);
    }

    /// Copy of the first entity with the given id
    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.entities
            .borrow()
            .iter()
            .find(|entity| entity.id() == id)
            .cloned()
    }

    /// Replace the first entity sharing `entity`'s id.
    ///
    /// Returns whether a replacement happened; an unknown id is a silent no-op.
    pub fn update(&self, entity: T) -> bool {
        let mut entities = self.entities.borrow_mut();
        match entities.iter_mut().find(|existing| existing.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Remove every entity with the given id, returning how many were dropped
    pub fn remove(&self, id: &str) -> usize {
        let mut entities = self.entities.borrow_mut();
        let before = entities.len();
        entities.retain(|entity| entity.id() != id);
        before - entities.len()
    }

    /// Snapshot of all entities in insertion order
    pub fn get_all(&self) -> Vec<T> {
        self.entities.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entities.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.borrow().is_empty()
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> FromIterator<T> for Repository<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entities: RefCell::new(iter.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: i32,
    }

    impl Item {
        fn new(id: &str, value: i32) -> Self {
            Self { id: id.to_string(), value }
        }
    }

    impl Entity for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_get_by_id_found_and_absent() {
        let repo = Repository::new();
        repo.add(Item::new("a", 1));

        assert_eq!(repo.get_by_id("a"), Some(Item::new("a", 1)));
        assert_eq!(repo.get_by_id("missing"), None);
    }

    #[test]
    fn test_duplicates_resolve_to_first_match() {
        let repo = Repository::new();
        repo.add(Item::new("a", 1));
        repo.add(Item::new("a", 2));

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get_by_id("a").map(|i| i.value), Some(1));

        assert!(repo.update(Item::new("a", 10)));
        let values: Vec<i32> = repo.get_all().iter().map(|i| i.value).collect();
        assert_eq!(values, vec![10, 2]);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let repo = Repository::new();
        repo.add(Item::new("a", 1));

        assert!(!repo.update(Item::new("b", 5)));
        assert_eq!(repo.get_all(), vec![Item::new("a", 1)]);
    }

    #[test]
    fn test_remove_drops_all_matches() {
        let repo: Repository<Item> = vec![Item::new("a", 1), Item::new("b", 2), Item::new("a", 3)]
            .into_iter()
            .collect();

        assert_eq!(repo.remove("a"), 2);
        assert_eq!(repo.get_all(), vec![Item::new("b", 2)]);
        assert_eq!(repo.remove("a"), 0);
    }

    #[test]
    fn test_get_all_is_a_snapshot() {
        let repo = Repository::new();
        repo.add(Item::new("a", 1));
        let snapshot = repo.get_all();
        repo.update(Item::new("a", 99));

        assert_eq!(snapshot[0].value, 1);
        assert!(!repo.is_empty());
    }
}
