//! Parent-linked node storage for search trees.
//!
//! Nodes live in a flat `Vec` and refer to their parent by index, so a path
//! back to the root is a walk over indices. Clearing the arena bumps its
//! generation; ids handed out before the clear no longer resolve.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug)]
struct Slot<T> {
    parent: Option<NodeId>,
    value: T,
}

#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    generation: u32,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: 0,
        }
    }

    /// Adds a node under `parent` (or a root when `None`) and returns its id.
    pub fn insert(&mut self, parent: Option<NodeId>, value: T) -> NodeId {
        let id = NodeId {
            index: self.slots.len() as u32,
            generation: self.generation,
        };
        self.slots.push(Slot { parent, value });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slot(id).map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if id.generation != self.generation {
            return None;
        }
        self.slots.get_mut(id.index()).map(|slot| &mut slot.value)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).and_then(|slot| slot.parent)
    }

    /// Ids from the root down to and including `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.slot(id).map(|_| id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        path.reverse();
        path
    }

    /// Number of edges between `id` and its root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to(id).len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops every node and invalidates outstanding ids.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    fn slot(&self, id: NodeId) -> Option<&Slot<T>> {
        if id.generation != self.generation {
            return None;
        }
        self.slots.get(id.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_walks_parents() {
        let mut arena = Arena::new();
        let root = arena.insert(None, "root");
        let a = arena.insert(Some(root), "a");
        let b = arena.insert(Some(root), "b");
        let a1 = arena.insert(Some(a), "a1");

        let path: Vec<&str> = arena
            .path_to(a1)
            .into_iter()
            .filter_map(|id| arena.get(id).copied())
            .collect();
        assert_eq!(path, vec!["root", "a", "a1"]);
        assert_eq!(arena.depth(a1), 2);
        assert_eq!(arena.depth(root), 0);
        assert_eq!(arena.parent(b), Some(root));
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_stale_ids_do_not_resolve() {
        let mut arena = Arena::new();
        let old = arena.insert(None, 1);
        arena.clear();
        let new = arena.insert(None, 2);

        assert_eq!(old.index(), new.index());
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get_mut(old), None);
        assert!(arena.path_to(old).is_empty());
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut arena = Arena::new();
        let id = arena.insert(None, 0);
        if let Some(value) = arena.get_mut(id) {
            *value = 7;
        }
        assert_eq!(arena.get(id), Some(&7));
    }
}
