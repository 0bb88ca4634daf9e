use stable_arena::DroplessArena;

use super::ast::Node;

/// Owner of all nodes produced by one parse.
///
/// Dropping the arena releases the whole tree at once.
pub struct Arena {
    inner: DroplessArena,
}

impl Arena {
    pub fn new() -> Self {
        Arena {
            inner: DroplessArena::default(),
        }
    }

    pub fn push<'arena>(&'arena self, node: Node<'arena>) -> &'arena Node<'arena> {
        self.inner.alloc(node)
    }

    pub fn push_slice<'arena>(
        &'arena self,
        nodes: &[&'arena Node<'arena>],
    ) -> &'arena [&'arena Node<'arena>] {
        // `DroplessArena::alloc_slice()` panics on empty slices.
        if nodes.is_empty() {
            &[]
        } else {
            self.inner.alloc_slice(nodes)
        }
    }

    pub fn push_rows<'arena>(
        &'arena self,
        rows: &[&'arena [&'arena Node<'arena>]],
    ) -> &'arena [&'arena [&'arena Node<'arena>]] {
        if rows.is_empty() {
            &[]
        } else {
            self.inner.alloc_slice(rows)
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_test() {
        let arena = Arena::new();
        let node = Node::Number("42");
        let reference = arena.push(node);
        assert!(matches!(reference, Node::Number("42")));
    }

    #[test]
    fn empty_slices_are_not_allocated() {
        let arena = Arena::new();
        assert!(arena.push_slice(&[]).is_empty());
        assert!(arena.push_rows(&[]).is_empty());
    }

    #[test]
    fn rows_keep_their_order() {
        let arena = Arena::new();
        let a = arena.push(Node::Number("1"));
        let b = arena.push(Node::Number("2"));
        let first = arena.push_slice(&[a, b]);
        let second = arena.push_slice(&[b]);
        let rows = arena.push_rows(&[first, second]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert!(matches!(rows[0][1], Node::Number("2")));
        assert!(matches!(rows[1][0], Node::Number("2")));
    }
}
