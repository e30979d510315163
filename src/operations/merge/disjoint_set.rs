/// Disjoint-set forest over `0..n` with path compression.
///
/// Unions are directed: the caller decides which root survives, so merged
/// strokes keep the identity of the one they were appended to.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    /// Returns the root of `i`, compressing the walked chain.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Attaches the set containing `child` under the root of `parent`.
    ///
    /// Returns `false` if both were already in the same set.
    pub fn union_into(&mut self, child: usize, parent: usize) -> bool {
        let child_root = self.find(child);
        let parent_root = self.find(parent);
        if child_root == parent_root {
            return false;
        }
        self.parent[child_root] = parent_root;
        true
    }

    /// Returns `true` if `i` is the representative of its set.
    pub fn is_root(&mut self, i: usize) -> bool {
        self.find(i) == i
    }
}
