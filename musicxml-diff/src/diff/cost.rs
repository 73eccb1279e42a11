//! Memoized edit costs over a fixed pair of trees.
//!
//! Two quantities drive the planner: the cost of a whole subtree (what
//! deleting or inserting it costs) and the estimated cost of transforming
//! one subtree into another. Children are aligned in document order with
//! the classic edit-distance DP; elements with different tags never match.

use rustc_hash::FxHashMap;

use crate::unode::UNode;

/// Sentinel cost for node pairs that must never match (different tags).
///
/// Sums use saturating addition so the sentinel survives accumulation.
pub const NO_MATCH: u64 = u64::MAX;

/// Which input tree a node id belongs to.
///
/// Both parses run their own id counter from zero, so memo keys carry the
/// side to keep the two id spaces disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

/// Memoized cost calculator, scoped to one diff computation.
pub struct CostModel {
    subtree: FxHashMap<(Side, usize), u64>,
    pairs: FxHashMap<(usize, usize), u64>,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CostModel {
    /// Creates an empty cost model.
    pub fn new() -> Self {
        CostModel {
            subtree: FxHashMap::default(),
            pairs: FxHashMap::default(),
        }
    }

    /// Cost of inserting or deleting the whole subtree rooted at `n`:
    /// one unit for the element, one per attribute, one for nonempty direct
    /// text, plus the children recursively.
    pub fn subtree_cost(&mut self, side: Side, n: &UNode) -> u64 {
        if let Some(&cost) = self.subtree.get(&(side, n.id)) {
            return cost;
        }
        let mut cost = 1 + n.attrs.len() as u64 + u64::from(!n.text.is_empty());
        for child in &n.children {
            cost += self.subtree_cost(side, child);
        }
        self.subtree.insert((side, n.id), cost);
        cost
    }

    /// Estimated edit distance to transform subtree `a` into subtree `b`.
    ///
    /// Returns [`NO_MATCH`] when the tags differ. Otherwise counts attribute
    /// differences, a unit for differing text, and the optimal ordered
    /// children alignment.
    pub fn pair_cost(&mut self, a: &UNode, b: &UNode) -> u64 {
        if a.name != b.name {
            return NO_MATCH;
        }
        if let Some(&cost) = self.pairs.get(&(a.id, b.id)) {
            return cost;
        }

        let mut cost = 0u64;
        for (key, old_value) in &a.attrs {
            match b.attrs.get(key) {
                Some(new_value) if new_value == old_value => {}
                _ => cost += 1,
            }
        }
        for key in b.attrs.keys() {
            if !a.attrs.contains_key(key) {
                cost += 1;
            }
        }

        if a.text != b.text && (!a.text.is_empty() || !b.text.is_empty()) {
            cost += 1;
        }

        let matrix = self.child_matrix(&a.children, &b.children);
        cost = cost.saturating_add(matrix[0][0]);

        self.pairs.insert((a.id, b.id), cost);
        cost
    }

    /// Full edit-distance DP matrix over two child lists, suffix form.
    ///
    /// `matrix[i][j]` is the minimal cost of transforming `old[i..]` into
    /// `new[j..]`, where deletion and insertion cost the subtree and a match
    /// recurses via [`pair_cost`]. The suffix orientation lets the planner
    /// reconstruct the operation sequence front to back, so equal-cost plans
    /// resolve to the leftmost match rather than the rightmost.
    pub fn child_matrix(&mut self, old: &[UNode], new: &[UNode]) -> Vec<Vec<u64>> {
        let m = old.len();
        let n = new.len();
        let mut matrix = vec![vec![0u64; n + 1]; m + 1];

        for i in (0..m).rev() {
            matrix[i][n] = matrix[i + 1][n].saturating_add(self.subtree_cost(Side::Old, &old[i]));
        }
        for j in (0..n).rev() {
            matrix[m][j] = matrix[m][j + 1].saturating_add(self.subtree_cost(Side::New, &new[j]));
        }

        for i in (0..m).rev() {
            for j in (0..n).rev() {
                let delete = matrix[i + 1][j].saturating_add(self.subtree_cost(Side::Old, &old[i]));
                let insert = matrix[i][j + 1].saturating_add(self.subtree_cost(Side::New, &new[j]));
                let matched = matrix[i + 1][j + 1].saturating_add(self.pair_cost(&old[i], &new[j]));
                matrix[i][j] = matched.min(delete).min(insert);
            }
        }

        matrix
    }
}
