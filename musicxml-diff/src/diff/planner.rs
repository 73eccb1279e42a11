//! Diff planning: turns a pair of normalized trees into a token stream.
//!
//! For each matched element pair the planner emits attribute and content
//! tokens, then aligns the two child lists with the cost model's DP matrix,
//! backtracks to recover the operation sequence, and emits element tokens
//! for deletions and insertions while recursing into matches.

use tracing::debug;

use super::cost::{CostModel, Side};
use super::token::XmlDiffToken;
use crate::unode::UNode;
use crate::xpath;

/// One child-list alignment operation, indices into the two child slices.
#[derive(Debug, Clone, Copy)]
enum ChildOp {
    Match(usize, usize),
    Delete(usize),
    Insert(usize),
}

/// Diff planner scoped to one computation.
///
/// Owns the memo tables; dropping the planner releases them, so repeated
/// calls never share state.
pub struct DiffPlanner {
    cost: CostModel,
    tokens: Vec<XmlDiffToken>,
}

impl DiffPlanner {
    /// Computes the token stream for a pair of root elements.
    ///
    /// Roots with different tags are reported as a coarse delete/insert
    /// pair without recursion.
    pub fn diff(old_root: &UNode, new_root: &UNode) -> Vec<XmlDiffToken> {
        let mut planner = DiffPlanner {
            cost: CostModel::new(),
            tokens: Vec::new(),
        };

        if old_root.name != new_root.name {
            planner.tokens.push(XmlDiffToken::element_delete(
                format!("/{}", old_root.name),
                old_root.name.clone(),
            ));
            planner.tokens.push(XmlDiffToken::element_insert(
                format!("/{}", new_root.name),
                new_root.name.clone(),
            ));
        } else {
            let path = format!("/{}", old_root.name);
            planner.diff_nodes(old_root, new_root, &path);
        }

        debug!(tokens = planner.tokens.len(), "diff planned");
        planner.tokens
    }

    fn diff_nodes(&mut self, a: &UNode, b: &UNode, path: &str) {
        self.diff_attributes(a, b, path);
        self.diff_content(a, b, path);
        self.diff_children(a, b, path);
    }

    /// Attribute tokens at `path`, emitted in name order for determinism.
    fn diff_attributes(&mut self, a: &UNode, b: &UNode, path: &str) {
        let mut keys: Vec<&String> = a.attrs.keys().chain(b.attrs.keys()).collect();
        keys.sort();
        keys.dedup();

        for key in keys {
            let locator = xpath::attribute_path(path, key);
            match (a.attrs.get(key), b.attrs.get(key)) {
                (None, Some(new_value)) => self.tokens.push(XmlDiffToken::attribute_insert(
                    locator,
                    key.clone(),
                    new_value.clone(),
                )),
                (Some(old_value), None) => self.tokens.push(XmlDiffToken::attribute_delete(
                    locator,
                    key.clone(),
                    old_value.clone(),
                )),
                (Some(old_value), Some(new_value)) if old_value != new_value => {
                    self.tokens.push(XmlDiffToken::attribute_change(
                        locator,
                        key.clone(),
                        old_value.clone(),
                        new_value.clone(),
                    ))
                }
                _ => {}
            }
        }
    }

    /// Content token at `path`, if the direct text differs.
    fn diff_content(&mut self, a: &UNode, b: &UNode, path: &str) {
        let locator = xpath::text_path(path);
        match (a.text.is_empty(), b.text.is_empty()) {
            (true, true) => {}
            (false, true) => self
                .tokens
                .push(XmlDiffToken::content_delete(locator, a.text.clone())),
            (true, false) => self
                .tokens
                .push(XmlDiffToken::content_insert(locator, b.text.clone())),
            (false, false) => {
                if a.text != b.text {
                    self.tokens.push(XmlDiffToken::content_change(
                        locator,
                        a.text.clone(),
                        b.text.clone(),
                    ));
                }
            }
        }
    }

    /// Aligns the child lists and emits element tokens, recursing into
    /// matched pairs.
    fn diff_children(&mut self, a: &UNode, b: &UNode, path: &str) {
        let ops = self.align_children(&a.children, &b.children);

        for op in ops {
            match op {
                ChildOp::Match(i, j) => {
                    let child_path = xpath::build_xpath(path, &a.children[i], &a.children);
                    self.diff_nodes(&a.children[i], &b.children[j], &child_path);
                }
                ChildOp::Delete(i) => {
                    let child = &a.children[i];
                    self.tokens.push(XmlDiffToken::element_delete(
                        xpath::build_xpath(path, child, &a.children),
                        child.name.clone(),
                    ));
                }
                ChildOp::Insert(j) => {
                    let child = &b.children[j];
                    self.tokens.push(XmlDiffToken::element_insert(
                        xpath::build_xpath(path, child, &b.children),
                        child.name.clone(),
                    ));
                }
            }
        }
    }

    /// Reconstructs a left-to-right operation sequence from the suffix DP
    /// matrix.
    ///
    /// Where the matrix admits several minima, match is preferred over
    /// delete over insert.
    fn align_children(&mut self, old: &[UNode], new: &[UNode]) -> Vec<ChildOp> {
        let matrix = self.cost.child_matrix(old, new);
        let m = old.len();
        let n = new.len();

        let mut ops = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < m || j < n {
            if i < m && j < n {
                let matched =
                    matrix[i + 1][j + 1].saturating_add(self.cost.pair_cost(&old[i], &new[j]));
                if matrix[i][j] == matched {
                    ops.push(ChildOp::Match(i, j));
                    i += 1;
                    j += 1;
                    continue;
                }
            }
            if i < m {
                let deleted =
                    matrix[i + 1][j].saturating_add(self.cost.subtree_cost(Side::Old, &old[i]));
                if matrix[i][j] == deleted {
                    ops.push(ChildOp::Delete(i));
                    i += 1;
                    continue;
                }
            }
            ops.push(ChildOp::Insert(j));
            j += 1;
        }

        ops
    }
}
