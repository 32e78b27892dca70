use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::CompositionTree;

/// Conversion of a tree structure into a printable `termtree::Tree`.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Renders each node as `{sign}{node} ({term})`, where `term` is the node's
/// own value minus its subtracted subtree.
///
/// Right continuations are flattened into one sibling list and only left
/// edges nest, so output depth stays bounded however long the numeral is.
/// Subtracted children carry `-`, added ones `+`.
impl TreeNodeConvert for CompositionTree {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        // Pre-order: a node's sign is known before its children are visited.
        let mut signs: HashMap<Index, char> = HashMap::new();
        let mut order = Vec::with_capacity(self.len() + 1);
        for (idx, node) in self.iter() {
            let sign = signs.get(&idx).copied().unwrap_or('+');
            if let Some(left) = node.left {
                signs.insert(left, '-');
            }
            if let Some(right) = node.right {
                signs.insert(right, sign);
            }
            order.push((idx, sign));
        }

        // Reversed pre-order sees every child before its parent.
        let mut subtotals: HashMap<Index, u64> = HashMap::new();
        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        for &(idx, sign) in order.iter().rev() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            let subtotal_of =
                |child: Option<Index>| child.and_then(|c| subtotals.get(&c).copied()).unwrap_or(0);

            let own = u64::from(node.own_value());
            let subtracted = subtotal_of(node.left);
            debug_assert!(subtracted <= own, "{node} subtracts {subtracted}");
            let term = own - subtracted;
            let subtotal = term + subtotal_of(node.right);

            let (label, mut next) = if node.is_root() {
                (format!("= {subtotal}"), node.right)
            } else {
                (format!("{sign}{node} ({term})"), node.left)
            };
            let mut node_tree = Tree::new(label);
            while let Some(member) = next {
                if let Some(child_tree) = built.remove(&member) {
                    node_tree.push(child_tree);
                }
                next = self.get_node(member).and_then(|n| n.right);
            }

            subtotals.insert(idx, subtotal);
            built.insert(idx, node_tree);
        }

        built
            .remove(&self.root())
            .unwrap_or_else(|| Tree::new("= 0".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::parse_tree;
    use crate::domain::ParseOptions;

    #[test]
    fn given_subtractive_numeral_when_rendering_then_marks_left_and_right() {
        let tree = parse_tree("XIV", ParseOptions::default()).unwrap();
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "= 14");
        assert!(lines[1].ends_with("+X (10)"));
        assert!(lines[2].ends_with("+V (4)"));
        assert!(lines[3].ends_with("-I (1)"));
    }

    #[test]
    fn given_repeated_numeral_when_rendering_then_shows_multiplier_term() {
        let tree = parse_tree("CCCXC", ParseOptions::default()).unwrap();
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "= 390");
        assert!(lines[1].ends_with("+C×3 (300)"));
        assert!(lines[2].ends_with("+C (90)"));
        assert!(lines[3].ends_with("-X (10)"));
    }

    #[test]
    fn given_empty_tree_when_rendering_then_shows_only_total() {
        let tree = CompositionTree::new();
        assert_eq!(tree.to_tree_string().to_string().trim_end(), "= 0");
    }
}
