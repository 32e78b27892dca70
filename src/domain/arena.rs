use std::cmp::Ordering;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{DomainResult, FormatError};
use crate::domain::numeral::{MaxRepetitions, Numeral};

/// One run of a single numeral within a Roman numeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionNode {
    /// Numeral held by this node, None for the root sentinel
    pub numeral: Option<Numeral>,
    /// Count of consecutive identical numerals folded into this node
    pub multiplier: u32,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Subtracted child
    pub left: Option<Index>,
    /// Added continuation
    pub right: Option<Index>,
}

impl CompositionNode {
    fn root() -> Self {
        Self {
            numeral: None,
            multiplier: 0,
            parent: None,
            left: None,
            right: None,
        }
    }

    fn new(numeral: Numeral, parent: Index) -> Self {
        Self {
            numeral: Some(numeral),
            multiplier: 1,
            parent: Some(parent),
            left: None,
            right: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.numeral.is_none()
    }

    /// Own contribution, ignoring children.
    pub fn own_value(&self) -> u32 {
        self.numeral
            .map(|n| self.multiplier * n.weight())
            .unwrap_or(0)
    }
}

impl fmt::Display for CompositionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.numeral {
            None => write!(f, "∅"),
            Some(n) if self.multiplier > 1 => write!(f, "{}×{}", n, self.multiplier),
            Some(n) => write!(f, "{}", n),
        }
    }
}

/// Arena-based binary tree encoding the additive/subtractive structure of a
/// Roman numeral.
///
/// Numerals are appended left to right. A left child is subtracted from its
/// parent's run, a right child is added after it. The caller keeps the index
/// returned by [`CompositionTree::append`] and appends the next numeral to it.
#[derive(Debug)]
pub struct CompositionTree {
    arena: Arena<CompositionNode>,
    root: Index,
}

impl Default for CompositionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(CompositionNode::root());
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&CompositionNode> {
        self.arena.get(idx)
    }

    /// Number of numeral nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, idx: Index) -> DomainResult<&CompositionNode> {
        self.arena.get(idx).ok_or(FormatError::DanglingNode)
    }

    fn node_mut(&mut self, idx: Index) -> DomainResult<&mut CompositionNode> {
        self.arena.get_mut(idx).ok_or(FormatError::DanglingNode)
    }

    fn numeral_of(&self, idx: Index) -> DomainResult<Option<Numeral>> {
        Ok(self.node(idx)?.numeral)
    }

    /// Inserts a new node and links it as the right child of `parent`.
    fn attach_right(&mut self, parent: Index, numeral: Numeral) -> DomainResult<Index> {
        self.node(parent)?;
        let idx = self.arena.insert(CompositionNode::new(numeral, parent));
        self.node_mut(parent)?.right = Some(idx);
        Ok(idx)
    }

    /// Appends `numeral` at the `current` position and returns the new current
    /// position.
    ///
    /// - root: the numeral becomes the root's right child
    /// - equal: the run's multiplier grows, the position stays
    /// - lower: the numeral starts a new right-hand continuation
    /// - higher: `current` is rotated under the new node as its subtracted
    ///   left child
    #[instrument(level = "trace", skip(self))]
    pub fn append(
        &mut self,
        current: Index,
        numeral: Numeral,
        max_repetitions: MaxRepetitions,
    ) -> DomainResult<Index> {
        let node = self.node(current)?;
        let Some(own) = node.numeral else {
            if node.right.is_some() {
                return Err(FormatError::RightChildOccupied);
            }
            return self.attach_right(current, numeral);
        };

        match numeral.cmp(&own) {
            Ordering::Equal => {
                if node.left.is_some() {
                    return Err(FormatError::RepeatAfterSubtraction(numeral));
                }
                if !numeral.is_repeatable() {
                    return Err(FormatError::NotRepeatable(numeral));
                }
                let limit = max_repetitions.limit();
                if node.multiplier >= limit {
                    return Err(FormatError::TooManyRepetitions { numeral, limit });
                }
                let node = self.node_mut(current)?;
                node.multiplier += 1;
                trace!(%numeral, multiplier = node.multiplier, "repeat");
                Ok(current)
            }
            Ordering::Less => {
                if node.right.is_some() {
                    return Err(FormatError::RightChildOccupied);
                }
                if let Some(left) = node.left {
                    if self.numeral_of(left)? == Some(numeral) {
                        return Err(FormatError::DuplicateSubtraction(numeral));
                    }
                }
                trace!(%numeral, "continue");
                self.attach_right(current, numeral)
            }
            Ordering::Greater => {
                if node.right.is_some() {
                    return Err(FormatError::RightChildOccupied);
                }
                if numeral.weight() / own.weight() > 10 {
                    return Err(FormatError::RatioExceeded {
                        subtrahend: own,
                        minuend: numeral,
                    });
                }
                if !own.is_subtractable() {
                    return Err(FormatError::NotSubtractable(own));
                }
                let idx = self.attach_right(current, numeral)?;
                self.rotate_left(current)?;
                trace!(%numeral, subtrahend = %own, "subtract");
                Ok(idx)
            }
        }
    }

    /// Turns the right child of `idx` into its parent, leaving `idx` as the
    /// subtracted left child.
    ///
    /// ```text
    ///  \                \
    ///  (X)              (Y)
    ///    \     -->      /
    ///    (Y)          (X)
    /// ```
    #[instrument(level = "trace", skip(self))]
    fn rotate_left(&mut self, idx: Index) -> DomainResult<()> {
        let node = self.node(idx)?;
        let parent = node.parent.ok_or(FormatError::MissingParent)?;
        let numeral = node.numeral.ok_or(FormatError::MissingParent)?;

        if node.multiplier > 1 {
            return Err(FormatError::MultipliedSubtraction(numeral));
        }
        if node.left.is_some() {
            return Err(FormatError::DoubleSubtraction(numeral));
        }
        let Some(right) = node.right else {
            return Ok(());
        };

        let right_numeral = self.numeral_of(right)?;
        if let Some(rotated) = right_numeral {
            if self.numeral_of(parent)? == Some(rotated) && !rotated.is_repeatable() {
                return Err(FormatError::ForbiddenRepetition(rotated));
            }
        }

        self.node_mut(parent)?.right = Some(right);
        let promoted = self.node_mut(right)?;
        promoted.parent = Some(parent);
        promoted.left = Some(idx);
        let demoted = self.node_mut(idx)?;
        demoted.parent = Some(right);
        demoted.right = None;
        Ok(())
    }

    /// Decimal value of the whole numeral.
    pub fn value(&self) -> u64 {
        self.evaluate(self.root)
    }

    /// `multiplier × weight - evaluate(left) + evaluate(right)` for the
    /// subtree at `idx`.
    ///
    /// Iterative: a node below an odd number of left edges is subtracted.
    pub fn evaluate(&self, idx: Index) -> u64 {
        let mut added: u64 = 0;
        let mut subtracted: u64 = 0;
        let mut stack = vec![(idx, false)];

        while let Some((current, negated)) = stack.pop() {
            let Some(node) = self.get_node(current) else {
                continue;
            };
            let own = u64::from(node.own_value());
            if negated {
                subtracted += own;
            } else {
                added += own;
            }
            if let Some(left) = node.left {
                stack.push((left, !negated));
            }
            if let Some(right) = node.right {
                stack.push((right, negated));
            }
        }

        debug_assert!(subtracted <= added, "subtree subtracts more than it adds");
        added - subtracted
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                max_depth = max_depth.max(depth);
                stack.extend([node.left, node.right].into_iter().flatten().map(|c| (c, depth + 1)));
            }
        }
        max_depth
    }
}

/// Pre-order traversal: node, left subtree, right subtree.
pub struct TreeIterator<'a> {
    tree: &'a CompositionTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a CompositionTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a CompositionNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if let Some(right) = node.right {
                    self.stack.push(right);
                }
                if let Some(left) = node.left {
                    self.stack.push(left);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
