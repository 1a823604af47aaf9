use std::{fmt, hash::Hash, iter::FusedIterator, slice, sync::Arc};

use countme::Count;

use crate::{green::GreenElementRef, GreenElement, NodeOrToken, Result, SyntaxKind, TextSize};

#[derive(Debug)]
struct GreenNodeData {
    kind: SyntaxKind,
    text_len: TextSize,
    children: Box<[GreenElement]>,
    _c: Count<GreenNode>,
}

/// Internal node in the immutable tree.
/// It has other nodes and tokens as children.
#[derive(Clone)]
pub struct GreenNode {
    data: Arc<GreenNodeData>,
}

impl GreenNode {
    /// Creates new Node.
    ///
    /// The node's text length is the sum of its children's and is computed
    /// once, here. Errors with [`Error::Overflow`](crate::Error::Overflow)
    /// if the sum does not fit in `u32`.
    pub fn new<I>(kind: SyntaxKind, children: I) -> Result<GreenNode>
    where
        I: IntoIterator<Item = GreenElement>,
    {
        let children: Box<[GreenElement]> = children.into_iter().collect();
        let mut text_len = TextSize::new(0);
        for child in children.iter() {
            text_len = text_len.try_add(child.text_len())?;
        }
        let data = GreenNodeData { kind, text_len, children, _c: Count::new() };
        Ok(GreenNode { data: Arc::new(data) })
    }

    /// Kind of this node.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    /// Length of the text, covered by this node.
    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.data.text_len
    }

    /// Children of this node.
    #[inline]
    pub fn children(&self) -> Children<'_> {
        Children { inner: self.data.children.iter() }
    }

    /// Whether two handles point at the same underlying data.
    #[inline]
    pub(crate) fn ptr_eq(first: &GreenNode, second: &GreenNode) -> bool {
        Arc::ptr_eq(&first.data, &second.data)
    }

    #[inline]
    pub(crate) fn data_ptr(&self) -> *const () {
        Arc::as_ptr(&self.data).cast()
    }
}

/// Nodes compare children by identity, not by structure. Two nodes built
/// from the same cache are equal exactly when they describe the same tree,
/// while nodes assembled without interning may compare unequal despite
/// identical structure.
impl PartialEq for GreenNode {
    fn eq(&self, other: &GreenNode) -> bool {
        GreenNode::ptr_eq(self, other)
            || (self.kind() == other.kind()
                && self.text_len() == other.text_len()
                && self.data.children.len() == other.data.children.len()
                && self.children().zip(other.children()).all(|(a, b)| a.ptr_eq(b)))
    }
}

impl Eq for GreenNode {}

impl Hash for GreenNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.text_len().hash(state);
        for child in self.children() {
            child.key_ptr().hash(state);
        }
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("text_len", &self.text_len())
            .field("n_children", &self.data.children.len())
            .finish()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children() {
            fmt::Display::fmt(&child, f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Children<'a> {
    inner: slice::Iter<'a, GreenElement>,
}

// NB: forward everything stable that slice::Iter specializes
impl ExactSizeIterator for Children<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = GreenElementRef<'a>;

    #[inline]
    fn next(&mut self) -> Option<GreenElementRef<'a>> {
        self.inner.next().map(NodeOrToken::as_ref)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.inner.count()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(NodeOrToken::as_ref)
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }

    #[inline]
    fn fold<Acc, Fold>(mut self, init: Acc, mut f: Fold) -> Acc
    where
        Fold: FnMut(Acc, Self::Item) -> Acc,
    {
        let mut accum = init;
        while let Some(x) = self.next() {
            accum = f(accum, x);
        }
        accum
    }
}

impl<'a> DoubleEndedIterator for Children<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(NodeOrToken::as_ref)
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth_back(n).map(NodeOrToken::as_ref)
    }

    #[inline]
    fn rfold<Acc, Fold>(mut self, init: Acc, mut f: Fold) -> Acc
    where
        Fold: FnMut(Acc, Self::Item) -> Acc,
    {
        let mut accum = init;
        while let Some(x) = self.next_back() {
            accum = f(accum, x);
        }
        accum
    }
}

impl FusedIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreenToken;

    const NODE: SyntaxKind = SyntaxKind(0);
    const IDENT: SyntaxKind = SyntaxKind(1);

    fn leaf(text: &str) -> GreenElement {
        GreenToken::new(IDENT, text).into()
    }

    #[test]
    fn text_len_sums_children() {
        let node = GreenNode::new(NODE, vec![leaf("ab"), leaf("c")]).unwrap();
        assert_eq!(node.text_len(), TextSize::new(3));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.to_string(), "abc");
    }

    #[test]
    fn empty_node_has_zero_len() {
        let node = GreenNode::new(NODE, Vec::new()).unwrap();
        assert_eq!(node.text_len(), TextSize::new(0));
        assert_eq!(node.children().len(), 0);
        assert_eq!(node.to_string(), "");
    }

    #[test]
    fn nested_text_concatenates_in_order() {
        let inner = GreenNode::new(NODE, vec![leaf("1"), leaf("+")]).unwrap();
        let outer = GreenNode::new(NODE, vec![inner.into(), leaf("2")]).unwrap();
        assert_eq!(outer.text_len(), TextSize::new(3));
        assert_eq!(outer.to_string(), "1+2");
    }

    #[test]
    fn children_iterate_both_ways() {
        let node =
            GreenNode::new(NODE, vec![leaf("a"), leaf("b"), leaf("c")]).unwrap();
        let forward: Vec<_> =
            node.children().map(|child| child.to_owned()).collect();
        let mut backward: Vec<_> =
            node.children().rev().map(|child| child.to_owned()).collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(node.children().nth(1).map(|child| child.text_len()), Some(TextSize::new(1)));
        assert_eq!(node.children().nth(3), None);
    }

    #[test]
    fn equality_follows_child_identity() {
        let shared = leaf("x");
        let first = GreenNode::new(NODE, vec![shared.clone()]).unwrap();
        let second = GreenNode::new(NODE, vec![shared]).unwrap();
        // same child allocation, distinct node allocations
        assert!(!GreenNode::ptr_eq(&first, &second));
        assert_eq!(first, second);

        // structurally identical child, but a fresh allocation
        let third = GreenNode::new(NODE, vec![leaf("x")]).unwrap();
        assert_ne!(first, third);
    }
}
