use std::{fmt, hash::Hash, iter, rc::Rc};

use countme::Count;

use crate::{
    green::GreenElementRef, GreenNode, NodeOrToken, SyntaxElement, SyntaxKind, SyntaxToken,
    TextRange, TextSize,
};

#[derive(Debug)]
struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    offset: TextSize,
    _c: Count<SyntaxNode>,
}

/// A node in the syntax tree: a green node plus the absolute offset where
/// it starts and a link to its parent.
///
/// Syntax nodes are cheap, transient views into green data. Navigating to
/// the same tree position twice builds two wrappers which compare equal
/// without sharing an allocation, and a wrapper is freed as soon as
/// nothing points at it. They are single-threaded by design; the green
/// tree underneath is the part that can be sent across threads.
#[derive(Clone)]
pub struct SyntaxNode {
    data: Rc<NodeData>,
}

impl SyntaxNode {
    /// Turns a green tree into a syntax tree, placing the root at
    /// offset zero.
    pub fn new_root(green: GreenNode) -> SyntaxNode {
        SyntaxNode::new(green, None, TextSize::new(0))
    }

    fn new(green: GreenNode, parent: Option<SyntaxNode>, offset: TextSize) -> SyntaxNode {
        SyntaxNode { data: Rc::new(NodeData { green, parent, offset, _c: Count::new() }) }
    }

    /// Kind of this node.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.green.kind()
    }

    /// The green node this node is a view over.
    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.data.green
    }

    /// Length of the text covered by this node.
    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.data.green.text_len()
    }

    /// Absolute range of this node in the source text.
    #[inline]
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.data.offset, self.text_len())
    }

    /// The parent node, absent for the root.
    #[inline]
    pub fn parent(&self) -> Option<SyntaxNode> {
        self.data.parent.clone()
    }

    /// This node and its ancestors, the node itself first.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        iter::successors(Some(self.clone()), SyntaxNode::parent)
    }

    /// Children of this node, nodes and tokens alike, in source order.
    ///
    /// Every call materializes fresh wrappers over the shared green
    /// children; each child's offset is this node's offset plus the
    /// lengths of the children before it.
    #[inline]
    pub fn children(&self) -> SyntaxChildren {
        SyntaxChildren { parent: self.clone(), index: 0, offset: self.data.offset }
    }

    /// [`children`](SyntaxNode::children), restricted to nodes.
    #[inline]
    pub fn child_nodes(&self) -> SyntaxNodeChildren {
        SyntaxNodeChildren { inner: self.children() }
    }

    /// [`children`](SyntaxNode::children), restricted to tokens.
    #[inline]
    pub fn child_tokens(&self) -> SyntaxTokenChildren {
        SyntaxTokenChildren { inner: self.children() }
    }

    /// The first child, if any.
    pub fn first_child(&self) -> Option<SyntaxElement> {
        self.children().next()
    }

    /// The `index`-th child. An out of range index is `None`, not an
    /// error: probing the tree's shape is how traversals are written.
    pub fn child_at(&self, index: usize) -> Option<SyntaxElement> {
        let mut offset = self.data.offset;
        for (i, child) in self.data.green.children().enumerate() {
            if i == index {
                return Some(self.element(child, offset));
            }
            offset += child.text_len();
        }
        None
    }

    fn element(&self, green: GreenElementRef<'_>, offset: TextSize) -> SyntaxElement {
        match green {
            NodeOrToken::Node(node) => {
                SyntaxNode::new(node.clone(), Some(self.clone()), offset).into()
            }
            NodeOrToken::Token(token) => {
                SyntaxToken::new(token.clone(), self.clone(), offset).into()
            }
        }
    }
}

/// Two nodes are equal when they are views over the same green data at
/// the same offset, regardless of which navigation produced them.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &SyntaxNode) -> bool {
        GreenNode::ptr_eq(&self.data.green, &other.data.green)
            && self.data.offset == other.data.offset
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.data.green.data_ptr().hash(state);
        self.data.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data.green, f)
    }
}

/// Children of a syntax node, as [`SyntaxElement`]s.
#[derive(Debug, Clone)]
pub struct SyntaxChildren {
    parent: SyntaxNode,
    index: usize,
    offset: TextSize,
}

impl Iterator for SyntaxChildren {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<SyntaxElement> {
        let green = self.parent.data.green.children().nth(self.index)?;
        let element = self.parent.element(green, self.offset);
        self.index += 1;
        self.offset += green.text_len();
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for SyntaxChildren {
    fn len(&self) -> usize {
        self.parent.data.green.children().len() - self.index
    }
}

impl iter::FusedIterator for SyntaxChildren {}

/// Children of a syntax node, nodes only.
#[derive(Debug, Clone)]
pub struct SyntaxNodeChildren {
    inner: SyntaxChildren,
}

impl Iterator for SyntaxNodeChildren {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        self.inner.by_ref().find_map(NodeOrToken::into_node)
    }
}

impl iter::FusedIterator for SyntaxNodeChildren {}

/// Children of a syntax node, tokens only.
#[derive(Debug, Clone)]
pub struct SyntaxTokenChildren {
    inner: SyntaxChildren,
}

impl Iterator for SyntaxTokenChildren {
    type Item = SyntaxToken;

    fn next(&mut self) -> Option<SyntaxToken> {
        self.inner.by_ref().find_map(NodeOrToken::into_token)
    }
}

impl iter::FusedIterator for SyntaxTokenChildren {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GreenNodeBuilder, GreenToken};

    const ROOT: SyntaxKind = SyntaxKind(0);
    const IDENT: SyntaxKind = SyntaxKind(1);
    const PLUS: SyntaxKind = SyntaxKind(2);
    const BINARY_EXPR: SyntaxKind = SyntaxKind(3);

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into()).unwrap()
    }

    // ROOT["a", "+", "b"]
    fn parse_a_plus_b() -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(ROOT);
        builder.token(IDENT, "a").unwrap();
        builder.token(PLUS, "+").unwrap();
        builder.token(IDENT, "b").unwrap();
        builder.finish_node().unwrap();
        SyntaxNode::new_root(builder.finish().unwrap())
    }

    // ROOT[BINARY_EXPR["ab", "+"], "c"]
    fn parse_nested() -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(ROOT);
        builder.start_node(BINARY_EXPR);
        builder.token(IDENT, "ab").unwrap();
        builder.token(PLUS, "+").unwrap();
        builder.finish_node().unwrap();
        builder.token(IDENT, "c").unwrap();
        builder.finish_node().unwrap();
        SyntaxNode::new_root(builder.finish().unwrap())
    }

    #[test]
    fn root_and_flat_children() {
        let root = parse_a_plus_b();
        assert_eq!(root.kind(), ROOT);
        assert_eq!(root.text_range(), range(0, 3));
        assert!(root.parent().is_none());
        assert_eq!(root.to_string(), "a+b");

        let children: Vec<SyntaxElement> = root.children().collect();
        assert_eq!(children.len(), 3);
        let expected = [(IDENT, "a", 0, 1), (PLUS, "+", 1, 2), (IDENT, "b", 2, 3)];
        for (element, (kind, text, start, end)) in children.iter().zip(expected) {
            let token = element.as_token().unwrap();
            assert_eq!(token.kind(), kind);
            assert_eq!(token.text(), text);
            assert_eq!(token.text_range(), range(start, end));
            assert_eq!(token.parent(), root);
        }
    }

    #[test]
    fn offsets_accumulate_through_nesting() {
        let root = parse_nested();
        assert_eq!(root.text_range(), range(0, 4));

        let expr = root.first_child().and_then(NodeOrToken::into_node).unwrap();
        assert_eq!(expr.kind(), BINARY_EXPR);
        assert_eq!(expr.text_range(), range(0, 3));
        assert_eq!(expr.parent(), Some(root.clone()));

        let plus = expr.child_at(1).and_then(NodeOrToken::into_token).unwrap();
        assert_eq!(plus.text_range(), range(2, 3));

        let c = root.child_at(1).and_then(NodeOrToken::into_token).unwrap();
        assert_eq!(c.text_range(), range(3, 4));
        // a child starts where the lengths of its preceding siblings end
        assert_eq!(c.text_range().start(), root.text_range().start() + expr.text_len());
    }

    #[test]
    fn source_text_round_trips() {
        let root = parse_nested();
        assert_eq!(root.to_string(), "ab+c");

        fn collect(node: &SyntaxNode, out: &mut String) {
            for child in node.children() {
                match child {
                    NodeOrToken::Node(node) => collect(&node, out),
                    NodeOrToken::Token(token) => out.push_str(token.text()),
                }
            }
        }
        let mut text = String::new();
        collect(&root, &mut text);
        assert_eq!(text, "ab+c");
    }

    #[test]
    fn equal_positions_compare_equal_across_navigations() {
        let root = parse_nested();
        let first = root.first_child().and_then(NodeOrToken::into_node).unwrap();
        let second = root.first_child().and_then(NodeOrToken::into_node).unwrap();
        assert_eq!(first, second);
        // same position, distinct wrapper allocations
        assert!(!Rc::ptr_eq(&first.data, &second.data));

        use std::collections::HashSet;
        let positions: HashSet<SyntaxNode> = [first, second].into_iter().collect();
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn same_green_at_different_offsets_is_a_different_position() {
        // both "a" tokens share one interned green token
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(ROOT);
        builder.token(IDENT, "a").unwrap();
        builder.token(IDENT, "a").unwrap();
        builder.finish_node().unwrap();
        let root = SyntaxNode::new_root(builder.finish().unwrap());

        let first = root.child_at(0).and_then(NodeOrToken::into_token).unwrap();
        let second = root.child_at(1).and_then(NodeOrToken::into_token).unwrap();
        assert!(GreenToken::ptr_eq(first.green(), second.green()));
        assert_ne!(first, second);
        assert_eq!(first.text_range(), range(0, 1));
        assert_eq!(second.text_range(), range(1, 2));
    }

    #[test]
    fn child_at_matches_children() {
        let root = parse_nested();
        for (i, child) in root.children().enumerate() {
            assert_eq!(root.child_at(i), Some(child));
        }
        assert_eq!(root.child_at(root.children().len()), None);
        assert_eq!(root.child_at(999), None);
    }

    #[test]
    fn filtered_children() {
        let root = parse_nested();
        let nodes: Vec<SyntaxNode> = root.child_nodes().collect();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), BINARY_EXPR);

        let tokens: Vec<SyntaxToken> = root.child_tokens().collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(), "c");
    }

    #[test]
    fn empty_node_has_no_children() {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(ROOT);
        builder.finish_node().unwrap();
        let root = SyntaxNode::new_root(builder.finish().unwrap());

        assert_eq!(root.children().len(), 0);
        assert!(root.first_child().is_none());
        assert!(root.child_at(0).is_none());
        assert_eq!(root.text_range(), range(0, 0));
    }

    #[test]
    fn ancestors_walk_to_the_root() {
        let root = parse_nested();
        let expr = root.first_child().and_then(NodeOrToken::into_node).unwrap();
        let token = expr.child_at(0).and_then(NodeOrToken::into_token).unwrap();

        let kinds: Vec<SyntaxKind> = expr.ancestors().map(|node| node.kind()).collect();
        assert_eq!(kinds, [BINARY_EXPR, ROOT]);

        let from_token: Vec<SyntaxKind> =
            token.parent().ancestors().map(|node| node.kind()).collect();
        assert_eq!(from_token, [BINARY_EXPR, ROOT]);
    }

    #[test]
    fn debug_shows_kind_and_range() {
        let root = parse_a_plus_b();
        assert_eq!(format!("{:?}", root), "SyntaxKind(0)@0..3");
        let plus = root.child_at(1).and_then(NodeOrToken::into_token).unwrap();
        assert_eq!(format!("{:?}", plus), "SyntaxKind(2)@1..2 \"+\"");
    }
}
