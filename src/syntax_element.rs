use crate::{NodeOrToken, SyntaxKind, SyntaxNode, SyntaxToken, TextRange, TextSize};

/// Either a [`SyntaxNode`] or a [`SyntaxToken`], the uniform child shape
/// navigation hands out.
pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

impl From<SyntaxNode> for SyntaxElement {
    #[inline]
    fn from(node: SyntaxNode) -> SyntaxElement {
        NodeOrToken::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    #[inline]
    fn from(token: SyntaxToken) -> SyntaxElement {
        NodeOrToken::Token(token)
    }
}

impl SyntaxElement {
    /// Kind of this element.
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(it) => it.kind(),
            NodeOrToken::Token(it) => it.kind(),
        }
    }

    /// Length of the text covered by this element.
    pub fn text_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(it) => it.text_len(),
            NodeOrToken::Token(it) => it.text_len(),
        }
    }

    /// Absolute range of this element in the source text.
    pub fn text_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(it) => it.text_range(),
            NodeOrToken::Token(it) => it.text_range(),
        }
    }

    /// Parent node, containing this element. Absent only for the root
    /// node, a token always has a parent.
    pub fn parent(&self) -> Option<SyntaxNode> {
        match self {
            NodeOrToken::Node(it) => it.parent(),
            NodeOrToken::Token(it) => Some(it.parent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreenNodeBuilder;

    const ROOT: SyntaxKind = SyntaxKind(0);
    const IDENT: SyntaxKind = SyntaxKind(1);
    const EXPR: SyntaxKind = SyntaxKind(2);

    #[test]
    fn element_accessors_forward_to_both_shapes() {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(ROOT);
        builder.start_node(EXPR);
        builder.token(IDENT, "ab").unwrap();
        builder.finish_node().unwrap();
        builder.token(IDENT, "c").unwrap();
        builder.finish_node().unwrap();
        let root = SyntaxNode::new_root(builder.finish().unwrap());

        let elements: Vec<SyntaxElement> = root.children().collect();
        assert_eq!(elements.len(), 2);

        assert!(elements[0].as_node().is_some());
        assert_eq!(elements[0].kind(), EXPR);
        assert_eq!(elements[0].text_len(), TextSize::new(2));
        assert_eq!(elements[0].parent(), Some(root.clone()));

        assert!(elements[1].as_token().is_some());
        assert_eq!(elements[1].kind(), IDENT);
        assert_eq!(
            elements[1].text_range(),
            TextRange::new(2.into(), 3.into()).unwrap()
        );
        assert_eq!(elements[1].parent(), Some(root.clone()));

        let root_element: SyntaxElement = root.into();
        assert!(root_element.parent().is_none());
    }
}
