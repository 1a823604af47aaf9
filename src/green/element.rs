use crate::{GreenNode, GreenToken, NodeOrToken, SyntaxKind, TextSize};

/// An owned child of a green node, either a node or a token.
pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;
/// A borrowed child of a green node.
pub type GreenElementRef<'a> = NodeOrToken<&'a GreenNode, &'a GreenToken>;

impl From<GreenNode> for GreenElement {
    #[inline]
    fn from(node: GreenNode) -> GreenElement {
        NodeOrToken::Node(node)
    }
}

impl<'a> From<&'a GreenNode> for GreenElementRef<'a> {
    #[inline]
    fn from(node: &'a GreenNode) -> GreenElementRef<'a> {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    #[inline]
    fn from(token: GreenToken) -> GreenElement {
        NodeOrToken::Token(token)
    }
}

impl<'a> From<&'a GreenToken> for GreenElementRef<'a> {
    #[inline]
    fn from(token: &'a GreenToken) -> GreenElementRef<'a> {
        NodeOrToken::Token(token)
    }
}

impl GreenElementRef<'_> {
    #[inline]
    pub(crate) fn to_owned(self) -> GreenElement {
        match self {
            NodeOrToken::Node(node) => NodeOrToken::Node(node.clone()),
            NodeOrToken::Token(token) => NodeOrToken::Token(token.clone()),
        }
    }

    /// Address of the shared allocation, the identity interning keys on.
    #[inline]
    pub(crate) fn key_ptr(self) -> *const () {
        match self {
            NodeOrToken::Node(node) => node.data_ptr(),
            NodeOrToken::Token(token) => token.data_ptr(),
        }
    }

    /// Whether two elements point at the same underlying data.
    #[inline]
    pub(crate) fn ptr_eq(self, other: GreenElementRef<'_>) -> bool {
        self.key_ptr() == other.key_ptr()
    }
}

macro_rules! green_element_methods {
    () => {
        /// Returns kind of this element.
        #[inline]
        pub fn kind(&self) -> SyntaxKind {
            match self {
                NodeOrToken::Node(it) => it.kind(),
                NodeOrToken::Token(it) => it.kind(),
            }
        }

        /// Returns length of the text covered by this element.
        #[inline]
        pub fn text_len(&self) -> TextSize {
            match self {
                NodeOrToken::Node(it) => it.text_len(),
                NodeOrToken::Token(it) => it.text_len(),
            }
        }
    };
}

impl GreenElement {
    green_element_methods!();
}

impl GreenElementRef<'_> {
    green_element_methods!();
}
