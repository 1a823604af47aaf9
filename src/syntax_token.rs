use std::{fmt, hash::Hash};

use crate::{GreenToken, SyntaxKind, SyntaxNode, TextRange, TextSize};

/// A token (leaf node) in a syntax tree.
///
/// A token can't exist in isolation, it is always attached to a parent
/// node, and the parent link keeps the whole path to the root alive.
#[derive(Clone)]
pub struct SyntaxToken {
    green: GreenToken,
    parent: SyntaxNode,
    offset: TextSize,
}

/// Same position semantics as for nodes: equal iff the views share green
/// data and offset.
impl PartialEq for SyntaxToken {
    fn eq(&self, other: &SyntaxToken) -> bool {
        GreenToken::ptr_eq(&self.green, &other.green) && self.offset == other.offset
    }
}

impl Eq for SyntaxToken {}

impl Hash for SyntaxToken {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.green.data_ptr().hash(state);
        self.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl SyntaxToken {
    pub(crate) fn new(green: GreenToken, parent: SyntaxNode, offset: TextSize) -> SyntaxToken {
        SyntaxToken { green, parent, offset }
    }

    /// Kind of this token.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    /// Text of this token.
    #[inline]
    pub fn text(&self) -> &str {
        self.green.text()
    }

    /// The green token this token is a view over.
    #[inline]
    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    /// Length of the text covered by this token.
    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.green.text_len()
    }

    /// Absolute range of this token in the source text.
    #[inline]
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset, self.text_len())
    }

    /// Parent node, containing this token.
    #[inline]
    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }
}
