use std::{fmt, hash::Hash, sync::Arc};

use countme::Count;
use smol_str::SmolStr;

use crate::{SyntaxKind, TextSize};

#[derive(Debug)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: SmolStr,
    _c: Count<GreenToken>,
}

/// Leaf node in the immutable tree.
#[derive(Clone)]
pub struct GreenToken {
    data: Arc<GreenTokenData>,
}

impl GreenToken {
    /// Creates new Token.
    #[inline]
    pub fn new(kind: SyntaxKind, text: &str) -> GreenToken {
        let data = GreenTokenData { kind, text: SmolStr::new(text), _c: Count::new() };
        GreenToken { data: Arc::new(data) }
    }

    /// Kind of this Token.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    /// Text of this Token.
    #[inline]
    pub fn text(&self) -> &str {
        self.data.text.as_str()
    }

    /// Text length of this Token.
    #[inline]
    pub fn text_len(&self) -> TextSize {
        TextSize::of(self.text())
    }

    /// Whether two handles point at the same underlying data.
    #[inline]
    pub(crate) fn ptr_eq(first: &GreenToken, second: &GreenToken) -> bool {
        Arc::ptr_eq(&first.data, &second.data)
    }

    #[inline]
    pub(crate) fn data_ptr(&self) -> *const () {
        Arc::as_ptr(&self.data).cast()
    }
}

impl PartialEq for GreenToken {
    fn eq(&self, other: &GreenToken) -> bool {
        GreenToken::ptr_eq(self, other)
            || (self.kind() == other.kind() && self.text() == other.text())
    }
}

impl Eq for GreenToken {}

impl Hash for GreenToken {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.text().hash(state);
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenToken")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .finish()
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
