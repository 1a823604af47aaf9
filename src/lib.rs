//! A generic library for lossless syntax trees.
//!
//! The tree comes in two layers. Green trees are the data: immutable,
//! position independent, with identical subtrees shared between all their
//! occurrences. Syntax nodes are the view: transient wrappers that add
//! absolute offsets and parent links on top of the greens, materialized on
//! demand while navigating and dropped when no longer looked at. The
//! library stores kinds and text without ever interpreting them, so any
//! language can sit on top.
//!
//! Trees are built front to back with [`GreenNodeBuilder`]:
//!
//! ```
//! use aspen::{GreenNodeBuilder, NodeOrToken, SyntaxKind, SyntaxNode};
//!
//! const ROOT: SyntaxKind = SyntaxKind(0);
//! const NUMBER: SyntaxKind = SyntaxKind(1);
//! const PLUS: SyntaxKind = SyntaxKind(2);
//!
//! let mut builder = GreenNodeBuilder::new();
//! builder.start_node(ROOT);
//! builder.token(NUMBER, "1")?;
//! builder.token(PLUS, "+")?;
//! builder.token(NUMBER, "2")?;
//! builder.finish_node()?;
//! let green = builder.finish()?;
//!
//! let root = SyntaxNode::new_root(green);
//! assert_eq!(root.to_string(), "1+2");
//! assert_eq!(root.children().count(), 3);
//! let plus = root.child_at(1).and_then(NodeOrToken::into_token).unwrap();
//! assert_eq!(plus.text(), "+");
//! # Ok::<(), aspen::Error>(())
//! ```
#![forbid(unconditional_recursion, future_incompatible)]
#![deny(unsafe_code)]

mod error;
mod green;
mod syntax_element;
mod syntax_node;
mod syntax_token;
mod text;
mod utility_types;

pub use crate::{
    error::{Error, Result},
    green::{
        Checkpoint, Children, GreenElement, GreenElementRef, GreenNode, GreenNodeBuilder,
        GreenToken, NodeCache,
    },
    syntax_element::SyntaxElement,
    syntax_node::{SyntaxChildren, SyntaxNode, SyntaxNodeChildren, SyntaxTokenChildren},
    syntax_token::SyntaxToken,
    text::{TextRange, TextSize},
    utility_types::NodeOrToken,
};

/// SyntaxKind is a type tag for each token or node.
///
/// The library never interprets kinds, it only stores and compares them;
/// each language defines its own set and the meaning behind it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SyntaxKind(pub u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_send_sync() {
        fn f<T: Send + Sync>() {}
        f::<GreenNode>();
        f::<GreenToken>();
        f::<GreenElement>();
        f::<SyntaxKind>();
        f::<Error>();
    }

    #[test]
    fn test_size_of() {
        use std::mem::size_of;

        eprintln!("GreenNode     {}", size_of::<GreenNode>());
        eprintln!("GreenToken    {}", size_of::<GreenToken>());
        eprintln!("GreenElement  {}", size_of::<GreenElement>());
        eprintln!();
        eprintln!("SyntaxNode    {}", size_of::<SyntaxNode>());
        eprintln!("SyntaxToken   {}", size_of::<SyntaxToken>());
        eprintln!("SyntaxElement {}", size_of::<SyntaxElement>());
    }
}
