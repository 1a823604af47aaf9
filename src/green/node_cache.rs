use std::hash::{BuildHasherDefault, Hash, Hasher};

use hashbrown::{hash_map::RawEntryMut, HashMap};
use rustc_hash::FxHasher;

use crate::{
    green::GreenElementRef, GreenElement, GreenNode, GreenToken, NodeOrToken, Result, SyntaxKind,
};

/// Interner for green tokens and nodes.
///
/// Green trees are fully immutable, so it's ok to deduplicate them.
/// This is the same optimization that Roslyn does
/// <https://github.com/KirillOsenkov/Bliki/wiki/Roslyn-Immutable-Trees>.
///
/// Tokens dedupe on `(kind, text)`. Nodes dedupe on kind plus the
/// *identities* of their children, which is exact rather than heuristic:
/// trees are interned bottom-up, so by the time a node is requested its
/// children are already canonical, and pointer comparison decides
/// structural equality without walking subtrees.
///
/// Equal requests against one cache return handles to one allocation for
/// the lifetime of the cache. Distinct caches never share.
#[derive(Default, Debug)]
pub struct NodeCache {
    nodes: HashMap<GreenNode, (), BuildHasherDefault<FxHasher>>,
    tokens: HashMap<GreenToken, (), BuildHasherDefault<FxHasher>>,
}

fn token_hash(kind: SyntaxKind, text: &str) -> u64 {
    let mut h = FxHasher::default();
    kind.hash(&mut h);
    text.hash(&mut h);
    h.finish()
}

fn node_hash<'a>(kind: SyntaxKind, children: impl Iterator<Item = GreenElementRef<'a>>) -> u64 {
    let mut h = FxHasher::default();
    kind.hash(&mut h);
    for child in children {
        child.key_ptr().hash(&mut h);
    }
    h.finish()
}

impl NodeCache {
    /// Creates an empty cache.
    pub fn new() -> NodeCache {
        NodeCache::default()
    }

    /// Returns the canonical token for `(kind, text)`, allocating it on
    /// first request.
    pub fn intern_token(&mut self, kind: SyntaxKind, text: &str) -> GreenToken {
        let hash = token_hash(kind, text);
        let entry = self
            .tokens
            .raw_entry_mut()
            .from_hash(hash, |token| token.kind() == kind && token.text() == text);
        match entry {
            RawEntryMut::Occupied(entry) => entry.key().clone(),
            RawEntryMut::Vacant(entry) => {
                let token = GreenToken::new(kind, text);
                entry.insert_with_hasher(hash, token.clone(), (), |token| {
                    token_hash(token.kind(), token.text())
                });
                token
            }
        }
    }

    /// Returns the canonical node for `kind` over exactly these children,
    /// allocating it on first request.
    ///
    /// Children are compared by identity, so for the dedup to take effect
    /// they have to come from this same cache.
    pub fn intern_node(
        &mut self,
        kind: SyntaxKind,
        children: Vec<GreenElement>,
    ) -> Result<GreenNode> {
        let hash = node_hash(kind, children.iter().map(NodeOrToken::as_ref));
        let entry = self.nodes.raw_entry_mut().from_hash(hash, |node| {
            node.kind() == kind
                && node.children().len() == children.len()
                && node
                    .children()
                    .zip(children.iter().map(NodeOrToken::as_ref))
                    .all(|(existing, pending)| existing.ptr_eq(pending))
        });
        match entry {
            RawEntryMut::Occupied(entry) => Ok(entry.key().clone()),
            RawEntryMut::Vacant(entry) => {
                let node = GreenNode::new(kind, children)?;
                entry.insert_with_hasher(hash, node.clone(), (), |node| {
                    node_hash(node.kind(), node.children())
                });
                Ok(node)
            }
        }
    }
}
