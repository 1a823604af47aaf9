use crate::{
    utility_types::MaybeOwned, Error, GreenElement, GreenNode, NodeCache, NodeOrToken, Result,
    SyntaxKind,
};

/// A checkpoint for maybe wrapping a node. See [`GreenNodeBuilder::checkpoint`]
/// for details.
///
/// A checkpoint stays valid as long as the node it was taken in is still
/// the current one and no later `start_node_at` has regrouped children
/// sitting before the checkpoint. Using a checkpoint whose surroundings
/// were restructured is reported as [`Error::StaleCheckpoint`].
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    /// Child position the checkpoint marks, relative to the shared
    /// children buffer.
    pos: usize,
    /// Mark of the frame that was current when the checkpoint was taken,
    /// `0` for top level.
    frame_mark: u64,
    /// Value of the builder's open-counter when the checkpoint was taken.
    /// Wraps recorded after this are younger than the checkpoint.
    clock: u64,
}

/// A partially built node: `start_node` pushes a frame, `finish_node` pops
/// it and turns everything past `first_child` into the node's children.
#[derive(Debug)]
struct Frame {
    kind: SyntaxKind,
    first_child: usize,
    /// Identity of this frame, drawn from the open-counter. Never reused
    /// within one builder, so a checkpoint can tell a closed-and-reopened
    /// frame from the one it was taken in.
    mark: u64,
    /// Wraps performed directly inside this frame while it was current.
    /// Checkpoints compare against these to detect that children before
    /// them were regrouped.
    wraps: Vec<Wrap>,
}

#[derive(Debug, Clone, Copy)]
struct Wrap {
    clock: u64,
    pos: usize,
}

/// A builder for a green tree.
///
/// Errors reported by the builder are contract violations, not recoverable
/// conditions. After any method returns an error the builder is left in an
/// unspecified (but memory safe) state and should be dropped.
#[derive(Debug)]
pub struct GreenNodeBuilder<'cache> {
    cache: MaybeOwned<'cache, NodeCache>,
    frames: Vec<Frame>,
    children: Vec<GreenElement>,
    /// Wraps performed at top level, where no frame is current.
    root_wraps: Vec<Wrap>,
    /// Total count of `start_node`/`start_node_at` calls, the source of
    /// frame marks and wrap clocks.
    opens: u64,
}

impl GreenNodeBuilder<'_> {
    /// Creates new builder with an internal cache.
    pub fn new() -> GreenNodeBuilder<'static> {
        GreenNodeBuilder::from_cache(MaybeOwned::Owned(NodeCache::default()))
    }

    /// Creates new builder on top of an external cache, so that trees
    /// built through different builders share their green parts.
    pub fn with_cache(cache: &mut NodeCache) -> GreenNodeBuilder<'_> {
        GreenNodeBuilder::from_cache(MaybeOwned::Borrowed(cache))
    }

    fn from_cache(cache: MaybeOwned<'_, NodeCache>) -> GreenNodeBuilder<'_> {
        GreenNodeBuilder {
            cache,
            frames: Vec::new(),
            children: Vec::new(),
            root_wraps: Vec::new(),
            opens: 0,
        }
    }

    /// Adds new token to the current branch.
    ///
    /// Tokens may also be added at top level before any node is started;
    /// they are expected to be wrapped into a root via a checkpoint later.
    /// Adding one *after* the root node was finished is reported as
    /// [`Error::RootAlreadyFinished`].
    pub fn token(&mut self, kind: SyntaxKind, text: &str) -> Result<()> {
        if self.frames.is_empty() && matches!(self.children.last(), Some(NodeOrToken::Node(_))) {
            return Err(Error::RootAlreadyFinished);
        }
        let token = self.cache.intern_token(kind, text);
        self.children.push(token.into());
        Ok(())
    }

    /// Start new node and make it current.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.opens += 1;
        self.frames.push(Frame {
            kind,
            first_child: self.children.len(),
            mark: self.opens,
            wraps: Vec::new(),
        });
    }

    /// Finish current branch and restore previous branch as current.
    ///
    /// Without a matching `start_node` or `start_node_at` this is reported
    /// as [`Error::UnbalancedNode`].
    pub fn finish_node(&mut self) -> Result<()> {
        let frame = self.frames.pop().ok_or(Error::UnbalancedNode)?;
        let children: Vec<GreenElement> = self.children.drain(frame.first_child..).collect();
        let node = self.cache.intern_node(frame.kind, children)?;
        self.children.push(node.into());
        Ok(())
    }

    /// Prepare for maybe wrapping the next node.
    /// The way wrapping works is that you first of all get a checkpoint,
    /// then you place all tokens you want to wrap, and then *maybe* call
    /// `start_node_at`.
    /// Example:
    /// ```rust
    /// # use aspen::{GreenNodeBuilder, SyntaxKind};
    /// # const PLUS: SyntaxKind = SyntaxKind(0);
    /// # const OPERATION: SyntaxKind = SyntaxKind(1);
    /// # struct Parser;
    /// # impl Parser {
    /// #     fn peek(&self) -> Option<SyntaxKind> { None }
    /// #     fn parse_expr(&mut self) {}
    /// # }
    /// # let mut builder = GreenNodeBuilder::new();
    /// # let mut parser = Parser;
    /// let checkpoint = builder.checkpoint();
    /// parser.parse_expr();
    /// if parser.peek() == Some(PLUS) {
    ///     // 1 + 2 = Add(1, 2)
    ///     builder.start_node_at(checkpoint, OPERATION)?;
    ///     parser.parse_expr();
    ///     builder.finish_node()?;
    /// }
    /// # Ok::<(), aspen::Error>(())
    /// ```
    ///
    /// Taking a checkpoint never fails and has no effect on the tree by
    /// itself.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.children.len(),
            frame_mark: self.current_mark(),
            clock: self.opens,
        }
    }

    /// Wrap the children added since `checkpoint` was taken in a new node
    /// and make it current.
    ///
    /// A checkpoint goes stale once the node it was taken in is finished,
    /// or once another wrap has regrouped children sitting before it; such
    /// use is reported as [`Error::StaleCheckpoint`]. Wrapping at the same
    /// position repeatedly is fine, which is what left-associative
    /// operator chains do.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) -> Result<()> {
        let Checkpoint { pos, frame_mark, clock } = checkpoint;
        if self.current_mark() != frame_mark {
            let reason = if frame_mark == 0
                || self.frames.iter().any(|frame| frame.mark == frame_mark)
            {
                "a node started after the checkpoint is still unfinished"
            } else {
                "the node the checkpoint was taken in was already finished"
            };
            return Err(Error::StaleCheckpoint(reason));
        }
        if pos > self.children.len() {
            return Err(Error::StaleCheckpoint(
                "children at the checkpoint were already grouped into a node",
            ));
        }
        let wraps = match self.frames.last() {
            Some(frame) => &frame.wraps,
            None => &self.root_wraps,
        };
        if wraps.iter().any(|wrap| wrap.clock > clock && wrap.pos < pos) {
            return Err(Error::StaleCheckpoint(
                "children before the checkpoint were already grouped into a node",
            ));
        }
        // Within an unchanged frame the checkpoint can't point below the
        // frame's first child.
        debug_assert!(self.frames.last().map_or(0, |frame| frame.first_child) <= pos);

        self.opens += 1;
        let wrap = Wrap { clock: self.opens, pos };
        match self.frames.last_mut() {
            Some(frame) => frame.wraps.push(wrap),
            None => self.root_wraps.push(wrap),
        }
        self.frames.push(Frame {
            kind,
            first_child: pos,
            mark: self.opens,
            wraps: Vec::new(),
        });
        Ok(())
    }

    /// Complete tree building, returning the root node.
    ///
    /// Unfinished nodes are reported as [`Error::UnclosedNodes`]; anything
    /// other than exactly one top level node as
    /// [`Error::NoRootProduced`].
    pub fn finish(mut self) -> Result<GreenNode> {
        if !self.frames.is_empty() {
            return Err(Error::UnclosedNodes(self.frames.len()));
        }
        if self.children.len() != 1 {
            return Err(Error::NoRootProduced);
        }
        match self.children.pop() {
            Some(NodeOrToken::Node(node)) => Ok(node),
            _ => Err(Error::NoRootProduced),
        }
    }

    fn current_mark(&self) -> u64 {
        self.frames.last().map_or(0, |frame| frame.mark)
    }
}

impl Default for GreenNodeBuilder<'static> {
    fn default() -> GreenNodeBuilder<'static> {
        GreenNodeBuilder::new()
    }
}
