mod builder;
mod element;
mod node;
mod node_cache;
mod token;

pub use self::{
    builder::{Checkpoint, GreenNodeBuilder},
    element::{GreenElement, GreenElementRef},
    node::{Children, GreenNode},
    node_cache::NodeCache,
    token::GreenToken,
};
