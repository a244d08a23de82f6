//! Broadcast fusion: rewriting chains of element-wise operations over collections into
//! a single `Broadcast` node that evaluates one scalar expression per output element.

mod broadcast_node;
mod fusion;
mod scalar_names;

pub(crate) use broadcast_node::broadcast_dshape;
pub use broadcast_node::{broadcast, leaves_of_type};
pub use fusion::{
    BROADCASTABLE, WANT_TO_BROADCAST, broadcast_collect, broadcast_collect_with, fuse,
};
pub use scalar_names::{ScalarNames, scalar_symbols, scalar_symbols_with};
