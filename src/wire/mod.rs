pub mod bytes;
pub mod ofp;
pub mod walker;

pub use walker::{MessageWalker, OfpMessage, WalkStop};
