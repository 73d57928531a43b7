pub mod engine;
pub use engine::*;

pub mod infoset;
pub use infoset::*;

pub mod recommendation;
pub use recommendation::*;
