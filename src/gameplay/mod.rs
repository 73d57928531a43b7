pub mod action;
pub use action::*;

pub mod infer;
pub use infer::*;

pub mod machine;
pub use machine::*;

pub mod phase;
pub use phase::*;

pub mod player;
pub use player::*;

pub mod position;
pub use position::*;
