pub mod codec;
pub use codec::*;

pub mod error;
pub use error::*;

pub mod loader;
pub use loader::*;

pub mod table;
pub use table::*;
