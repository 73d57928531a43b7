pub mod detection;
pub use detection::*;

pub mod label;
pub use label::*;

pub mod text;
pub use text::*;

pub mod zone;
pub use zone::*;
