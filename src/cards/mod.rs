pub mod card;
pub use card::*;

pub mod category;
pub use category::*;

pub mod rank;
pub use rank::*;

pub mod suit;
pub use suit::*;
