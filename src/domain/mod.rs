pub mod types;

pub use types::{ChatTurn, ImageError, InlineImage, TurnRole};
