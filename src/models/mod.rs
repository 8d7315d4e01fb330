pub mod group;
pub mod item;
pub mod labels;

pub use group::*;
pub use item::*;
