pub mod info;
pub mod join;
pub mod split;

pub use info::*;
pub use join::*;
pub use split::*;
