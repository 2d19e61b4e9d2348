pub mod coffee;
pub mod event;

pub use coffee::*;
pub use event::*;
