pub mod block;
pub mod channel;
pub mod error;
pub mod metadata;

pub use block::*;
pub use channel::*;
pub use error::*;
pub use metadata::*;
