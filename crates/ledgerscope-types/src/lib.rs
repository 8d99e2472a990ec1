pub mod condition;
pub mod error;
pub mod notification;
pub mod txgroups;

pub use condition::*;
pub use error::{Error, Result};
pub use notification::*;
pub use txgroups::*;
