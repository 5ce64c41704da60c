pub mod error;
pub mod failure;
pub mod gate;
pub mod threshold;
mod util;

pub use error::{Error, Result};
pub use failure::*;
pub use gate::*;
pub use threshold::*;
pub use util::*;
