//! Public API surface for embedding the encounter runtime.

mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
