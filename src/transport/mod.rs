mod codec;
pub use codec::*;
#[cfg(feature = "ipc")]
pub mod ipc;
#[cfg(feature = "local")]
pub mod local;
