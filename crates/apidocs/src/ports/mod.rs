//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the registry talks to the
//! hosting platform. Implementations live in `adapters`.

mod platform;

pub use platform::*;
