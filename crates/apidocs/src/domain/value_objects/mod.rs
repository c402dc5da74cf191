//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod location_type;
mod registration_mode;
mod version_state;

pub use location_type::*;
pub use registration_mode::*;
pub use version_state::*;
