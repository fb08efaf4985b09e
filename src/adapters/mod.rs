// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod guard;
pub mod http;
pub mod mock;
pub mod usage;
