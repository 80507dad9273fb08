//! Navigation settings module.

pub use pairlink_conf::*;
