//! Async runtime primitives
//!
//! Channel wrappers used by the side channels that run concurrently with the
//! search pipeline.

pub mod channel;

pub use channel::{Rx, Tx, unbounded};
