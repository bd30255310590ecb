//! Deferred resolution.
//!
//! Attacks are not applied when declared. They go through an
//! [`ActionQueue`], which presents one action at a time for a fixed
//! duration and applies it when the duration runs out. Callers drive the
//! queue with elapsed time, so a renderer can interpolate the in-flight
//! action between its source and target slots.

mod queue;

pub use queue::{ActionQueue, InFlight, QueueStatus, DEFAULT_ACTION_DURATION};
