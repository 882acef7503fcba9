#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Match orchestration for Garden Defence.
//!
//! [`Match`] owns one world together with the systems that drive it and runs
//! the tick pipeline synchronously, which keeps every scenario reproducible
//! without a clock. [`SessionHandle`] moves a match into a tokio task that
//! owns it exclusively and drives the combat and income timers, and
//! [`SessionRegistry`] keeps one such task per session identifier.

mod actor;
mod error;
mod game;
mod registry;

pub use actor::SessionHandle;
pub use error::SessionError;
pub use game::{CommandOutcome, Match, PlantReceipt};
pub use registry::{SessionId, SessionRegistry};
