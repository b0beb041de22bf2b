//! # mintship-supervisor
//!
//! Everything that touches the host system: systemctl, user/group and data
//! directory provisioning, the firewall, and the daemon launch path used as
//! the unit's `ExecStart`.
//!
//! The launch path is split into pure `build_*` functions plus a final
//! `exec`; the precondition-then-exec sequence is covered by tests without
//! spawning anything.

pub mod error;
pub mod firewall;
pub mod launch;
pub mod provision;
pub mod systemctl;

pub use error::SupervisorError;
