//! Mintship core library — deployment manifest, settings tree, validation.
//!
//! Public API surface:
//! - [`manifest`] — the declarative deployment input and [`LogLevel`]
//! - [`settings`] — [`SettingsTree`], built-in defaults, deep merge
//! - [`validate`] — required-field checks over the merged tree
//! - [`descriptor`] — [`ServiceDescriptor`], the resolved launch contract
//! - [`paths`] — installed file layout, rooted for testability
//! - [`error`] — [`CoreError`]

pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod settings;
pub mod validate;

pub use descriptor::ServiceDescriptor;
pub use error::CoreError;
pub use manifest::{LogLevel, Manifest};
pub use settings::SettingsTree;
pub use validate::{validate, ValidationError};
