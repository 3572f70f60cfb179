//! Core types for the Roster user service.
//!
//! Defines the user record, its role set, sequential id allocation and the
//! creation-payload validator. Nothing here performs I/O.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod id;
pub mod user;
pub mod validation;

pub use error::CoreError;
pub use id::{IdAllocator, UserId};
pub use user::{NewUser, Role, User};
pub use validation::{is_valid_email, validate_new_user, Issue, IssueCode, ValidationErrors};
