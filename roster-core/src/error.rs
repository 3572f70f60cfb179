/// Errors produced by the `roster-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A role name outside `admin`, `user`, `viewer`.
    #[error("invalid role '{value}': expected one of admin, user, viewer")]
    InvalidRole { value: String },

    /// A user id could not be parsed as a non-negative integer.
    #[error("invalid user id '{input}'")]
    InvalidUserId { input: String },
}
