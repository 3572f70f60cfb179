//! Fuzz target: validation of arbitrary `POST /api/users` bodies.
//!
//! Any byte sequence that parses as JSON is fed to the validator, which must
//! never panic and must always return either a user or a non-empty issue list.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roster_core::validate_new_user;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    match validate_new_user(&payload) {
        Ok(user) => assert!(user.name.chars().count() >= 2),
        Err(errors) => assert!(!errors.issues().is_empty()),
    }
});
