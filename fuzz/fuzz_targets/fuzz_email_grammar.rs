//! Fuzz target: the email grammar check.
//!
//! Accepted addresses always contain exactly one `@` with a non-empty local
//! part and a dotted domain.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roster_core::is_valid_email;

fuzz_target!(|data: &[u8]| {
    let Ok(email) = std::str::from_utf8(data) else {
        return;
    };
    if is_valid_email(email) {
        let (local, domain) = email.split_once('@').unwrap_or_default();
        assert!(!local.is_empty());
        assert!(!domain.contains('@'));
        assert!(domain.contains('.'));
    }
});
