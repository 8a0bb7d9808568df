//! `$2a$` strings from PHP 5.6 `password_hash`.

use super::{nul_padded, plaintext};
use passwd_core::bcrypt::{verify_password, BcryptHasher};
use passwd_core::{verify_any, BcryptCost, PasswordHasher};

const STORED_COST_13: &str = "$2a$13$LoE7AFiigNGpLRJ7.Iojuu.VPYguc9n5u8yc.i17u/bzDx3X3u.RG";
const STORED_COST_10: &str = "$2a$10$1fE8Jr88P0RwV/OjgyGFS.A14xOW6dg3uRABbD59MzvJ7h0mcMwB2";

#[test]
fn php_artifacts_verify() {
    assert!(verify_password(&mut plaintext(), STORED_COST_13.as_bytes()));
    assert!(verify_password(&mut plaintext(), STORED_COST_10.as_bytes()));
}

#[test]
fn php_artifact_rejects_wrong_password() {
    assert!(!verify_password(&mut b"123124".to_vec(), STORED_COST_10.as_bytes()));
}

#[test]
fn php_artifact_verifies_with_c_terminator() {
    let padded = nul_padded(STORED_COST_10, 61);
    assert!(verify_password(&mut plaintext(), &padded));
}

#[test]
fn other_version_prefixes_verify() {
    for prefix in ["$2b$", "$2y$"] {
        let variant = STORED_COST_10.replacen("$2a$", prefix, 1);
        assert!(verify_password(&mut plaintext(), variant.as_bytes()), "{prefix}");
    }
}

#[test]
fn cost_is_read_from_artifact() {
    let at_10 = BcryptHasher::new(BcryptCost(10));
    assert!(!at_10.needs_rehash(STORED_COST_10.as_bytes()).unwrap());
    assert!(at_10.needs_rehash(STORED_COST_13.as_bytes()).unwrap());
    // The hasher's own cost does not matter for verification.
    assert!(BcryptHasher::new(BcryptCost::MIN).verify(&mut plaintext(), STORED_COST_13.as_bytes()));
}

#[test]
fn verify_any_dispatches_to_bcrypt() {
    assert!(verify_any(&mut plaintext(), STORED_COST_10.as_bytes()));
}
