//! The caller's plaintext buffer is all-zero after every call.

use passwd_core::{
    verify_any, Argon2iCost, Argon2iHasher, BcryptCost, BcryptHasher, PasswordHasher,
    ScryptCost, ScryptHasher, WipeOnDrop,
};

/// Plaintext that is easy to spot if it survives.
const SENTINEL: &[u8] = b"\xDE\xAD\xBE\xEFcorrect horse battery staple";

fn hashers() -> Vec<Box<dyn PasswordHasher>> {
    vec![
        Box::new(Argon2iHasher::new(Argon2iCost::new(3, 65_536))),
        Box::new(ScryptHasher::new(ScryptCost::new(32_768, 1_048_576))),
        Box::new(BcryptHasher::new(BcryptCost::MIN)),
    ]
}

fn assert_wiped(buf: &[u8]) {
    assert!(buf.iter().all(|&b| b == 0), "plaintext survived: {buf:02x?}");
}

#[test]
fn wiped_after_successful_hash() {
    for hasher in hashers() {
        let mut pwd = SENTINEL.to_vec();
        hasher.hash(&mut pwd).unwrap();
        assert_wiped(&pwd);
    }
}

#[test]
fn wiped_after_matching_and_mismatching_verify() {
    for hasher in hashers() {
        let artifact = hasher.hash(&mut SENTINEL.to_vec()).unwrap();

        let mut pwd = SENTINEL.to_vec();
        assert!(hasher.verify(&mut pwd, artifact.as_bytes()));
        assert_wiped(&pwd);

        let mut pwd = b"wrong guess".to_vec();
        assert!(!hasher.verify(&mut pwd, artifact.as_bytes()));
        assert_wiped(&pwd);
    }
}

#[test]
fn wiped_after_malformed_artifact() {
    for hasher in hashers() {
        let mut pwd = SENTINEL.to_vec();
        assert!(!hasher.verify(&mut pwd, b"$not$an$artifact"));
        assert_wiped(&pwd);
    }
}

#[test]
fn wiped_after_configuration_error() {
    let broken: Vec<Box<dyn PasswordHasher>> = vec![
        Box::new(Argon2iHasher::new(Argon2iCost::new(1, 65_536))),
        Box::new(ScryptHasher::new(ScryptCost::new(u64::MAX, usize::MAX))),
        Box::new(BcryptHasher::new(BcryptCost(40))),
    ];
    for hasher in broken {
        let mut pwd = SENTINEL.to_vec();
        assert!(hasher.hash(&mut pwd).is_err());
        assert_wiped(&pwd);
    }
}

#[test]
fn wiped_by_verify_any_on_unknown_tag() {
    let mut pwd = SENTINEL.to_vec();
    assert!(!verify_any(&mut pwd, b"$5$rounds=5000$salt$digest"));
    assert_wiped(&pwd);
}

#[test]
fn wiped_when_caller_panics_while_guard_is_live() {
    let mut pwd = SENTINEL.to_vec();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = WipeOnDrop::new(&mut pwd).unwrap();
        panic!("simulated failure inside the KDF");
    }));
    assert!(result.is_err());
    assert_wiped(&pwd);
}

#[test]
fn guard_debug_never_prints_plaintext() {
    let mut pwd = SENTINEL.to_vec();
    let guard = WipeOnDrop::new(&mut pwd).unwrap();
    assert_eq!(format!("{guard:?}"), "WipeOnDrop(***)");
}
