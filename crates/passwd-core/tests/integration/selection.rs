//! Runtime hasher selection and tag-based verification.

use passwd_core::{verify_any, Algorithm, BcryptCost, HashingConfig, ScryptCost, Tier};

#[test]
fn config_file_drives_hasher_choice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hashing.json");
    std::fs::write(
        &path,
        r#"{ "algorithm": "scrypt", "scrypt": { "opsLimit": 32768, "memLimit": 1048576 } }"#,
    )
    .unwrap();

    let config = HashingConfig::load(&path).unwrap();
    let hasher = config.build();
    assert_eq!(hasher.algorithm(), Algorithm::Scrypt);

    let artifact = hasher.hash(&mut b"123123".to_vec()).unwrap();
    assert!(artifact.as_str().starts_with("$7$86..../...."));
    assert!(verify_any(&mut b"123123".to_vec(), artifact.as_bytes()));
}

#[test]
fn verify_any_handles_every_family() {
    for config in [
        HashingConfig {
            algorithm: Algorithm::Bcrypt,
            bcrypt: BcryptCost::MIN,
            ..HashingConfig::default()
        },
        HashingConfig {
            algorithm: Algorithm::Scrypt,
            scrypt: ScryptCost::new(32_768, 1_048_576),
            ..HashingConfig::default()
        },
        HashingConfig::for_tier(Algorithm::Argon2i, Tier::Interactive),
    ] {
        let artifact = config.build().hash(&mut b"123123".to_vec()).unwrap();
        assert!(verify_any(&mut b"123123".to_vec(), artifact.as_bytes()));
        assert!(!verify_any(&mut b"nope".to_vec(), artifact.as_bytes()));
    }
}

#[test]
fn verify_any_rejects_unknown_tags() {
    for artifact in [
        &b""[..],
        b"123123",
        b"$1$saltsalt$digest",
        b"$argon2id$v=19$m=65536,t=3,p=4$c2FsdA$aGFzaA",
        b"$scrypt$ln=14,r=8,p=1$c2FsdA$aGFzaA",
    ] {
        let mut pwd = b"123123".to_vec();
        assert!(!verify_any(&mut pwd, artifact));
        assert_eq!(pwd, vec![0u8; 6]);
    }
}
