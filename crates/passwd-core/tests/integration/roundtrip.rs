//! Hash then verify for each family at cheap costs.

use passwd_core::{
    Algorithm, Argon2iCost, Argon2iHasher, BcryptCost, BcryptHasher, HashArtifact,
    PasswordHasher, ScryptCost, ScryptHasher,
};

fn cheap_hashers() -> Vec<Box<dyn PasswordHasher>> {
    vec![
        Box::new(Argon2iHasher::new(Argon2iCost::new(3, 65_536))),
        Box::new(ScryptHasher::new(ScryptCost::new(32_768, 1_048_576))),
        Box::new(BcryptHasher::new(BcryptCost::MIN)),
    ]
}

#[test]
fn every_family_round_trips() {
    for hasher in cheap_hashers() {
        let artifact = hasher.hash(&mut b"123123".to_vec()).unwrap();
        assert_eq!(artifact.algorithm(), Some(hasher.algorithm()));
        assert!(artifact.len() <= hasher.algorithm().max_artifact_len());
        assert!(
            hasher.verify(&mut b"123123".to_vec(), artifact.as_bytes()),
            "{} failed to verify its own artifact",
            hasher.algorithm()
        );
        assert!(!hasher.verify(&mut b"123124".to_vec(), artifact.as_bytes()));
    }
}

#[test]
fn artifacts_survive_serde_storage() {
    for hasher in cheap_hashers() {
        let artifact = hasher.hash(&mut b"stored".to_vec()).unwrap();
        let json = serde_json::to_string(&artifact).unwrap();
        assert_eq!(json, format!("\"{}\"", artifact.as_str()));
        let loaded: HashArtifact = serde_json::from_str(&json).unwrap();
        assert!(hasher.verify(&mut b"stored".to_vec(), loaded.as_bytes()));
    }
}

#[test]
fn non_ascii_and_binary_plaintexts() {
    let inputs: [&[u8]; 3] = ["mot de passe é ü 密码".as_bytes(), &[0xFF, 0x01, 0x7F, 0x80], b" "];
    for hasher in cheap_hashers() {
        for input in inputs {
            let artifact = hasher.hash(&mut input.to_vec()).unwrap();
            assert!(hasher.verify(&mut input.to_vec(), artifact.as_bytes()));
        }
    }
}

#[test]
fn same_plaintext_gets_distinct_artifacts() {
    for hasher in cheap_hashers() {
        let a = hasher.hash(&mut b"123123".to_vec()).unwrap();
        let b = hasher.hash(&mut b"123123".to_vec()).unwrap();
        assert_ne!(a, b, "{} reused a salt", hasher.algorithm());
    }
}

#[test]
fn cross_family_artifacts_do_not_verify() {
    let hashers = cheap_hashers();
    let artifacts: Vec<HashArtifact> = hashers
        .iter()
        .map(|h| h.hash(&mut b"123123".to_vec()).unwrap())
        .collect();
    for hasher in &hashers {
        for artifact in &artifacts {
            if artifact.algorithm() != Some(hasher.algorithm()) {
                assert!(!hasher.verify(&mut b"123123".to_vec(), artifact.as_bytes()));
            }
        }
    }
}

#[test]
fn convenience_functions_use_defaults() {
    let artifact = passwd_core::bcrypt::hash_password(&mut b"123123".to_vec()).unwrap();
    assert!(artifact.as_str().starts_with("$2a$12$"));
    assert!(passwd_core::bcrypt::verify_password(
        &mut b"123123".to_vec(),
        artifact.as_bytes()
    ));

    let artifact = passwd_core::scrypt::hash_password(&mut b"123123".to_vec()).unwrap();
    assert_eq!(artifact.algorithm(), Some(Algorithm::Scrypt));
    assert!(artifact.as_str().starts_with("$7$C6..../...."));
    assert!(passwd_core::scrypt::verify_password(
        &mut b"123123".to_vec(),
        artifact.as_bytes()
    ));

    let artifact = passwd_core::argon2i::hash_password(&mut b"123123".to_vec()).unwrap();
    assert!(artifact.as_str().starts_with("$argon2i$v=19$m=32768,t=4,p=1$"));
    assert!(passwd_core::argon2i::verify_password(
        &mut b"123123".to_vec(),
        artifact.as_bytes()
    ));
}
