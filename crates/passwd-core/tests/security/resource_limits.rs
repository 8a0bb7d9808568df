//! Costs the host cannot satisfy surface as errors, not aborts.

use passwd_core::{
    Argon2iCost, Argon2iHasher, BcryptCost, BcryptHasher, PasswdError, PasswordHasher,
    ScryptCost, ScryptHasher,
};

#[test]
fn empty_plaintext_is_refused_by_every_family() {
    let hashers: Vec<Box<dyn PasswordHasher>> = vec![
        Box::new(Argon2iHasher::default()),
        Box::new(ScryptHasher::default()),
        Box::new(BcryptHasher::default()),
    ];
    for hasher in hashers {
        assert!(matches!(
            hasher.hash(&mut []),
            Err(PasswdError::EmptyPlaintext)
        ));
    }
}

#[test]
fn argon2i_limits_below_minimum_are_configuration_errors() {
    for cost in [Argon2iCost::new(2, 65_536), Argon2iCost::new(3, 4096)] {
        let result = Argon2iHasher::new(cost).hash(&mut b"123123".to_vec());
        assert!(matches!(result, Err(PasswdError::Configuration(_))), "{cost:?}");
    }
}

#[test]
fn scrypt_unaddressable_cost_is_refused() {
    let result = ScryptHasher::new(ScryptCost::new(u64::MAX, usize::MAX))
        .hash(&mut b"123123".to_vec());
    assert!(result.is_err());
}

#[test]
fn bcrypt_cost_bounds() {
    for cost in [BcryptCost(3), BcryptCost(32)] {
        assert!(matches!(
            BcryptHasher::new(cost).hash(&mut b"123123".to_vec()),
            Err(PasswdError::Configuration(_))
        ));
    }
}
