use mindcare_auth::error::AuthError;
use mindcare_auth::password::{
    hash_password, spawn_hash_password, spawn_verify_password, verify_password,
};
use mindcare_auth::validate::{validate_email, validate_password};

#[test]
fn hash_is_salted_phc_string() {
    let first = hash_password("correct horse").unwrap();
    let second = hash_password("correct horse").unwrap();

    assert!(first.starts_with("$argon2id$"));
    assert_ne!(first, second);
    assert!(!first.contains("correct horse"));
}

#[test]
fn verify_matches_only_the_original_password() {
    let hash = hash_password("hunter22").unwrap();
    assert!(verify_password("hunter22", &hash).unwrap());
    assert!(!verify_password("hunter23", &hash).unwrap());
}

#[test]
fn malformed_hash_is_an_error() {
    assert!(matches!(
        verify_password("hunter22", "plaintext"),
        Err(AuthError::PasswordHash(_))
    ));
}

#[tokio::test]
async fn blocking_pool_wrappers_round_trip() {
    let hash = spawn_hash_password("s3cret!".to_string()).await.unwrap();
    assert!(
        spawn_verify_password("s3cret!".to_string(), hash.clone())
            .await
            .unwrap()
    );
    assert!(
        !spawn_verify_password("wrong".to_string(), hash)
            .await
            .unwrap()
    );
}

#[test]
fn email_shape() {
    for ok in ["a@b.co", "first.last+tag@example.org", "x@sub.domain.io"] {
        assert!(validate_email(ok).is_ok(), "{ok}");
    }
    for bad in ["", "plain", "a@b", "a@.", "@b.co", "a b@c.de", "a@b@c.de", "a@b."] {
        assert!(validate_email(bad).is_err(), "{bad}");
    }
}

#[test]
fn password_minimum_length() {
    assert!(validate_password("12345").is_err());
    assert!(validate_password("123456").is_ok());
    // Characters, not bytes.
    assert!(validate_password("ééééé").is_err());

    let err = validate_password("short").unwrap_err();
    assert_eq!(err.to_string(), "Password must be at least 6 characters.");
}
