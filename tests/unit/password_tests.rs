use backend_lib::auth::CredentialHasher;

const PASSWORDS: [&str; 5] = ["secret1", "correct horse battery staple", "pässwörd", "123456", "P@ssw0rd!"];

#[test]
fn test_every_password_verifies_against_its_own_hash() {
    let hasher = CredentialHasher::new(4, 8, 1).unwrap();
    for password in PASSWORDS {
        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash), "{password} should verify");
    }
}

#[test]
fn test_no_password_verifies_against_another_hash() {
    let hasher = CredentialHasher::new(4, 8, 1).unwrap();
    let hashes: Vec<String> = PASSWORDS.iter().map(|p| hasher.hash(p).unwrap()).collect();

    for (i, password) in PASSWORDS.iter().enumerate() {
        for (j, hash) in hashes.iter().enumerate() {
            assert_eq!(hasher.verify(password, hash), i == j);
        }
    }
}
