use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Well-formed cost-12 hash that no password matches. Checked against when
/// the account does not exist so both paths pay the same bcrypt cost.
const UNKNOWN_USER_HASH: &str =
    "$2b$12$.....................................................";

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

/// Spend a full verification without an account to compare against.
pub fn verify_unknown_user(password: &str) {
    let _ = verify(password, UNKNOWN_USER_HASH);
}
