use secrecy::SecretString;
use serde::Deserialize;

/// Signing key and lifetime of bearer tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    pub expiration_hours: i64,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            expiration_hours,
        }
    }
}
