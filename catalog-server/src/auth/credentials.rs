//! Admin credentials
//!
//! The dashboard has a single admin principal, configured via environment:
//! `ADMIN_USERNAME` plus either `ADMIN_PASSWORD_HASH` (argon2 PHC string) or
//! a plaintext `ADMIN_PASSWORD` which is hashed at startup (development).

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2 PHC hash of the admin password
    password_hash: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Load credentials from the environment.
    ///
    /// Returns `None` when no password source is configured; the server then
    /// refuses all logins rather than falling back to a default password.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());

        if let Ok(hash) = std::env::var("ADMIN_PASSWORD_HASH") {
            return Some(Self::new(username, hash));
        }

        if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
            tracing::warn!("ADMIN_PASSWORD is set in plaintext; prefer ADMIN_PASSWORD_HASH");
            let hash = hash_password(&password).ok()?;
            return Some(Self::new(username, hash));
        }

        None
    }

    /// Verify a login attempt.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            tracing::error!("Stored admin password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash a password with argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_correct_password_only() {
        let hash = hash_password("tajne123").unwrap();
        let creds = AdminCredentials::new("admin", hash);
        assert!(creds.verify("admin", "tajne123"));
        assert!(!creds.verify("admin", "wrong"));
        assert!(!creds.verify("root", "tajne123"));
    }
}
