//! Signup and login
//!
//! Composes the password hasher, the person store and the token issuer.
//! Hashing always happens here, before the store sees the record.
//!
//! # Performance
//!
//! Password hashing/verification runs on the blocking thread pool.

use super::{check, validate_request};
use crate::auth::{JwtService, PasswordService, TokenIdentity};
use crate::error::ApiError;
use crate::repositories::{NewPerson, PersonProfile, PersonStore};
use hotel_shared::types::{LoginRequest, SignupRequest, SignupResponse, TokenResponse};
use hotel_shared::validation;
use tracing::{info, warn};

/// Authentication entry points
pub struct AuthService;

impl AuthService {
    /// Create a staff record and issue its first token
    ///
    /// The store's uniqueness constraint decides username races: of two
    /// concurrent signups for one username exactly one succeeds.
    pub async fn signup(
        people: &dyn PersonStore,
        passwords: &PasswordService,
        jwt: &JwtService,
        req: SignupRequest,
    ) -> Result<SignupResponse, ApiError> {
        validate_request(&req)?;
        check(validation::validate_username(&req.username))?;
        if let Some(mobile) = &req.mobile {
            check(validation::validate_mobile(mobile))?;
        }
        if let Some(salary) = &req.salary {
            check(validation::validate_salary(salary))?;
        }

        let password_hash = passwords
            .hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let record = people
            .insert(NewPerson {
                username: req.username,
                password_hash,
                profile: PersonProfile {
                    name: req.name,
                    age: req.age,
                    work: req.work,
                    mobile: req.mobile,
                    email: req.email,
                    address: req.address,
                    salary: req.salary,
                },
            })
            .await?;

        let token = jwt
            .issue(&TokenIdentity {
                id: record.id,
                username: record.username.clone(),
            })
            .map_err(ApiError::Internal)?;

        info!(person_id = %record.id, username = %record.username, "Staff member signed up");

        Ok(SignupResponse {
            response: record.to_person(),
            token,
        })
    }

    /// Exchange credentials for a token
    ///
    /// An unknown username and a wrong password produce the same error and
    /// both run one password verification.
    pub async fn login(
        people: &dyn PersonStore,
        passwords: &PasswordService,
        jwt: &JwtService,
        req: LoginRequest,
    ) -> Result<TokenResponse, ApiError> {
        let record = people.find_by_username(&req.username).await?;

        // Unknown usernames still pay for one verify
        let hash = match &record {
            Some(record) => record.password_hash.clone(),
            None => passwords.dummy_hash().to_string(),
        };
        let valid = passwords
            .verify_async(req.password, hash)
            .await
            .map_err(ApiError::Internal)?;

        let record = match record {
            Some(record) if valid => record,
            _ => {
                warn!("Login failed");
                return Err(ApiError::InvalidCredentials);
            }
        };

        let token = jwt
            .issue(&TokenIdentity {
                id: record.id,
                username: record.username.clone(),
            })
            .map_err(ApiError::Internal)?;

        info!(person_id = %record.id, username = %record.username, "Staff member logged in");

        Ok(TokenResponse { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordConfig;
    use crate::repositories::MemoryPersonStore;
    use secrecy::SecretString;
    use std::sync::Arc;

    struct Fixture {
        people: Arc<MemoryPersonStore>,
        passwords: PasswordService,
        jwt: JwtService,
    }

    fn fixture() -> Fixture {
        Fixture {
            people: Arc::new(MemoryPersonStore::new()),
            passwords: PasswordService::new(&PasswordConfig {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
            jwt: JwtService::new(&SecretString::new("service-secret".to_string()), 600).unwrap(),
        }
    }

    fn signup_request(username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            password: password.to_string(),
            name: None,
            age: None,
            work: None,
            mobile: None,
            email: None,
            address: None,
            salary: None,
        }
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    impl Fixture {
        async fn signup(&self, req: SignupRequest) -> Result<SignupResponse, ApiError> {
            AuthService::signup(self.people.as_ref(), &self.passwords, &self.jwt, req).await
        }

        async fn login(&self, req: LoginRequest) -> Result<TokenResponse, ApiError> {
            AuthService::login(self.people.as_ref(), &self.passwords, &self.jwt, req).await
        }
    }

    #[tokio::test]
    async fn test_signup_stores_hash_and_issues_token() {
        let fx = fixture();
        let response = fx.signup(signup_request("alice", "Secret123")).await.unwrap();

        let claims = fx.jwt.verify(&response.token).unwrap();
        assert_eq!(claims.id, response.response.id);
        assert_eq!(claims.username, "alice");

        let stored = fx.people.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Secret123");
        assert!(fx.passwords.verify("Secret123", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected_and_count_unchanged() {
        let fx = fixture();
        fx.signup(signup_request("alice", "Secret123")).await.unwrap();

        let result = fx.signup(signup_request("alice", "Another123")).await;
        assert!(matches!(result, Err(ApiError::DuplicateUsername)));
        assert_eq!(fx.people.len().await, 1);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let fx = fixture();
        for req in [
            signup_request("al", "Secret123"),
            signup_request("alice", "short"),
            signup_request("alice smith", "Secret123"),
            SignupRequest {
                mobile: Some("12ab".to_string()),
                ..signup_request("alice", "Secret123")
            },
        ] {
            let result = fx.signup(req).await;
            assert!(matches!(result, Err(ApiError::Validation(_))));
        }
        assert!(fx.people.is_empty().await);
    }

    #[tokio::test]
    async fn test_login_returns_token_for_stored_identity() {
        let fx = fixture();
        let signup = fx.signup(signup_request("alice", "Secret123")).await.unwrap();

        let login = fx.login(login_request("alice", "Secret123")).await.unwrap();
        let claims = fx.jwt.verify(&login.token).unwrap();
        assert_eq!(claims.id, signup.response.id);
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let fx = fixture();
        fx.signup(signup_request("alice", "Secret123")).await.unwrap();

        let wrong_password = fx.login(login_request("alice", "Wrong1234")).await.unwrap_err();
        let unknown_user = fx.login(login_request("mallory", "Secret123")).await.unwrap_err();

        assert!(matches!(wrong_password, ApiError::InvalidCredentials));
        assert!(matches!(unknown_user, ApiError::InvalidCredentials));
        assert_eq!(wrong_password.public_message(), unknown_user.public_message());
        assert_eq!(wrong_password.status(), unknown_user.status());
    }

    #[tokio::test]
    async fn test_login_unknown_user_with_placeholder_password_fails() {
        let fx = fixture();
        let result = fx
            .login(login_request("nobody", "unused-login-placeholder"))
            .await;
        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_concurrent_signups_for_one_username() {
        let fx = Arc::new(fixture());

        let a = {
            let fx = fx.clone();
            tokio::spawn(async move { fx.signup(signup_request("alice", "Secret123")).await })
        };
        let b = {
            let fx = fx.clone();
            tokio::spawn(async move { fx.signup(signup_request("alice", "Secret456")).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(ApiError::DuplicateUsername)))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 1);
        assert_eq!(fx.people.len().await, 1);
    }
}
