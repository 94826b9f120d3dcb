use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use models::user::{NewUser, UserType};

use super::domain::{AuthToken, AuthUser, GenerateProductKeyInput, ProductKey, SigninInput, SignupInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use crate::validation::Validate;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub product_key_secret: String,
    pub token_ttl_hours: i64,
}

/// JWT payload. `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    sub: String,
    name: String,
    user_type: UserType,
    iat: i64,
    exp: i64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

fn hash_secret(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

/// An unparsable stored hash counts as a mismatch.
fn verify_secret(plain: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    fn product_key_material(&self, email: &str, user_type: UserType) -> String {
        format!("{}-{}-{}", email, user_type, self.cfg.product_key_secret)
    }

    /// Register a new account and sign it in.
    ///
    /// Non-buyer accounts must present a product key minted for this exact
    /// email and user type.
    #[instrument(skip(self, input), fields(email = %input.email, user_type = %user_type))]
    pub async fn signup(&self, user_type: UserType, input: SignupInput) -> Result<AuthToken, AuthError> {
        input.validate()?;

        if user_type.requires_product_key() {
            let Some(key) = input.product_key.as_deref() else {
                warn!("signup without product key");
                return Err(AuthError::Unauthorized);
            };
            if !verify_secret(&self.product_key_material(&input.email, user_type), key) {
                warn!("signup with invalid product key");
                return Err(AuthError::Unauthorized);
            }
        }

        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let password_hash = hash_secret(&input.password)?;
        let user = self
            .repo
            .create_user(NewUser {
                name: input.name,
                phone: input.phone,
                email: input.email,
                password_hash,
                user_type,
            })
            .await?;
        info!(user_id = user.id, email = %user.email, user_type = %user.user_type, "user_registered");
        self.issue_token(&AuthUser::from(&user))
    }

    /// Check credentials and issue a token. Unknown email and wrong password
    /// are indistinguishable to the caller.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signin(&self, input: SigninInput) -> Result<AuthToken, AuthError> {
        input.validate()?;
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !verify_secret(&input.password, &user.password) {
            return Err(AuthError::Unauthorized);
        }
        info!(user_id = user.id, "user_signed_in");
        self.issue_token(&AuthUser::from(&user))
    }

    /// Mint a product key authorizing `input.email` to sign up as `input.user_type`.
    #[instrument(skip(self, input), fields(caller = caller.id, email = %input.email, user_type = %input.user_type))]
    pub async fn generate_product_key(&self, caller: &AuthUser, input: GenerateProductKeyInput) -> Result<ProductKey, AuthError> {
        if !caller.is(UserType::Admin) {
            return Err(AuthError::Forbidden("only admins can issue product keys".into()));
        }
        input.validate()?;
        let product_key = self.product_key(&input.email, input.parsed_user_type()?)?;
        info!("product_key_issued");
        Ok(ProductKey { product_key })
    }

    /// Raw product key for an email/user type pair, without a caller check.
    /// Used for bootstrapping the first admin.
    pub fn product_key(&self, email: &str, user_type: UserType) -> Result<String, AuthError> {
        hash_secret(&self.product_key_material(email, user_type))
    }

    pub fn issue_token(&self, user: &AuthUser) -> Result<AuthToken, AuthError> {
        let now = chrono::Utc::now();
        let exp = chrono::Duration::try_hours(self.cfg.token_ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::TokenError(format!("token ttl of {}h is out of range", self.cfg.token_ttl_hours)))?;
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            user_type: user.user_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(AuthToken { token })
    }

    /// Decode and check a bearer token. Any failure is `Unauthorized`.
    pub fn verify_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::Unauthorized
        })?;
        let id = data.claims.sub.parse::<i32>().map_err(|_| AuthError::Unauthorized)?;
        Ok(AuthUser { id, name: data.claims.name, user_type: data.claims.user_type })
    }
}
