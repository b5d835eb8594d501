use crate::config::parameter;
use crate::dto::token_dto::{TokenClaimsDto, TokenReadDto};
use crate::entity::user::User;
use crate::error::TokenError;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// HMAC key must be at least 256 bits.
const MIN_SECRET_BYTES: usize = 32;

#[derive(Clone, Debug)]
pub struct TokenService {
    secret: String,
    ttl_days: i64,
}

pub trait TokenServiceTrait {
    fn new() -> Result<Self, TokenError>
    where
        Self: Sized;
    /// Issue a signed credential for `user`. `iat` is now, `exp` is
    /// `iat + ttl`, both epoch milliseconds.
    fn issue(&self, user: &User) -> Result<TokenReadDto, TokenError>;
    /// Verify the signature and recover the claims. Expiry is NOT checked
    /// here; the envelope is in milliseconds and is validated lazily via
    /// [`TokenServiceTrait::verify`].
    fn decode(&self, token: &str) -> Result<TokenClaimsDto, TokenError>;
    fn is_expired(&self, claims: &TokenClaimsDto) -> bool;
    /// Decode and reject expired envelopes.
    fn verify(&self, token: &str) -> Result<TokenClaimsDto, TokenError>;
}

impl TokenService {
    pub fn with_settings(secret: impl Into<String>, ttl_days: i64) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::TokenCreationError(format!(
                "Token secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }
        Ok(Self { secret, ttl_days })
    }

    fn encode_claims(&self, claims: &TokenClaimsDto) -> Result<String, TokenError> {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| TokenError::TokenCreationError(e.to_string()))
    }
}

impl TokenServiceTrait for TokenService {
    fn new() -> Result<Self, TokenError> {
        Self::with_settings(
            parameter::get("TOKEN_SECRET"),
            parameter::get_i64("TOKEN_TTL_DAYS"),
        )
    }

    fn issue(&self, user: &User) -> Result<TokenReadDto, TokenError> {
        let iat = Utc::now().timestamp_millis();
        let exp = iat + self.ttl_days * MS_PER_DAY;

        let claims = TokenClaimsDto {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat,
            exp,
        };

        let token = self.encode_claims(&claims)?;
        Ok(TokenReadDto { token, iat, exp })
    }

    fn decode(&self, token: &str) -> Result<TokenClaimsDto, TokenError> {
        if token.is_empty() {
            return Err(TokenError::MissingToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // exp carries milliseconds, which the library would read as seconds.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        jsonwebtoken::decode::<TokenClaimsDto>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::InvalidToken)
    }

    fn is_expired(&self, claims: &TokenClaimsDto) -> bool {
        Utc::now().timestamp_millis() > claims.exp
    }

    fn verify(&self, token: &str) -> Result<TokenClaimsDto, TokenError> {
        let claims = self.decode(token)?;
        if self.is_expired(&claims) {
            return Err(TokenError::TokenExpired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::user::Role;

    const TEST_SECRET: &str = "unit-test-secret-0123456789abcdefghij";

    fn service() -> TokenService {
        TokenService::with_settings(TEST_SECRET, 7).unwrap()
    }

    fn ana() -> User {
        serde_json::from_str(
            r#"{"id":3,"username":"Ana Pereira","email":"ana@x.com","password":"pw123",
                "role":"agricultor","state":"AM","city":"Manaus",
                "phoneNumber":"(92) 96666-8765","memberSince":"2023-11-21"}"#,
        )
        .unwrap()
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = TokenService::with_settings("curto", 7).unwrap_err();
        assert!(matches!(err, TokenError::TokenCreationError(_)));
    }

    #[test]
    fn envelope_is_exactly_seven_days_in_ms() {
        let issued = service().issue(&ana()).unwrap();
        assert_eq!(issued.exp - issued.iat, 7 * 24 * 60 * 60 * 1000);
    }

    #[test]
    fn decode_round_trips_the_claims() {
        let svc = service();
        let issued = svc.issue(&ana()).unwrap();
        let claims = svc.decode(&issued.token).unwrap();

        assert_eq!(claims.id, 3);
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.role, Role::Agricultor);
        assert_eq!(claims.iat, issued.iat);
        assert_eq!(claims.exp, issued.exp);
    }

    #[test]
    fn garbage_and_empty_tokens_fail_to_decode() {
        let svc = service();
        assert!(matches!(
            svc.decode("not-a-token"),
            Err(TokenError::InvalidToken)
        ));
        assert!(matches!(svc.decode(""), Err(TokenError::MissingToken)));
    }

    #[test]
    fn tampered_token_fails_signature_check() {
        let svc = service();
        let issued = svc.issue(&ana()).unwrap();

        let mut tampered = issued.token.clone();
        tampered.pop();
        tampered.push('A');
        assert!(svc.decode(&tampered).is_err());
    }

    #[test]
    fn token_from_another_key_is_rejected() {
        let other = TokenService::with_settings("another-secret-0123456789abcdefghij", 7).unwrap();
        let issued = other.issue(&ana()).unwrap();
        assert!(matches!(
            service().decode(&issued.token),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn expiry_is_judged_in_milliseconds() {
        let svc = service();
        let now = Utc::now().timestamp_millis();

        let live = TokenClaimsDto {
            id: 3,
            email: "ana@x.com".to_string(),
            role: Role::Agricultor,
            iat: now,
            exp: now + 1_000,
        };
        assert!(!svc.is_expired(&live));

        let stale = TokenClaimsDto {
            exp: now - 1_000,
            ..live
        };
        assert!(svc.is_expired(&stale));
    }

    #[test]
    fn verify_rejects_expired_envelopes_distinctly() {
        let svc = service();
        let now = Utc::now().timestamp_millis();
        let claims = TokenClaimsDto {
            id: 3,
            email: "ana@x.com".to_string(),
            role: Role::Agricultor,
            iat: now - 10_000,
            exp: now - 5_000,
        };
        let token = svc.encode_claims(&claims).unwrap();

        assert!(matches!(svc.verify(&token), Err(TokenError::TokenExpired)));
        assert!(matches!(svc.verify("lixo"), Err(TokenError::InvalidToken)));

        let issued = svc.issue(&ana()).unwrap();
        assert_eq!(svc.verify(&issued.token).unwrap().id, 3);
    }

    #[test]
    fn expired_claims_still_decode() {
        // Expiry is the service's decision, not the codec's.
        let svc = service();
        let now = Utc::now().timestamp_millis();
        let claims = TokenClaimsDto {
            id: 3,
            email: "ana@x.com".to_string(),
            role: Role::Agricultor,
            iat: now - 10_000,
            exp: now - 5_000,
        };
        let token = svc.encode_claims(&claims).unwrap();
        assert_eq!(svc.decode(&token).unwrap(), claims);
    }
}
