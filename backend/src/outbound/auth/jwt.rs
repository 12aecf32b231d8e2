//! HS256 JSON Web Tokens implementing [`AuthService`].
//!
//! Expiry is checked against the injected [`Clock`] rather than the system
//! time so token lifetimes are testable.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AuthService, AuthServiceError};
use crate::domain::{IssuedToken, Principal, Role, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
}

pub struct JwtAuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtAuthService {
    /// Sign and verify with `secret`; issued tokens live for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared with the injected clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

impl AuthService for JwtAuthService {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<IssuedToken, AuthServiceError> {
        let now = self.clock.utc();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| AuthServiceError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<Principal, AuthServiceError> {
        let claims = decode::<Claims>(token, &self.decoding, &Self::validation())
            .map_err(|err| AuthServiceError::invalid(err.to_string()))?
            .claims;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthServiceError::invalid("expiry out of range"))?;
        if self.clock.utc() >= expires_at {
            return Err(AuthServiceError::expired());
        }
        let user_id =
            UserId::new(&claims.sub).map_err(|err| AuthServiceError::invalid(err.to_string()))?;
        Ok(Principal::new(user_id, claims.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn advance(&self, delta: Duration) {
            match self.0.lock() {
                Ok(mut now) => *now += delta,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            match self.0.lock() {
                Ok(now) => *now,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock(Mutex::new(
            Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0)
                .single()
                .expect("fixture time"),
        )))
    }

    fn service(clock: &Arc<MutableClock>, secret: &[u8]) -> JwtAuthService {
        JwtAuthService::new(secret, Duration::hours(24), clock.clone())
    }

    #[rstest]
    fn issued_tokens_verify_to_the_same_principal(clock: Arc<MutableClock>) {
        let auth = service(&clock, b"0123456789abcdef0123456789abcdef");
        let user = UserId::random();

        let issued = auth.issue(&user, Role::Organizer).expect("issue");
        let principal = auth.verify(&issued.token).expect("verify");

        assert_eq!(principal, Principal::new(user, Role::Organizer));
        assert_eq!(issued.expires_at, clock.utc() + Duration::hours(24));
    }

    #[rstest]
    fn tokens_expire_after_the_ttl(clock: Arc<MutableClock>) {
        let auth = service(&clock, b"0123456789abcdef0123456789abcdef");
        let issued = auth.issue(&UserId::random(), Role::Volunteer).expect("issue");

        clock.advance(Duration::hours(24) - Duration::seconds(1));
        assert!(auth.verify(&issued.token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(
            auth.verify(&issued.token).expect_err("expired"),
            AuthServiceError::expired()
        );
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid(clock: Arc<MutableClock>) {
        let issuer = service(&clock, b"first-secret-first-secret-first!");
        let verifier = service(&clock, b"other-secret-other-secret-other!");
        let issued = issuer.issue(&UserId::random(), Role::Volunteer).expect("issue");

        assert!(matches!(
            verifier.verify(&issued.token),
            Err(AuthServiceError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.token")]
    #[case("eyJhbGciOiJIUzI1NiJ9.e30.invalid")]
    fn garbage_is_invalid(clock: Arc<MutableClock>, #[case] token: &str) {
        let auth = service(&clock, b"0123456789abcdef0123456789abcdef");
        assert!(matches!(
            auth.verify(token),
            Err(AuthServiceError::Invalid { .. })
        ));
    }
}
