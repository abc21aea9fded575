//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Authenticated session of a [`User`], carried by a signed [`Token`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Session {
    /// ID of the [`User`] this [`Session`] belongs to.
    pub user_id: user::Id,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Signs this [`Session`] into a [`Token`] with the provided key.
    ///
    /// # Errors
    ///
    /// If [`jsonwebtoken`] fails to sign the claims.
    pub fn encode(
        &self,
        key: &EncodingKey,
    ) -> Result<Token, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&Header::default(), self, key).map(Token)
    }

    /// Verifies the signature and expiration of the provided [`Token`] and
    /// extracts the [`Session`] out of it.
    ///
    /// # Errors
    ///
    /// If the [`Token`] is malformed, signed with another key, or expired.
    pub fn decode(
        token: &Token,
        key: &DecodingKey,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Self>(&token.0, key, &Validation::default())
            .map(|data| data.claims)
    }
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, From, FromStr)]
#[as_ref(str)]
pub struct Token(String);

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use jsonwebtoken::{DecodingKey, EncodingKey};

    use crate::domain::user;

    use super::{Session, Token};

    fn session(lifetime: Duration, expired: bool) -> Session {
        let now = DateTime::now();
        Session {
            user_id: user::Id::new(),
            expires_at: if expired { now - lifetime } else { now + lifetime }
                .coerce(),
        }
    }

    #[test]
    fn decodes_own_token() {
        let s = session(Duration::from_secs(3600), false);
        let token = s.encode(&EncodingKey::from_secret(b"secret")).unwrap();

        let decoded =
            Session::decode(&token, &DecodingKey::from_secret(b"secret"))
                .unwrap();

        assert_eq!(decoded.user_id, s.user_id);
        assert_eq!(
            decoded.expires_at.unix_timestamp(),
            s.expires_at.unix_timestamp(),
        );
    }

    #[test]
    fn rejects_expired_token() {
        let s = session(Duration::from_secs(3600), true);
        let token = s.encode(&EncodingKey::from_secret(b"secret")).unwrap();

        assert!(
            Session::decode(&token, &DecodingKey::from_secret(b"secret"))
                .is_err()
        );
    }

    #[test]
    fn rejects_foreign_signature() {
        let s = session(Duration::from_secs(3600), false);
        let token = s.encode(&EncodingKey::from_secret(b"other")).unwrap();

        assert!(
            Session::decode(&token, &DecodingKey::from_secret(b"secret"))
                .is_err()
        );
    }

    #[test]
    fn rejects_garbage() {
        let token: Token = "not.a.token".parse().unwrap();

        assert!(
            Session::decode(&token, &DecodingKey::from_secret(b"secret"))
                .is_err()
        );
    }
}
