//! [`User`] definitions.

pub mod permission;
pub mod session;

use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From};
use password_hash::{rand_core::OsRng, SaltString};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use secrecy::{zeroize::Zeroize, CloneableSecret};

pub use crate::domain::contact::Email;

pub use self::{permission::Permission, session::Session};

/// Consultant of the recruitment office, able to sign in.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Email`] this [`User`] signs in with.
    pub email: Email,

    /// [`PasswordHash`] of this [`User`].
    pub password_hash: PasswordHash,

    /// Indicator whether this [`User`] is allowed to delete records.
    pub del_permission: bool,

    /// Indicator whether this [`User`] manages the office.
    pub office_manager: bool,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: CreationDateTime,
}

define_id! {
    /// ID of a [`User`].
    Id
}

define_text! {
    /// Name of a [`User`].
    Name, max = 512
}

/// Password of a [`User`].
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: &str) -> bool {
        (6..=128).contains(&password.chars().count())
    }
}

impl std::str::FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Salted [Argon2] hash of a [`Password`] in the [PHC string format].
///
/// [Argon2]: https://en.wikipedia.org/wiki/Argon2
/// [PHC string format]: https://github.com/P-H-C/phc-string-format
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes the provided [`Password`] with a random salt.
    ///
    /// # Errors
    ///
    /// If the hashing algorithm fails.
    pub fn new(password: &Password) -> Result<Self, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.0.as_bytes(), &salt)
            .map(|h| Self(h.to_string()))
    }

    /// Checks whether the provided [`Password`] is the one this
    /// [`PasswordHash`] was produced from.
    ///
    /// Malformed hashes never match.
    #[must_use]
    pub fn verify(&self, password: &Password) -> bool {
        password_hash::PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.0.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

/// [`DateTime`] when a [`User`] was created.
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Password, PasswordHash};

    #[test]
    fn verifies_only_original_password() {
        let password = Password::new("s3cr3t-pass").unwrap();
        let hash = PasswordHash::new(&password).unwrap();

        assert!(hash.to_string().starts_with("$argon2"));
        assert!(hash.verify(&password));
        assert!(!hash.verify(&Password::new("S3cr3t-pass").unwrap()));
    }

    #[test]
    fn salts_every_hash() {
        let password = Password::new("s3cr3t-pass").unwrap();

        assert_ne!(
            PasswordHash::new(&password).unwrap(),
            PasswordHash::new(&password).unwrap(),
        );
    }

    #[test]
    fn rejects_short_password() {
        assert!(Password::new("12345").is_none());
        assert!(Password::new("123456").is_some());
    }
}
