//! [`Permission`] definitions.

use derive_more::{Display, Error};

use super::User;

/// Privilege a [`User`] may be granted.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Permission {
    /// Deleting records.
    #[display("delete")]
    Delete,

    /// Managing the office, including its lookup codes.
    #[display("office manager")]
    OfficeManager,
}

/// Error of a [`User`] lacking a [`Permission`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("`User` lacks `{_0}` permission")]
pub struct PermissionDenied(#[error(not(source))] pub Permission);

impl User {
    /// Checks whether this [`User`] is granted the provided [`Permission`].
    #[must_use]
    pub fn has(&self, permission: Permission) -> bool {
        match permission {
            Permission::Delete => self.del_permission,
            Permission::OfficeManager => self.office_manager,
        }
    }

    /// Ensures this [`User`] is granted all the provided [`Permission`]s,
    /// checking them in order.
    ///
    /// # Errors
    ///
    /// With the first [`Permission`] this [`User`] lacks.
    pub fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<(), PermissionDenied> {
        permissions
            .iter()
            .find(|p| !self.has(**p))
            .map_or(Ok(()), |p| Err(PermissionDenied(*p)))
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::user::{Email, Id, Name, PasswordHash, User};

    use super::{Permission, PermissionDenied};

    fn user(del_permission: bool, office_manager: bool) -> User {
        User {
            id: Id::new(),
            name: Name::new("Ann").unwrap(),
            email: Email::new("ann@example.com").unwrap(),
            password_hash: PasswordHash::new(&"password".into()).unwrap(),
            del_permission,
            office_manager,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn checks_permissions_in_order() {
        let both = [Permission::OfficeManager, Permission::Delete];

        assert_eq!(
            user(false, false).require(&both),
            Err(PermissionDenied(Permission::OfficeManager)),
        );
        assert_eq!(
            user(false, true).require(&both),
            Err(PermissionDenied(Permission::Delete)),
        );
        assert_eq!(user(true, true).require(&both), Ok(()));
        assert_eq!(user(false, false).require(&[]), Ok(()));
    }
}
