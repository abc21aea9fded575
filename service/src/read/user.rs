//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.

    use common::define_pagination;

    use crate::domain::{user, User};

    define_pagination!(user::Id, User, Filter, Field);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the only [`User`] to select.
        pub id: Option<user::Id>,

        /// Text the [`user::Name`] should contain, as typed.
        pub name: Option<String>,
    }

    /// Field to order [`User`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub enum Field {
        /// [`User::name`].
        Name,

        /// [`User::email`].
        Email,

        /// [`User::created_at`].
        #[default]
        CreatedAt,
    }
}
