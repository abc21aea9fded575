//! [`Candidate`] read model definition.
//!
//! [`Candidate`]: crate::domain::Candidate

pub mod list {
    //! [`Candidate`]s list definitions.

    use common::{define_pagination, search::CaseVariants};

    use crate::domain::{candidate, Candidate};

    define_pagination!(candidate::Id, Candidate, Filter, Field);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the only [`Candidate`] to select.
        pub id: Option<candidate::Id>,

        /// [`CaseVariants`] either [`Candidate::forename`] or
        /// [`Candidate::surname`] should contain.
        pub search: Option<CaseVariants>,
    }

    /// Field to order [`Candidate`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub enum Field {
        /// [`Candidate::forename`].
        Forename,

        /// [`Candidate::surname`].
        Surname,

        /// [`Candidate::email`].
        Email,

        /// [`Candidate::created_at`].
        #[default]
        CreatedAt,

        /// [`Candidate::updated_at`].
        UpdatedAt,
    }
}
