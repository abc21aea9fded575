//! [`Company`] read model definition.
//!
//! [`Company`]: crate::domain::Company

pub mod list {
    //! [`Company`] list definitions.

    use common::{define_pagination, search::CaseVariants};

    use crate::domain::{company, Company};

    define_pagination!(company::Id, Company, Filter, Field);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the only [`Company`] to select.
        pub id: Option<company::Id>,

        /// [`CaseVariants`] the [`Company::name`] should contain.
        pub search: Option<CaseVariants>,
    }

    /// Field to order [`Company`] list by.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub enum Field {
        /// [`Company::name`].
        Name,

        /// [`Company::email`].
        Email,

        /// [`Company::created_at`].
        #[default]
        CreatedAt,

        /// [`Company::updated_at`].
        UpdatedAt,
    }
}
