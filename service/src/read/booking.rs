//! [`Booking`] read model definition.
//!
//! [`Booking`]: crate::domain::Booking

pub mod list {
    //! [`Booking`]s list definitions.

    use common::{define_pagination, Date};

    use crate::domain::{booking, candidate, company, Booking};

    define_pagination!(booking::Id, Booking, Filter, Field);

    /// Returns the [`Selector`] of all the [`Booking`]s occupying the
    /// [`Candidate`]'s [`Date`].
    ///
    /// [`Candidate`]: crate::domain::Candidate
    #[must_use]
    pub fn same_day(candidate: candidate::Id, date: Date) -> Selector {
        Selector {
            filter: Filter {
                candidate: Some(candidate),
                date: Some(date),
                ..Filter::default()
            },
            ..Selector::default()
        }
    }

    /// Filter for [`Selector`].
    ///
    /// All the specified criteria must match.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the only [`Booking`] to select.
        pub id: Option<booking::Id>,

        /// ID of the booked [`Candidate`].
        ///
        /// [`Candidate`]: crate::domain::Candidate
        pub candidate: Option<candidate::Id>,

        /// ID of the [`Company`] bookings are made at.
        ///
        /// [`Company`]: crate::domain::Company
        pub company: Option<company::Id>,

        /// [`Date`] of bookings.
        pub date: Option<Date>,
    }

    impl Filter {
        /// Checks whether the provided [`Booking`] satisfies this [`Filter`].
        #[must_use]
        pub fn matches(&self, booking: &Booking) -> bool {
            self.id.map_or(true, |id| booking.id == id)
                && self.candidate.map_or(true, |id| booking.candidate == id)
                && self.company.map_or(true, |id| booking.company == id)
                && self.date.map_or(true, |d| booking.date == d)
        }
    }

    /// Field to order [`Booking`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub enum Field {
        /// [`Booking::date`].
        Date,

        /// [`Booking::created_at`].
        #[default]
        CreatedAt,

        /// [`Booking::updated_at`].
        UpdatedAt,
    }
}
