//! Abstractions for pagination and ordering of lists.

/// Pagination arguments.
///
/// Applied after filtering and ordering: rows up to (and including) the
/// `after` cursor are dropped first, then `skip` rows, then at most `first`
/// rows are returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments<C> {
    /// Maximum number of items to return, if limited.
    pub first: Option<usize>,

    /// Number of items to skip.
    pub skip: usize,

    /// Cursor after which to return items.
    pub after: Option<C>,
}

impl<C> Default for Arguments<C> {
    fn default() -> Self {
        Self {
            first: None,
            skip: 0,
            after: None,
        }
    }
}

impl<C> Arguments<C> {
    /// Creates new [`Arguments`] out of the raw client input.
    ///
    /// [`None`] is returned if `first` or `skip` is negative.
    pub fn new<Num>(
        first: Option<Num>,
        skip: Option<Num>,
        after: Option<C>,
    ) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        Some(Self {
            first: first.map(TryInto::try_into).transpose().ok()?,
            skip: skip.map(TryInto::try_into).transpose().ok()?.unwrap_or(0),
            after,
        })
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug, Default)]
pub struct Selector<C, F, O> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<C>,

    /// Filter being applied before paginating.
    pub filter: F,

    /// [`Ordering`] of the items.
    pub ordering: O,
}

/// Ordering of a list by the `F`ield.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Ordering<F> {
    /// Field to order by.
    pub field: F,

    /// Direction of the ordering.
    pub order: Order,
}

impl<F> Ordering<F> {
    /// Creates a new ascending [`Ordering`] by the provided `field`.
    #[must_use]
    pub const fn asc(field: F) -> Self {
        Self {
            field,
            order: Order::Ascending,
        }
    }

    /// Creates a new descending [`Ordering`] by the provided `field`.
    #[must_use]
    pub const fn desc(field: F) -> Self {
        Self {
            field,
            order: Order::Descending,
        }
    }
}

/// Order of items.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    #[default]
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns SQL keyword representing this [`Order`].
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Returns comparison operator selecting items coming after a cursor in
    /// this [`Order`].
    #[must_use]
    pub const fn after_operator(&self) -> &'static str {
        match self {
            Self::Ascending => ">",
            Self::Descending => "<",
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($cursor:ty, $node:ty, $filter:ty, $field:ty) => {
        #[doc = "A page of nodes."]
        pub type Page = ::std::vec::Vec<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$cursor>;

        #[doc = "Ordering of a [`Page`]."]
        pub type Ordering = $crate::pagination::Ordering<$field>;

        #[doc = "[`Page`] selector."]
        pub type Selector =
            $crate::pagination::Selector<$cursor, $filter, Ordering>;
    };
}

#[cfg(test)]
mod spec {
    use super::Arguments;

    #[test]
    fn defaults_to_everything() {
        let args = Arguments::<u8>::new::<i32>(None, None, None).unwrap();

        assert_eq!(args, Arguments::default());
        assert_eq!(args.first, None);
        assert_eq!(args.skip, 0);
    }

    #[test]
    fn accepts_non_negative_numbers() {
        let args = Arguments::new(Some(10), Some(20), Some('c')).unwrap();

        assert_eq!(args.first, Some(10));
        assert_eq!(args.skip, 20);
        assert_eq!(args.after, Some('c'));
    }

    #[test]
    fn rejects_negative_numbers() {
        assert!(Arguments::<u8>::new(Some(-1), None, None).is_none());
        assert!(Arguments::<u8>::new(None, Some(-5), None).is_none());
    }
}
