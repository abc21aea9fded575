//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Every layer of the application speaks this trait: commands and queries of
/// the service, as well as storage operations of the database.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
