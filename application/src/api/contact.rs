//! Contact details scalars.

use derive_more::{AsRef, Display, From, Into};
use juniper::GraphQLScalar;
use service::domain::contact;

use crate::api::scalar;

/// Email address, always lower-cased.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<contact::Email>)]
pub struct Email(contact::Email);

/// Phone number.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<contact::Phone>)]
pub struct Phone(contact::Phone);
