//! Platform API client (external collaborator boundary)

pub(crate) mod auth;
pub(crate) mod graphql;

pub(crate) use auth::{load_token, signin, store_token};
pub(crate) use graphql::fetch_profile;
