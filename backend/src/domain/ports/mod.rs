//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_registry_command;
mod user_registry_query;
mod user_store;

#[cfg(test)]
pub use user_registry_command::MockUserRegistryCommand;
pub use user_registry_command::{
    DeleteUserRequest, RegisterUserRequest, RegisterUserResponse, UpdateEmailRequest,
    UserRegistryCommand,
};
#[cfg(test)]
pub use user_registry_query::MockUserRegistryQuery;
pub use user_registry_query::UserRegistryQuery;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserField, UserPatch, UserStore, UserStoreError};
