//! Data backend adapters.

mod graphql;
mod memory;

pub use graphql::GraphqlCollaborator;
pub use memory::InMemoryCollaborator;
