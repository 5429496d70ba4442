pub mod resolvers;
pub mod schema;
pub mod service;
pub mod types;

pub use schema::{create_schema, GraphQLContext, GraphQLSchema};
pub use service::GraphQLService;
