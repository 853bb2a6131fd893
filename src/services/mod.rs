pub mod registry;
pub mod rounds;
pub mod server;
pub mod validation;
