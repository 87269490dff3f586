pub mod auth;
pub mod forecast;
pub mod server;
