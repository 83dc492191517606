pub mod auth;
pub mod gate;
pub mod handlers;
pub mod jwt;
pub mod middleware;
