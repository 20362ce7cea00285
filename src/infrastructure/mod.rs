pub mod config;
pub mod dribbble;
pub mod http;
pub mod middleware;
