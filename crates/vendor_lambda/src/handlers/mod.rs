pub mod create;
pub mod fetch;
pub mod http;
pub mod seed;
