//! 中间件模块

pub mod api_key_auth;

pub use api_key_auth::{API_KEY_HEADER, api_key_auth_middleware, hash_api_key};
