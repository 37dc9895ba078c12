//! 数据传输对象
//!
//! - `request`: 查询参数
//! - `response`: 响应体

pub mod request;
pub mod response;

pub use request::BpTiersQuery;
pub use response::{BpTiersResponse, HealthResponse};
