pub mod request_validator;

pub use request_validator::{parse_timestamp, RequestValidator};
