pub mod error_code;
pub mod nullable;
pub mod response;

pub use error_code::ErrorCode;
pub use nullable::double_option;
pub use response::ApiResponse;
