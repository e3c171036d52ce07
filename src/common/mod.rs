pub mod format;
pub mod response;

pub use format::ResponseFormat;
pub use response::ApiResponse;
