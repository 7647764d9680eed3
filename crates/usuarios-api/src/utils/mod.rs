pub mod error;
pub mod extract;
pub mod time;

pub use error::ApiError;
pub use extract::JsonBody;
