pub mod error;
pub mod logging;

pub use error::{ApiError, ApiResult};
pub use logging::{init_logging, with_bootstrap_logging};
