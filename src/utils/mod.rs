pub mod error;
pub mod logging;

pub use error::{BoxResult, TocError};
pub use logging::{init_logging, set_log_level};
