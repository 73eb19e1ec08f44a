#![warn(clippy::uninlined_format_args)]

pub mod optimizer;
pub mod parser;

pub use optimizer::MilpTransferOptimizer;
pub use parser::{parse_request, RequestParseError};
