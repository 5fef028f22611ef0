pub mod app;
pub mod cli;
pub mod error;
pub mod report;

pub use app::{build_and_run, Application};
pub use cli::Cli;
pub use error::AnalyzeError;
pub use report::report_response;
