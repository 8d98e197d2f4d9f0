pub mod config;
pub mod logging;

pub mod fetch;
pub mod parser;
pub mod platform;
pub mod scheduler;

pub use fetch::{ErrorKind, FetchError, FetchOptions};
pub use parser::{PlatformResult, RankedItem};
pub use platform::Platform;
pub use scheduler::{
    parallel_fetch_all, FetchProgress, FetchReport, NameMap, ParallelFetcher, ResultSet,
};
