//! Retrieval of build logs: a build identifier is resolved to the pod (and node) that ran it, the
//! raw container log is fetched through the API server's node proxy, and the result is parsed
//! into timestamped `LogItem`s.
mod errors;
mod fetcher;
mod locator;
mod parser;
mod storage;

pub use errors::*;
pub use fetcher::*;
pub use locator::*;
pub use parser::*;
pub use storage::*;

#[cfg(test)]
mod tests;
