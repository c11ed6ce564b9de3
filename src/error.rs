//! Typed errors shared by the remote client, the stores, and the caches.

use std::sync::PoisonError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy exposed to callers.
///
/// Callers match on the variant: `NoConnectivity` warrants an offline retry
/// affordance, `NotFound` is a valid empty result for searches, and
/// `LocalStore` failures are recovered with defaults wherever a degraded
/// state is acceptable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The transport layer could not reach the network.
  #[error("network is unreachable")]
  NoConnectivity,

  /// The remote resource does not exist.
  #[error("not found")]
  NotFound,

  /// Any other remote failure: non-2xx status or malformed body.
  #[error("request failed: {0}")]
  RequestFailed(String),

  /// A persistence read or write failed.
  #[error("local store failure: {0}")]
  LocalStore(String),
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    Error::LocalStore(e.to_string())
  }
}

impl<T> From<PoisonError<T>> for Error {
  fn from(e: PoisonError<T>) -> Self {
    Error::LocalStore(format!("lock poisoned: {}", e))
  }
}
