//! Permanent on-disk cache for remote JSON resources.
//!
//! Every resource is addressed by a [`CacheKey`] that mirrors its position in
//! the resource hierarchy. The first successful download is written verbatim
//! to `<root>/<key>.json` and is served from disk from then on:
//! - No expiry and no refresh. Deleting the file is the only way to refetch.
//! - Entries are published atomically, the first writer wins.
//! - A `{"Results": [...]}` envelope is unwrapped to its list on read.

mod key;
mod layer;
mod storage;
mod traits;

pub use key::CacheKey;
pub use layer::CacheLayer;
pub use storage::FileStorage;
pub use traits::Transport;
