//! Collaborator traits defined in `squadfeed-core` and implemented by other crates.

pub mod navigation;
pub mod socket;
pub mod storage;

pub use navigation::Navigator;
pub use socket::SocketSender;
pub use storage::KeyValueStore;
