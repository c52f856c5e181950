//! Session layer: drives one duel over two line-oriented connections.
//!
//! The session never opens sockets itself; the server (or a test) hands
//! it two `Peer`s.

pub mod peer;
pub mod dispatcher;

pub use peer::{Peer, MAX_LINE_BYTES};
pub use dispatcher::{Session, SessionEnd, SessionError, DEFAULT_GRACE_PERIOD};
