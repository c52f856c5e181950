//! The 40x19 text frame: the only thing a client ever receives.
//!
//! ## Key Types
//!
//! - `Frame`: fixed character grid with clipped writes
//! - `encode`: render a `GameState` for one viewer
//! - `FrameView` / `decode`: read a frame back into structured fields
//! - `FrameAssembler`: split a line stream into frames
//!
//! `layout` holds the row/column table both directions share.

pub mod layout;
pub mod grid;
pub mod encoder;
pub mod decoder;
pub mod assembler;

pub use grid::Frame;
pub use encoder::{encode, Indicator};
pub use decoder::{decode, FrameView, Verdict};
pub use assembler::FrameAssembler;
pub use layout::{Band, HEIGHT, WIDTH};
