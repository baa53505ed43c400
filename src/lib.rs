//! Core crop pipeline: pure geometry, the selection state machine, and the
//! lopdf-backed edit applier. The GUI shell lives in the binary.

pub mod crop;
pub mod error;
pub mod geometry;
pub mod selection;
