//! Byte-channel binding for the device bridge.
//!
//! The bridge talks to its parent over two pre-opened, unidirectional byte
//! channels inherited at process startup: one carrying command frames in,
//! one carrying device-output frames out. This crate adopts those
//! descriptors; what sits behind them (pipe, socketpair) is the parent's
//! choice and invisible here.

pub mod channel;
pub mod error;

pub use channel::{
    descriptor_open, InboundChannel, OutboundChannel, COMMAND_FD, OUTPUT_FD,
};
pub use error::{Result, TransportError};
