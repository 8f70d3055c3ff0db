//! Domain logic shared by the storage layer and the HTTP server.
//!
//! Nothing in here touches the database or the network: preset validation,
//! the error taxonomy, frame decoding, encoder profiles and the export
//! workspace all live in this crate so they can be tested in isolation.

pub mod error;
pub mod export;
pub mod ffmpeg;
pub mod preset;
pub mod types;
