//! Core building blocks for the streaming TTS server: the voice catalog,
//! the synthesis provider abstraction, and chunk partitioning helpers.
//!
//! The server crate composes these into the WebSocket session protocol.

pub mod catalog;
pub mod provider;
pub mod stream;

pub use catalog::{VoiceCatalog, VoiceDescriptor};
pub use provider::{RegionTable, RemoteSynthesizer, Synthesizer, VoiceRoute};
pub use stream::{partition, DEFAULT_CHUNK_SIZE};
