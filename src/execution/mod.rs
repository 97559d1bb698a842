//! Execution Module
//!
//! The pipeline engine: cache probe, transport dispatch, status
//! classification, body decoding and cache write-back.

pub mod executor;
pub mod transport;

pub use executor::HttpExecutor;
pub use transport::{ReqwestTransport, Transport, TransportError, WireRequest, WireResponse};
