//! Request/response adapter in front of the engine and the query service.
//!
//! Mirrors the HTTP surface of the counter service without binding to a
//! server framework: a [`Request`] goes in, a status-coded JSON
//! [`Response`] comes out.

pub mod request;
pub mod router;

pub use request::{Method, Request, Response};
pub use router::Router;
