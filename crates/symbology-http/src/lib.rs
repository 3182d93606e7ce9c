//! Symbology HTTP - transport boundary
//!
//! [`router`] turns a method, target and body into an [`router::HttpResponse`]
//! without any I/O; [`server`] feeds it from a pool of `tiny_http` worker
//! threads sharing one [`symbology_engine::Engine`].

pub mod router;
pub mod server;

pub use router::{handle, HttpResponse};
pub use server::{HttpServer, ShutdownHandle};
