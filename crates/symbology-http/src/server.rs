//! tiny_http worker pool
//!
//! One listening socket, `workers` threads pulling requests from it. Each
//! request gets a `RequestId` (the caller's `x-request-id` header when
//! present) that is logged and echoed back.

#![allow(clippy::result_large_err)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use symbology_core::core_types::schema::HEADER_REQUEST_ID;
use symbology_core::core_types::{RequestContext, RequestId};
use symbology_core::errors::{ExError, ExErrorKind};
use symbology_core::{log_op_end, log_op_start, SnapshotSink};
use symbology_engine::Engine;
use tiny_http::{Header, Request, Response, Server};
use tracing::{info, warn};

use crate::router::{self, HttpResponse};

type Result<T> = std::result::Result<T, ExError>;

/// Bound HTTP server, not yet serving
pub struct HttpServer<S: SnapshotSink> {
    server: Arc<Server>,
    engine: Arc<Engine<S>>,
    workers: usize,
}

/// Stops a running [`HttpServer`] from another thread
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
    workers: usize,
}

impl ShutdownHandle {
    /// Wake every worker so `run` returns
    pub fn shutdown(&self) {
        for _ in 0..self.workers {
            self.server.unblock();
        }
    }
}

impl<S: SnapshotSink + Send + Sync + 'static> HttpServer<S> {
    /// Bind the listening socket
    ///
    /// # Errors
    /// `Io` if the address cannot be bound, `InvalidInput` for zero workers.
    pub fn bind(addr: &str, engine: Arc<Engine<S>>, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("http_bind")
                .with_message("at least one worker is required"));
        }
        let server = Server::http(addr).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("http_bind")
                .with_message(format!("bind http at {}: {}", addr, e))
        })?;

        Ok(Self {
            server: Arc::new(server),
            engine,
            workers,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: self.server.clone(),
            workers: self.workers,
        }
    }

    /// Serve until shut down
    ///
    /// # Errors
    /// `Internal` if a worker thread cannot be spawned or panicked.
    pub fn run(self) -> Result<()> {
        info!(
            component = module_path!(),
            op = "http_serve",
            addr = ?self.local_addr(),
            workers = self.workers,
            "symbology http listening"
        );

        let mut handles = Vec::with_capacity(self.workers);
        for n in 0..self.workers {
            let server = self.server.clone();
            let engine = self.engine.clone();
            let handle = thread::Builder::new()
                .name(format!("symbology-http-{}", n))
                .spawn(move || {
                    for request in server.incoming_requests() {
                        respond(&engine, request);
                    }
                })
                .map_err(|e| {
                    ExError::new(ExErrorKind::Internal)
                        .with_op("http_serve")
                        .with_message(format!("spawn worker: {}", e))
                })?;
            handles.push(handle);
        }

        let mut panicked = 0usize;
        for handle in handles {
            if handle.join().is_err() {
                panicked += 1;
            }
        }
        if panicked > 0 {
            return Err(ExError::new(ExErrorKind::Internal)
                .with_op("http_serve")
                .with_message(format!("{} worker(s) panicked", panicked)));
        }
        Ok(())
    }
}

fn request_context(request: &Request) -> (RequestContext, String) {
    let (path, query) = match request.url().split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (request.url().to_string(), String::new()),
    };

    let mut ctx = RequestContext::new(request.method().as_str(), path);
    if let Some(header) = request
        .headers()
        .iter()
        .find(|h| h.field.equiv(HEADER_REQUEST_ID))
    {
        let supplied = header.value.as_str().trim();
        if !supplied.is_empty() {
            ctx = ctx.with_request_id(RequestId::from_string(supplied.to_string()));
        }
    }
    (ctx, query)
}

fn respond<S: SnapshotSink>(engine: &Engine<S>, mut request: Request) {
    let (ctx, query) = request_context(&request);
    log_op_start!(
        "http_request",
        request_id = ctx.request_id.as_str(),
        method = ctx.method.as_str(),
        path = ctx.path.as_str()
    );
    let start = Instant::now();

    let mut body = String::new();
    let response = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => router::handle(engine, &ctx, &query, &body),
        Err(e) => HttpResponse::from_error(
            &ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("unreadable request body: {}", e)),
        ),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    log_op_end!(
        "http_request",
        duration_ms = elapsed,
        request_id = ctx.request_id.as_str(),
        status = response.status
    );

    let mut reply = Response::from_string(response.body.to_string())
        .with_status_code(response.status);
    if let Ok(content_type) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        reply.add_header(content_type);
    }
    if let Ok(request_id) =
        Header::from_bytes(HEADER_REQUEST_ID.as_bytes(), ctx.request_id.as_str().as_bytes())
    {
        reply.add_header(request_id);
    }

    if let Err(e) = request.respond(reply) {
        warn!(
            component = module_path!(),
            op = "http_request",
            request_id = ctx.request_id.as_str(),
            "failed to send response: {}",
            e
        );
    }
}
