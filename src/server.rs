//! Metrics exposition endpoint
//!
//! Serves the current state of every registered metric family in the
//! Prometheus text format, one HTTP/1 connection task per scraper. Binding
//! and serving are split so a port conflict surfaces as a startup error
//! instead of a listener that silently never existed.

use std::convert::Infallible;
use std::net::SocketAddr;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::{Error, Result};

/// Default exposition port scraped by the collector.
pub const METRICS_PORT: u16 = 9089;

/// Fixed exposition path.
pub const METRICS_PATH: &str = "/metrics";

/// Pull-based exposition server over an explicit registry.
pub struct MetricsServer {
    listener: TcpListener,
    registry: Registry,
}

impl MetricsServer {
    /// Bind the exposition listener.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the port cannot be bound (e.g. already in
    /// use). The process entry point must treat this as fatal: a scrape
    /// endpoint that never came up is otherwise invisible to operators.
    pub async fn bind(addr: SocketAddr, registry: Registry) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        info!("metrics server listening on {}", listener.local_addr()?);

        Ok(Self { listener, registry })
    }

    /// The address the listener actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve scrapes for the remaining lifetime of the process.
    ///
    /// This is the process's main serving loop: it never returns `Ok`, only
    /// `Err` if the listener itself fails.
    pub async fn serve(self) -> Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            debug!("scrape connection from {}", peer);

            let io = TokioIo::new(stream);
            let registry = self.registry.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let registry = registry.clone();
                    async move { Ok::<_, Infallible>(exposition_response(&req, &registry)) }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    error!("metrics connection error: {}", e);
                }
            });
        }
    }
}

fn exposition_response(req: &Request<Incoming>, registry: &Registry) -> Response<Full<Bytes>> {
    match req.uri().path() {
        METRICS_PATH => {
            let encoder = TextEncoder::new();
            let mut buffer = Vec::new();
            if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
                error!("failed to encode metrics: {}", e);
                return Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Full::new(Bytes::from("encoding error")))
                    .unwrap();
            }

            Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", encoder.format_type())
                .body(Full::new(Bytes::from(buffer)))
                .unwrap()
        }
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("not found")))
            .unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_on_occupied_port_fails() {
        let occupant = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupant.local_addr().unwrap();

        let result = MetricsServer::bind(addr, Registry::new()).await;
        match result {
            Err(Error::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
            other => panic!("expected bind error, got: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_bind_reports_local_addr() {
        let server = MetricsServer::bind("127.0.0.1:0".parse().unwrap(), Registry::new())
            .await
            .unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }
}
