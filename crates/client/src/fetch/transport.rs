//! Raw HTTP/1.1 over TCP, optionally wrapped in TLS.
//!
//! One connection per request: the request is written whole, then the
//! response is read until the peer closes. There is no `Content-Length` or
//! chunked framing on the read side, which is why every request carries
//! `Connection: close`.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use go2web_core::Error;
use rustls::pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};

use super::Accept;
use super::url::{RequestTarget, Scheme};

const READ_CHUNK: usize = 8 * 1024;

/// Sends one GET and returns every byte the peer answered with.
///
/// This is the seam between the redirect/cache logic and the network; tests
/// substitute a scripted implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, target: &RequestTarget, headers: &[(String, String)]) -> Result<Vec<u8>, Error>;
}

/// The fixed header set, in wire order.
pub fn request_headers(target: &RequestTarget, user_agent: &str, accept: Accept) -> Vec<(String, String)> {
    vec![
        ("Host".to_string(), target.host.clone()),
        ("User-Agent".to_string(), user_agent.to_string()),
        ("Accept".to_string(), accept.as_str().to_string()),
        ("Connection".to_string(), "close".to_string()),
    ]
}

/// Render the request line and headers, terminated by a blank line.
pub fn build_request(target: &RequestTarget, headers: &[(String, String)]) -> String {
    let mut request = format!("GET {} HTTP/1.1\r\n", target.path);
    for (key, value) in headers {
        request.push_str(key);
        request.push_str(": ");
        request.push_str(value);
        request.push_str("\r\n");
    }
    request.push_str("\r\n");
    request
}

/// Socket transport used by the binary.
#[derive(Clone)]
pub struct TcpTransport {
    tls: TlsConnector,
    read_timeout: Option<Duration>,
}

impl TcpTransport {
    /// Build a transport trusting the bundled webpki root certificates.
    ///
    /// With `read_timeout` unset a silent peer blocks the call forever.
    pub fn new(read_timeout: Option<Duration>) -> Self {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Self { tls: TlsConnector::from(Arc::new(config)), read_timeout }
    }

    async fn exchange(&self, target: &RequestTarget, request: &str) -> Result<Vec<u8>, Error> {
        let hostname = target.hostname();
        let port = target.port();

        let stream = TcpStream::connect((hostname, port)).await.map_err(Error::transport)?;
        tracing::debug!(host = hostname, port, "connected");

        match target.scheme {
            Scheme::Http => round_trip(stream, request).await,
            Scheme::Https => {
                let server_name = ServerName::try_from(hostname.to_string())
                    .map_err(|e| Error::transport(io::Error::new(io::ErrorKind::InvalidInput, e)))?;
                let tls_stream = self.tls.connect(server_name, stream).await.map_err(Error::transport)?;
                tracing::debug!(host = hostname, "TLS handshake complete");
                round_trip(tls_stream, request).await
            }
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&self, target: &RequestTarget, headers: &[(String, String)]) -> Result<Vec<u8>, Error> {
        let request = build_request(target, headers);
        let exchange = self.exchange(target, &request);

        match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, exchange).await.map_err(|_| {
                Error::FetchTimeout(format!("{target} did not complete within {}ms", limit.as_millis()))
            })?,
            None => exchange.await,
        }
    }
}

/// Write the request, then drain the stream until the peer closes it.
async fn round_trip<S>(mut stream: S, request: &str) -> Result<Vec<u8>, Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request.as_bytes()).await.map_err(Error::transport)?;
    stream.flush().await.map_err(Error::transport)?;

    let mut raw = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&chunk[..n]),
            // Many servers drop TLS connections without close_notify.
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !raw.is_empty() => {
                tracing::debug!(bytes = raw.len(), "peer closed without close_notify");
                break;
            }
            Err(e) => return Err(Error::transport(e)),
        }
    }

    tracing::debug!(bytes = raw.len(), "response drained");
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::url::normalize;

    #[test]
    fn test_build_request_exact_bytes() {
        let target = normalize("example.com/search?q=1").unwrap();
        let headers = request_headers(&target, "go2web/0.1", Accept::Html);

        assert_eq!(
            build_request(&target, &headers),
            "GET /search?q=1 HTTP/1.1\r\n\
             Host: example.com\r\n\
             User-Agent: go2web/0.1\r\n\
             Accept: text/html\r\n\
             Connection: close\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_request_headers_order_and_accept() {
        let target = normalize("https://api.example.com:8443/v1").unwrap();
        let headers = request_headers(&target, "agent", Accept::Json);
        let names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(names, ["Host", "User-Agent", "Accept", "Connection"]);
        assert_eq!(headers[0].1, "api.example.com:8443");
        assert_eq!(headers[2].1, "application/json");
    }

    #[test]
    fn test_build_request_has_no_body() {
        let target = normalize("example.com").unwrap();
        let request = build_request(&target, &[]);
        assert_eq!(request, "GET / HTTP/1.1\r\n\r\n");
    }

    #[tokio::test]
    async fn test_connect_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = TcpTransport::new(None);
        let target = normalize(&format!("127.0.0.1:{port}")).unwrap();
        let result = transport.send(&target, &[]).await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
