//! Monoio-native HTTPS client
//!
//! One TLS connection per request (`Connection: close`), HTTP/1.1 only,
//! GET only. Bodies sent with `Transfer-Encoding: chunked` are de-chunked
//! before they are handed back.

use crate::errors::{MarketError, Result};
use monoio::io::{AsyncReadRent, AsyncWriteRentExt};
use monoio::net::TcpStream;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection};
use std::io::{Read, Write};
use std::sync::Arc;

const USER_AGENT: &str = concat!("etrade-market/", env!("CARGO_PKG_VERSION"));
const READ_CHUNK: usize = 8192;

/// HTTPS client for the market data API
#[derive(Clone)]
pub struct HttpsClient {
    tls_config: Arc<ClientConfig>,
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl HttpsClient {
    /// Create a new HTTPS client trusting the webpki root store
    pub fn new() -> Result<Self> {
        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let tls_config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            tls_config: Arc::new(tls_config),
        })
    }

    /// Issue a GET with the given extra headers
    pub async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse> {
        let parsed_url = url::Url::parse(url)?;
        if parsed_url.scheme() != "https" {
            return Err(MarketError::InvalidUrl(format!("only https is supported: {url}")));
        }

        let host = parsed_url
            .host_str()
            .ok_or_else(|| MarketError::InvalidUrl(format!("no host in {url}")))?
            .to_string();
        let port = parsed_url.port().unwrap_or(443);

        let tcp_stream = TcpStream::connect(format!("{host}:{port}"))
            .await
            .map_err(|e| MarketError::NetworkError(format!("TCP connect to {host}:{port} failed: {e}")))?;

        let server_name = ServerName::try_from(host.clone())
            .map_err(|e| MarketError::NetworkError(format!("Invalid server name {host}: {e:?}")))?;
        let tls_conn = ClientConnection::new(self.tls_config.clone(), server_name)
            .map_err(|e| MarketError::NetworkError(format!("TLS setup failed: {e}")))?;

        let mut tls_stream = TlsStream::new(tcp_stream, tls_conn);
        let request = build_get_request(&host, &path_and_query(&parsed_url), headers);

        tls_stream.write_all(request.as_bytes()).await?;
        let raw = tls_stream.read_to_end().await?;

        parse_http_response(&raw)
    }
}

fn path_and_query(url: &url::Url) -> String {
    let mut target = url.path().to_string();
    if target.is_empty() {
        target.push('/');
    }
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// Serialize an HTTP/1.1 GET request head
fn build_get_request(host: &str, target: &str, headers: &[(&str, String)]) -> String {
    let mut request = format!(
        "GET {target} HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: {USER_AGENT}\r\n\
         Accept: application/xml, application/json\r\n\
         Connection: close\r\n"
    );
    for (name, value) in headers {
        request.push_str(&format!("{name}: {value}\r\n"));
    }
    request.push_str("\r\n");
    request
}

/// Split a raw response into status, headers and (de-chunked) body
fn parse_http_response(data: &[u8]) -> Result<HttpResponse> {
    let header_end = find_subslice(data, b"\r\n\r\n").ok_or_else(|| {
        MarketError::NetworkError("Invalid HTTP response: no header terminator".to_string())
    })?;

    let head = String::from_utf8_lossy(&data[..header_end]);
    let mut lines = head.lines();

    let status_line = lines
        .next()
        .ok_or_else(|| MarketError::NetworkError("Empty response".to_string()))?;
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| MarketError::NetworkError(format!("Invalid status line: {status_line}")))?;

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let chunked = headers.iter().any(|(key, value)| {
        key.eq_ignore_ascii_case("transfer-encoding") && value.to_ascii_lowercase().contains("chunked")
    });

    let raw_body = &data[header_end + 4..];
    let body = if chunked {
        decode_chunked(raw_body)?
    } else {
        raw_body.to_vec()
    };

    Ok(HttpResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Decode a `Transfer-Encoding: chunked` body. Chunk extensions and
/// trailers are ignored.
fn decode_chunked(mut data: &[u8]) -> Result<Vec<u8>> {
    let mut body = Vec::with_capacity(data.len());
    loop {
        let line_end = find_subslice(data, b"\r\n")
            .ok_or_else(|| MarketError::NetworkError("Truncated chunk size line".to_string()))?;
        let size_line = String::from_utf8_lossy(&data[..line_end]);
        let size_hex = size_line.split(';').next().unwrap_or("").trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| MarketError::NetworkError(format!("Invalid chunk size '{size_hex}'")))?;
        data = &data[line_end + 2..];

        if size == 0 {
            return Ok(body);
        }
        if data.len() < size {
            return Err(MarketError::NetworkError(format!(
                "Truncated chunk: expected {size} bytes, got {}",
                data.len()
            )));
        }
        body.extend_from_slice(&data[..size]);
        data = data[size..].strip_prefix(b"\r\n").unwrap_or(&data[size..]);
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// rustls session driven over a monoio TCP stream
struct TlsStream {
    stream: TcpStream,
    tls_conn: ClientConnection,
    handshake_complete: bool,
}

impl TlsStream {
    fn new(stream: TcpStream, tls_conn: ClientConnection) -> Self {
        Self {
            stream,
            tls_conn,
            handshake_complete: false,
        }
    }

    /// Push every pending TLS record to the socket
    async fn flush_tls(&mut self) -> Result<()> {
        while self.tls_conn.wants_write() {
            let mut out = Vec::with_capacity(READ_CHUNK);
            let written = self
                .tls_conn
                .write_tls(&mut out)
                .map_err(|e| MarketError::NetworkError(format!("TLS write failed: {e}")))?;
            if written == 0 {
                break;
            }
            let (result, _) = self.stream.write_all(out).await;
            result.map_err(|e| MarketError::NetworkError(format!("TCP write failed: {e}")))?;
        }
        Ok(())
    }

    /// Read one batch of TLS records from the socket. Returns false on EOF.
    async fn fill_tls(&mut self) -> Result<bool> {
        let (result, buf) = self.stream.read(vec![0u8; READ_CHUNK]).await;
        let bytes_read =
            result.map_err(|e| MarketError::NetworkError(format!("TCP read failed: {e}")))?;
        if bytes_read == 0 {
            return Ok(false);
        }

        self.tls_conn
            .read_tls(&mut std::io::Cursor::new(&buf[..bytes_read]))
            .map_err(|e| MarketError::NetworkError(format!("TLS read failed: {e}")))?;
        self.tls_conn
            .process_new_packets()
            .map_err(|e| MarketError::NetworkError(format!("TLS process failed: {e}")))?;
        Ok(true)
    }

    async fn complete_handshake(&mut self) -> Result<()> {
        while !self.handshake_complete {
            self.flush_tls().await?;

            if !self.tls_conn.is_handshaking() {
                self.handshake_complete = true;
                break;
            }

            if !self.tls_conn.wants_read() {
                return Err(MarketError::NetworkError("TLS handshake stalled".to_string()));
            }
            if !self.fill_tls().await? {
                return Err(MarketError::NetworkError(
                    "Connection closed during handshake".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.complete_handshake().await?;

        self.tls_conn
            .writer()
            .write_all(data)
            .map_err(|e| MarketError::NetworkError(format!("TLS application write failed: {e}")))?;

        self.flush_tls().await
    }

    async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        self.complete_handshake().await?;

        let mut response = Vec::new();
        let mut plaintext = vec![0u8; READ_CHUNK];

        loop {
            match self.tls_conn.reader().read(&mut plaintext) {
                Ok(0) => break, // close_notify received
                Ok(n) => {
                    response.extend_from_slice(&plaintext[..n]);
                    continue;
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(e) => {
                    return Err(MarketError::NetworkError(format!("TLS read failed: {e}")));
                }
            }

            if !self.fill_tls().await? {
                break;
            }
        }

        Ok(response)
    }
}
