//! Minimal HTTP/1.1 server for exercising repository clients in tests
//!
//! Each connection carries one request. Responses are served in the order
//! they were queued; once the queue is empty every request gets a 404.

use std::collections::VecDeque;
use std::io;
use std::sync::{
    Arc,
    Mutex,
};
use std::time::Duration;

use tokio::io::{
    AsyncBufReadExt,
    AsyncReadExt,
    AsyncWriteExt,
    BufReader,
};
use tokio::net::{
    TcpListener,
    TcpStream,
};

/// Request as seen by the server, body already de-chunked
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Sizes of the transfer-encoding chunks, empty for fixed-length bodies
    pub chunk_sizes: Vec<usize>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Pause between the header block and the body
    pub body_delay: Option<Duration>,
}

impl CannedResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
            body_delay: None,
        }
    }

    pub fn bytes(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            content_type: "application/octet-stream",
            body: body.to_vec(),
            body_delay: None,
        }
    }

    pub fn with_body_delay(mut self, delay: Duration) -> Self {
        self.body_delay = Some(delay);
        self
    }
}

pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    pub async fn start(responses: Vec<CannedResponse>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let recorded = recorded.clone();
                let queue = queue.clone();
                tokio::spawn(async move {
                    let _ = serve(socket, recorded, queue).await;
                });
            }
        });

        Ok(Self { base_url, requests })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

async fn serve(
    socket: TcpStream, recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    queue: Arc<Mutex<VecDeque<CannedResponse>>>,
) -> io::Result<()> {
    let mut reader = BufReader::new(socket);
    let request = read_request(&mut reader).await?;

    if let Ok(mut requests) = recorded.lock() {
        requests.push(request);
    }
    let response = queue
        .lock()
        .ok()
        .and_then(|mut q| q.pop_front())
        .unwrap_or_else(|| CannedResponse::json(404, r#"{"code":404}"#));

    let socket = reader.get_mut();
    let head = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.content_type,
        response.body.len()
    );
    socket.write_all(head.as_bytes()).await?;
    socket.flush().await?;
    if let Some(delay) = response.body_delay {
        tokio::time::sleep(delay).await;
    }
    socket.write_all(&response.body).await?;
    socket.shutdown().await
}

async fn read_request(reader: &mut BufReader<TcpStream>) -> io::Result<RecordedRequest> {
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    let header = |name: &str| {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    };

    let mut body = Vec::new();
    let mut chunk_sizes = Vec::new();
    if header("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).await?;
            let size = usize::from_str_radix(size_line.trim(), 16)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk).await?;
            if size == 0 {
                break;
            }
            chunk.truncate(size);
            chunk_sizes.push(size);
            body.extend_from_slice(&chunk);
        }
    } else if let Some(length) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        body.resize(length, 0);
        reader.read_exact(&mut body).await?;
    }

    Ok(RecordedRequest {
        method,
        target,
        headers,
        body,
        chunk_sizes,
    })
}
