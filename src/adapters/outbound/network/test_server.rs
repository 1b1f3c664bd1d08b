//! Canned-response HTTP server for adapter tests
//!
//! Serves each connection once with `Connection: close`; the first route
//! whose prefix matches the request path answers, anything else is a 404.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

pub struct StubRoute {
    prefix: &'static str,
    status: u16,
    body: String,
}

impl StubRoute {
    pub fn new(prefix: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            prefix,
            status,
            body: body.into(),
        }
    }
}

pub struct StubServer {
    base_url: String,
}

impl StubServer {
    /// Binds an ephemeral local port and answers from `routes` on a
    /// background thread for the rest of the test process.
    pub fn start(routes: Vec<StubRoute>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = respond(stream, &routes);
            }
        });

        Self { base_url }
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }
}

fn respond(stream: TcpStream, routes: &[StubRoute]) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();

    // Drain headers and body so the client sees a clean close
    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let (status, payload) = routes
        .iter()
        .find(|route| path.starts_with(route.prefix))
        .map(|route| (route.status, route.body.as_str()))
        .unwrap_or((404, ""));

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    )?;
    stream.flush()
}
