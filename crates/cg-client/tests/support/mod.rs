//! In-process fake backend built on `tiny_http`.

#![allow(dead_code)]

use std::io::Read;
use std::sync::mpsc;
use std::thread;

/// A request as the fake backend saw it.
#[derive(Debug)]
pub struct Captured {
    pub method: String,
    pub url: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Serves `responses` in order, one per request, then stops.
pub struct FakeBackend {
    pub base_url: String,
    requests: mpsc::Receiver<Captured>,
}

impl FakeBackend {
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fake backend");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("fake backend port");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let mut received = Vec::new();
                let _ = request.as_reader().read_to_end(&mut received);
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string())
                    .unwrap_or_default();
                let _ = tx.send(Captured {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    content_type,
                    body: received,
                });

                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json")
                            .expect("header"),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests: rx,
        }
    }

    /// Next captured request, waiting briefly for the server thread.
    pub fn next_request(&self) -> Captured {
        self.requests
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("fake backend received a request")
    }

    /// True if no request has reached the backend.
    pub fn saw_no_request(&self) -> bool {
        self.requests.try_recv().is_err()
    }
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
