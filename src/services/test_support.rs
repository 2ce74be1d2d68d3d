//! Local HTTP server for client tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::mpsc;
use std::thread;

use tiny_http::{Header, Response, Server};

use crate::domain::config::ApiConfig;
use crate::eventing::UiEvent;
use crate::services::{ApiClient, Notifier};

pub(crate) struct TestServer {
    pub base_url: String,
    /// Every request URL, in arrival order
    pub urls: mpsc::Receiver<String>,
}

impl TestServer {
    pub fn client(&self) -> (ApiClient, crossbeam_channel::Receiver<UiEvent>) {
        let (notifier, events) = Notifier::channel();
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        };
        (ApiClient::new(&config, notifier).expect("client"), events)
    }

    pub fn received(&self) -> Vec<String> {
        self.urls.try_iter().collect()
    }
}

/// Serve every request with `respond(url)` until the test process exits
pub(crate) fn serve<F>(respond: F) -> TestServer
where
    F: Fn(&str) -> (u16, String) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("bind");
    let port = server.server_addr().to_ip().expect("ip").port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let url = request.url().to_string();
            let _ = tx.send(url.clone());
            let (status, body) = respond(&url);
            let header = Header::from_bytes("Content-Type", "application/json").expect("header");
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    TestServer {
        base_url: format!("http://127.0.0.1:{port}/api"),
        urls: rx,
    }
}

/// Serve the scripted `(status, body)` replies in order, then 404
pub(crate) fn scripted(replies: Vec<(u16, &'static str)>) -> TestServer {
    let replies = Mutex::new(VecDeque::from(replies));
    serve(move |_| {
        replies
            .lock()
            .expect("lock")
            .pop_front()
            .map(|(status, body)| (status, body.to_string()))
            .unwrap_or((404, String::new()))
    })
}

/// Toast messages received so far
pub(crate) fn toasts(events: &crossbeam_channel::Receiver<UiEvent>) -> Vec<String> {
    events
        .try_iter()
        .map(|event| match event {
            UiEvent::Toast { message, .. } => message.to_string(),
        })
        .collect()
}
