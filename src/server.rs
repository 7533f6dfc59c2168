//! HTTP front end.
//!
//! A blocking `tiny_http` accept loop on its own thread. Handlers keep no
//! state: every request goes through the shared `TaskStore`, which reads and
//! rewrites the task file.

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::db::TaskStore;
use crate::error::AppError;
use crate::task::TaskPayload;

/// Body of `GET /` and of any path without a handler.
pub const WELCOME: &str = "Welcome to Task Manager. Available endpoints: /tasks, /add, /update, /delete";

/// A response before it is handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub content_type: Option<&'static str>,
}

impl Reply {
    fn json(status: u16, value: &impl Serialize) -> Reply {
        match serde_json::to_string(value) {
            Ok(mut body) => {
                body.push('\n');
                Reply {
                    status,
                    body,
                    content_type: Some("application/json"),
                }
            }
            Err(e) => Reply::text(500, &e.to_string()),
        }
    }

    fn text(status: u16, message: &str) -> Reply {
        Reply {
            status,
            body: format!("{message}\n"),
            content_type: Some("text/plain; charset=utf-8"),
        }
    }

    fn empty(status: u16) -> Reply {
        Reply {
            status,
            body: String::new(),
            content_type: None,
        }
    }

    fn method_not_allowed() -> Reply {
        Reply::text(405, "Method not allowed")
    }

    fn not_found() -> Reply {
        Reply::text(404, "Task not found")
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body.into_bytes()).with_status_code(StatusCode(self.status));
        if let Some(content_type) = self.content_type {
            if let Ok(header) = Header::from_bytes("Content-Type", content_type) {
                response = response.with_header(header);
            }
        }
        response
    }
}

/// Dispatch one request. `url` is the raw request target including any query.
pub fn route(store: &TaskStore, method: &Method, url: &str, body: &str) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    match path {
        "/tasks" => Reply::json(200, &store.load()),
        "/add" => handle_add(store, method, body),
        "/update" => handle_update(store, method, body),
        "/delete" => handle_delete(store, method, query),
        _ => Reply::text(200, WELCOME),
    }
}

fn handle_add(store: &TaskStore, method: &Method, body: &str) -> Reply {
    if *method != Method::Post {
        return Reply::method_not_allowed();
    }
    let payload: TaskPayload = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => return Reply::text(400, &e.to_string()),
    };
    let task = store.add(payload.description, payload.status);
    info!(id = task.id, "task added over HTTP");
    Reply::json(201, &task)
}

fn handle_update(store: &TaskStore, method: &Method, body: &str) -> Reply {
    if *method != Method::Post {
        return Reply::method_not_allowed();
    }
    let payload: TaskPayload = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => return Reply::text(400, &e.to_string()),
    };
    match store.replace(payload.into_task()) {
        Some(task) => {
            info!(id = task.id, "task replaced over HTTP");
            Reply::json(200, &task)
        }
        None => Reply::not_found(),
    }
}

fn handle_delete(store: &TaskStore, method: &Method, query: &str) -> Reply {
    if *method != Method::Post {
        return Reply::method_not_allowed();
    }
    let Some(id) = query_param(query, "id").and_then(|raw| raw.parse::<i64>().ok()) else {
        return Reply::text(400, "Invalid task ID");
    };
    match store.delete(id) {
        Some(_) => {
            info!(id, "task deleted over HTTP");
            Reply::empty(204)
        }
        None => Reply::not_found(),
    }
}

/// First value of `key` in a form-encoded query string, percent-decoded.
fn query_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.into_owned())
}

/// A bound but not yet running HTTP front end.
pub struct HttpServer {
    server: Arc<Server>,
    store: Arc<TaskStore>,
}

impl HttpServer {
    /// Bind the listening socket. Port 0 picks a free port.
    pub fn bind(addr: SocketAddr, store: Arc<TaskStore>) -> Result<Self, AppError> {
        let server = Server::http(addr).map_err(|e| AppError::Bind {
            addr,
            reason: e.to_string(),
        })?;
        Ok(HttpServer {
            server: Arc::new(server),
            store,
        })
    }

    /// Address the socket is bound to.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Start serving on a background thread.
    pub fn spawn(self) -> Result<ServerHandle, AppError> {
        let addr = self.local_addr();
        let server = Arc::clone(&self.server);
        let thread = thread::Builder::new()
            .name("http".to_string())
            .spawn(move || self.serve())
            .map_err(AppError::Spawn)?;
        Ok(ServerHandle { server, addr, thread })
    }

    fn serve(self) {
        for request in self.server.incoming_requests() {
            handle_request(&self.store, request);
        }
        debug!("HTTP accept loop stopped");
    }
}

fn handle_request(store: &TaskStore, mut request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = String::new();
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => route(store, &method, &url, &body),
        Err(e) => Reply::text(400, &e.to_string()),
    };
    debug!(%method, %url, status = reply.status, "request handled");

    if let Err(e) = request.respond(reply.into_response()) {
        warn!(%url, "failed to send response: {e}");
    }
}

/// Running HTTP front end.
///
/// Dropping the handle leaves the server running; `shutdown` stops it.
pub struct ServerHandle {
    server: Arc<Server>,
    addr: Option<SocketAddr>,
    thread: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server listens on.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.addr
    }

    /// Stop accepting requests and wait for the accept loop to exit.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn shutdown(self) {
        self.server.unblock();
        if self.thread.join().is_err() {
            warn!("HTTP thread panicked");
        }
    }
}
