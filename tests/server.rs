//! Round trips over a real socket.

use std::net::SocketAddr;
use std::sync::Arc;

use devcamper::{AppContext, Config, Server, routes};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

async fn spawn_server() -> (SocketAddr, oneshot::Sender<()>, JoinHandle<devcamper::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Config::default();
    let app = routes::app(&config);
    let context = Arc::new(AppContext::new(config));
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(Server::listen(listener).serve_with_shutdown(app, context, async move {
        let _ = rx.await;
    }));
    (addr, tx, handle)
}

async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

fn get(path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n")
}

#[tokio::test]
async fn serves_bootcamp_routes() {
    let (addr, shutdown, handle) = spawn_server().await;

    let res = raw_request(addr, &get("/api/v1/bootcamps/42")).await;
    assert!(res.starts_with("HTTP/1.1 200 OK\r\n"), "{res}");
    assert!(res.contains("content-type: application/json"), "{res}");
    assert!(res.ends_with(r#"{"success":true,"message":"Show bootcamp 42"}"#), "{res}");

    let res = raw_request(addr, &get("/")).await;
    assert!(res.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{res}");
    assert!(res.ends_with(r#"{"success":false}"#), "{res}");

    let res = raw_request(addr, &get("/api/v1/unknown")).await;
    assert!(res.starts_with("HTTP/1.1 404 Not Found\r\n"), "{res}");

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn post_with_body_is_accepted() {
    let (addr, shutdown, handle) = spawn_server().await;

    let body = r#"{"name":"Devworks Bootcamp"}"#;
    let req = format!(
        "POST /api/v1/bootcamps HTTP/1.1\r\nhost: localhost\r\ncontent-type: application/json\r\n\
         content-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let res = raw_request(addr, &req).await;
    assert!(res.starts_with("HTTP/1.1 200 OK\r\n"), "{res}");
    assert!(res.ends_with(r#"{"success":true,"message":"Create new bootcamp"}"#), "{res}");

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn stops_accepting_after_shutdown() {
    let (addr, shutdown, handle) = spawn_server().await;

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
