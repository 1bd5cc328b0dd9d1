//! Startup orchestration: serving alongside the database bootstrap.

use std::time::Duration;

use devcamper::{Config, Error, startup};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn local_listener() -> TcpListener {
    TcpListener::bind("127.0.0.1:0").await.unwrap()
}

#[tokio::test]
async fn rejected_database_stops_the_server() {
    let listener = local_listener().await;
    let addr = listener.local_addr().unwrap();
    let config = Config {
        database_url: Some("postgres://u:p@127.0.0.1:1/db".into()),
        ..Config::default()
    };

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        startup::run_with_shutdown(config, listener, std::future::pending()),
    )
    .await
    .expect("startup gave up on the database without waiting for a timeout");

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Database(_)), "{err}");
    assert!(TcpStream::connect(addr).await.is_err(), "listener still accepting");
}

#[tokio::test]
async fn runs_without_a_database_until_signalled() {
    let listener = local_listener().await;
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(startup::run_with_shutdown(Config::default(), listener, async move {
        let _ = rx.await;
    }));

    // Accepting while running.
    TcpStream::connect(addr).await.unwrap();

    tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
    assert!(TcpStream::connect(addr).await.is_err());
}
