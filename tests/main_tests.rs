mod common;

use std::time::Duration;

use fundingportal::config::Config;
use fundingportal::service::CatalogService;
use fundingportal::{create_app, AppState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

#[tokio::test]
async fn test_main_server_startup() {
    common::setup_tracing();

    let db = common::setup_db().await;
    let app = create_app(AppState::new(CatalogService::new(db), Config::default()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tracing::info!("Test server running on http://{}", addr);

    let server_task: JoinHandle<()> = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let response = timeout(Duration::from_secs(5), async {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    })
    .await
    .expect("server did not answer in time");

    server_task.abort();

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("Service is healthy"), "{response}");
}
