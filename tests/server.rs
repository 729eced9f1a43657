//! Raw HTTP/1.1 over TCP against a running server.

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use userbase::{app, serve_listener, UserStore, DEFAULT_MAX_BODY_BYTES};

async fn exchange(addr: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(raw.as_bytes()).await.expect("write request");
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.expect("read response");
    String::from_utf8(buf).expect("utf-8 response")
}

#[tokio::test]
async fn serves_requests_and_shuts_down_cleanly() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (stop, stopped) = oneshot::channel::<()>();

    let server = tokio::spawn(serve_listener(
        listener,
        app(Arc::new(UserStore::new())),
        DEFAULT_MAX_BODY_BYTES,
        async move {
            let _ = stopped.await;
        },
    ));

    let body = r#"{"Email":"a@b.com","Name":"Ann"}"#;
    let created = exchange(
        addr,
        &format!(
            "POST /users HTTP/1.1\r\nhost: test\r\nauthorization: t\r\n\
             content-type: application/json\r\ncontent-length: {}\r\n\
             connection: close\r\n\r\n{body}",
            body.len()
        ),
    )
    .await;
    assert!(created.starts_with("HTTP/1.1 201"), "{created}");
    assert!(created.to_ascii_lowercase().contains("location: /users/1"), "{created}");
    assert!(created.ends_with(r#"{"Id":1,"Email":"a@b.com","Name":"Ann"}"#), "{created}");

    let rejected = exchange(
        addr,
        "GET /users HTTP/1.1\r\nhost: test\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(rejected.starts_with("HTTP/1.1 401"), "{rejected}");

    let unknown_method = exchange(
        addr,
        "BREW /users HTTP/1.1\r\nhost: test\r\nauthorization: t\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(unknown_method.starts_with("HTTP/1.1 405"), "{unknown_method}");

    stop.send(()).expect("server still running");
    server.await.expect("server task").expect("clean shutdown");
}
