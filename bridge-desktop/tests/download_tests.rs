//! Streaming download behavior against a local socket server.
//!
//! Media transfers can legitimately take minutes, so the default client
//! must tolerate a body that stalls mid-stream; only a caller-supplied
//! total timeout may abort one.

use bridge_desktop::ReqwestHttpClient;
use bridge_traits::http::HttpClient;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one request with a 20-byte body that stalls for `stall`
/// between the first and second half.
async fn serve_stalled_body(stall: Duration) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 || buf[..n].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 20\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        socket.write_all(&[b'x'; 10]).await.unwrap();
        socket.flush().await.unwrap();

        tokio::time::sleep(stall).await;

        socket.write_all(&[b'y'; 10]).await.unwrap();
        socket.flush().await.unwrap();
    });

    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn test_download_stream_survives_mid_body_stall() {
    let (url, server) = serve_stalled_body(Duration::from_secs(2)).await;

    let client = ReqwestHttpClient::new().unwrap();
    let mut reader = client.download_stream(url).await.unwrap();

    let mut body = Vec::new();
    tokio::io::copy(&mut reader, &mut body).await.unwrap();

    assert_eq!(body.len(), 20);
    assert_eq!(&body[..10], b"xxxxxxxxxx");
    assert_eq!(&body[10..], b"yyyyyyyyyy");

    server.await.unwrap();
}

#[tokio::test]
async fn test_total_timeout_on_custom_client_aborts_streamed_body() {
    let (url, server) = serve_stalled_body(Duration::from_secs(2)).await;

    // A reqwest total timeout spans body consumption, which is exactly
    // why the default client does not set one.
    let client = ReqwestHttpClient::with_client(
        reqwest::Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap(),
    );
    let mut reader = client.download_stream(url).await.unwrap();

    let mut body = Vec::new();
    let result = tokio::io::copy(&mut reader, &mut body).await;

    assert!(result.is_err());
    server.abort();
}
