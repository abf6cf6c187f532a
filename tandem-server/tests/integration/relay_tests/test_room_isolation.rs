use crate::integration::init_tracing;
use crate::utils::{SIGNAL_TIMEOUT_MS, SILENCE_MS, TestClient, TestServer, ice, offer};

#[tokio::test]
async fn test_room_isolation() {
    init_tracing();
    let server = TestServer::spawn().await.expect("Failed to start server");

    let mut a = TestClient::connect(&server.ws_url(), "A").await.unwrap();
    let mut b = TestClient::connect(&server.ws_url(), "B").await.unwrap();
    let mut x = TestClient::connect(&server.ws_url(), "X").await.unwrap();
    let mut y = TestClient::connect(&server.ws_url(), "Y").await.unwrap();

    a.join("r1").await.unwrap();
    b.join("r1").await.unwrap();
    x.join("r2").await.unwrap();
    y.join("r2").await.unwrap();
    server.wait_for_members("r1", 2).await.unwrap();
    server.wait_for_members("r2", 2).await.unwrap();

    a.signal(offer("r1", "A", "v=0 r1")).await.unwrap();
    x.signal(ice("r2", "X", 1)).await.unwrap();

    assert_eq!(b.recv_signal(SIGNAL_TIMEOUT_MS).await.unwrap(), offer("r1", "A", "v=0 r1"));
    assert_eq!(y.recv_signal(SIGNAL_TIMEOUT_MS).await.unwrap(), ice("r2", "X", 1));

    b.expect_silence(SILENCE_MS).await.unwrap();
    y.expect_silence(SILENCE_MS).await.unwrap();
    a.expect_silence(SILENCE_MS).await.unwrap();
    x.expect_silence(SILENCE_MS).await.unwrap();
}
