use crate::integration::init_tracing;
use crate::utils::{SIGNAL_TIMEOUT_MS, SILENCE_MS, TestClient, TestServer, answer, offer};

#[tokio::test]
async fn test_offer_answer_round_trip() {
    init_tracing();
    let server = TestServer::spawn().await.expect("Failed to start server");

    let mut alice = TestClient::connect(&server.ws_url(), "A").await.unwrap();
    let mut bob = TestClient::connect(&server.ws_url(), "B").await.unwrap();
    alice.join("r1").await.unwrap();
    bob.join("r1").await.unwrap();
    server.wait_for_members("r1", 2).await.unwrap();

    alice.signal(offer("r1", "A", "v=0 offer")).await.unwrap();
    let received = bob.recv_signal(SIGNAL_TIMEOUT_MS).await.unwrap();
    assert_eq!(received, offer("r1", "A", "v=0 offer"));

    bob.signal(answer("r1", "B", "v=0 answer")).await.unwrap();
    let received = alice.recv_signal(SIGNAL_TIMEOUT_MS).await.unwrap();
    assert_eq!(received, answer("r1", "B", "v=0 answer"));

    // Neither side hears its own message.
    alice.expect_silence(SILENCE_MS).await.unwrap();
    bob.expect_silence(SILENCE_MS).await.unwrap();
}
