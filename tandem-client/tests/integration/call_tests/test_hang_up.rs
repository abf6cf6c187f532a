use crate::integration::init_tracing;
use crate::utils::{EVENT_TIMEOUT_MS, PeerCall, TestCall, eventually};
use std::time::Duration;
use tandem_client::SessionState;

#[tokio::test]
async fn test_hang_up_closes_call() {
    init_tracing();
    let mut alice = TestCall::spawn("A");
    alice.handle.start_camera();
    assert!(eventually(EVENT_TIMEOUT_MS, || alice.devices.latest("camera").is_some()).await);
    alice.handle.start_call();
    alice.next_outbound(EVENT_TIMEOUT_MS).await.unwrap();

    alice.handle.hang_up();
    alice.handle.hang_up();

    let closed = alice
        .handle
        .wait_for_state(|s| *s == SessionState::Closed)
        .await;
    assert_eq!(closed, Some(SessionState::Closed));
    tokio::time::timeout(Duration::from_millis(EVENT_TIMEOUT_MS), &mut alice.task)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(alice.peer.count(|c| *c == PeerCall::Close), 1);
    assert!(alice.devices.issued().iter().all(|t| !t.is_live()));
}

#[tokio::test]
async fn test_late_remote_message_after_hang_up() {
    let mut alice = TestCall::spawn("A");
    alice.handle.hang_up();
    assert!(
        alice
            .handle
            .wait_for_state(|s| *s == SessionState::Closed)
            .await
            .is_some()
    );

    alice
        .handle
        .deliver(crate::utils::remote_offer("too late"));
    assert!(alice.next_outbound(200).await.is_none());
    assert_eq!(alice.peer.calls(), vec![PeerCall::Close]);
}
