use super::*;
use std::sync::Arc;
use wren_core::WorkflowId;

#[tokio::test]
async fn send_roundtrips_a_request_over_a_real_socket() {
    // Bind on an ephemeral port by listening manually so we know the address.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let server = TcpTransport::new(addr.clone());
    server
        .serve(Arc::new(|req| {
            Box::pin(async move {
                match req {
                    Request::GetStatus { .. } => {
                        Response::GetStatus { found: true, status: Some("Completed".to_string()) }
                    }
                    _ => Response::GetStatus { found: false, status: None },
                }
            })
        }))
        .await
        .unwrap();

    // Give the listener task a tick to start accepting.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let client = TcpTransport::new("client:unused");
    let response = client
        .send(&addr, Request::GetStatus { workflow_id: WorkflowId::from("wf-1") })
        .await
        .unwrap();

    assert_eq!(response, Response::GetStatus { found: true, status: Some("Completed".to_string()) });
}

#[tokio::test]
async fn send_to_an_unreachable_address_fails() {
    let client = TcpTransport::new("client:unused");
    let result = client
        .send("127.0.0.1:1", Request::GetStatus { workflow_id: WorkflowId::from("wf-1") })
        .await;
    assert!(result.is_err());
}
