//! Integration tests for the Docker client; these require a running daemon

use dockpick::core::ContainerStatus;
use dockpick::docker::{ContainerEngine, DockerClient, DockerGateway};
use dockpick::config::Config;

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn test_docker_connection() {
    let client = DockerClient::connect(None).await.unwrap();
    assert!(client.ping().await.is_ok());
    assert_ne!(client.connection_info().api_version, "");
}

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn test_running_only_listing_is_subset() {
    let client = DockerClient::connect(None).await.unwrap();
    let all = client.list_containers(true).await.unwrap();
    let running = client.list_containers(false).await.unwrap();

    assert!(running.len() <= all.len());
    assert!(running
        .iter()
        .all(|c| c.status == ContainerStatus::Running));
}

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn test_inspect_unknown_container_fails() {
    let client = DockerClient::connect(None).await.unwrap();
    let gateway = DockerGateway::new(client, "docker".into(), &Config::default());

    assert!(gateway.inspect("dockpick-does-not-exist").await.is_err());
    let result = gateway.start("dockpick-does-not-exist").await;
    assert!(!result.succeeded);
    assert!(result.message.starts_with("Start failed"));
}
