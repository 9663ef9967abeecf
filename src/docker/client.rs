use std::sync::Arc;

use bollard::{Docker, API_DEFAULT_VERSION};
use tracing::{debug, info};

use crate::core::{ConnectionInfo, DockerError, Result};

/// Seconds bollard waits on a single request
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// How an explicit `--host` value is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Unix,
    Http,
}

impl Transport {
    /// `unix://` is a local socket; `tcp://`, `http://` and bare `host:port` are HTTP
    fn for_host(host: &str) -> Result<Self> {
        match host.split_once("://").map(|(scheme, _)| scheme) {
            Some("unix") => Ok(Transport::Unix),
            Some("tcp") | Some("http") | None => Ok(Transport::Http),
            Some(other) => Err(DockerError::Connection(format!(
                "Unsupported Docker host scheme '{}://' in {}",
                other, host
            ))
            .into()),
        }
    }
}

/// Handle on one Docker daemon, verified by a version handshake
#[derive(Clone)]
pub struct DockerClient {
    inner: Arc<Docker>,
    connection_info: ConnectionInfo,
}

impl DockerClient {
    /// Connect to `host`, or to whatever DOCKER_HOST and the platform default name
    pub async fn connect(host: Option<&str>) -> Result<Self> {
        let docker = match host {
            None => {
                info!("Connecting to Docker using local defaults");
                Docker::connect_with_local_defaults()
                    .map_err(|e| DockerError::Connection(e.to_string()))?
            }
            Some(host) => {
                info!("Connecting to Docker at {}", host);
                Self::open(host)?
            }
        };

        Self::handshake(docker).await
    }

    fn open(host: &str) -> Result<Docker> {
        let docker = match Transport::for_host(host)? {
            #[cfg(unix)]
            Transport::Unix => {
                Docker::connect_with_unix(host, REQUEST_TIMEOUT_SECS, API_DEFAULT_VERSION)
            }
            #[cfg(not(unix))]
            Transport::Unix => {
                return Err(DockerError::Connection(format!(
                    "Unix sockets are not available on this platform: {}",
                    host
                ))
                .into())
            }
            Transport::Http => {
                Docker::connect_with_http(host, REQUEST_TIMEOUT_SECS, API_DEFAULT_VERSION)
            }
        };
        docker.map_err(|e| DockerError::Connection(e.to_string()).into())
    }

    /// Ask the daemon for its version; fails when nothing answers
    async fn handshake(docker: Docker) -> Result<Self> {
        debug!("Fetching Docker version information");

        let version = docker
            .version()
            .await
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        let unknown = || "unknown".to_string();
        let info = ConnectionInfo {
            version: version.version.unwrap_or_else(unknown),
            api_version: version.api_version.unwrap_or_else(unknown),
            os: version.os.unwrap_or_else(unknown),
            arch: version.arch.unwrap_or_else(unknown),
        };

        info!(
            "Docker daemon {} (API: {}) on {}/{}",
            info.version, info.api_version, info.os, info.arch
        );

        Ok(Self {
            inner: Arc::new(docker),
            connection_info: info,
        })
    }

    /// Wrap a client without contacting the daemon
    #[cfg(test)]
    pub(crate) fn unverified(docker: Docker) -> Self {
        Self {
            inner: Arc::new(docker),
            connection_info: ConnectionInfo::default(),
        }
    }

    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.connection_info
    }

    pub async fn ping(&self) -> Result<String> {
        debug!("Pinging Docker daemon");

        let response = self
            .inner
            .ping()
            .await
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        Ok(response)
    }

    pub fn inner(&self) -> &Docker {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DockPickError;

    #[test]
    fn test_transport_follows_scheme() {
        assert_eq!(
            Transport::for_host("unix:///var/run/docker.sock").unwrap(),
            Transport::Unix
        );
        assert_eq!(
            Transport::for_host("tcp://10.0.0.2:2375").unwrap(),
            Transport::Http
        );
        assert_eq!(
            Transport::for_host("http://localhost:2375").unwrap(),
            Transport::Http
        );
        assert_eq!(Transport::for_host("localhost:2375").unwrap(), Transport::Http);
    }

    #[test]
    fn test_unknown_scheme_is_connection_error() {
        match Transport::for_host("ssh://builder") {
            Err(DockPickError::Docker(DockerError::Connection(msg))) => {
                assert!(msg.contains("ssh://"));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unanswered_host_fails_handshake() {
        let err = DockerClient::connect(Some("tcp://127.0.0.1:1")).await.err().unwrap();
        assert!(matches!(err, DockPickError::Docker(DockerError::Connection(_))));
    }

    // These tests require Docker to be running

    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_local_defaults() {
        let client = DockerClient::connect(None).await.unwrap();
        assert!(!client.connection_info().version.is_empty());
        assert!(client.ping().await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_explicit_unix_socket() {
        let client = DockerClient::connect(Some("unix:///var/run/docker.sock"))
            .await
            .unwrap();
        assert!(client.ping().await.is_ok());
    }
}
