pub mod archive;
pub mod client;
pub mod containers;
pub mod exec;
pub mod gateway;
pub mod inspect;
pub mod logs;

pub use client::DockerClient;
pub use exec::{CliExec, ExecRunner, ShellCheck};
pub use gateway::{ContainerEngine, DockerGateway};
pub use logs::LogStream;

#[cfg(test)]
pub use gateway::MockContainerEngine;
