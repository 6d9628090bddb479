//! Docker engine client for pull, tag and push
//!
//! Connects to the local Docker daemon via bollard. Pull and push drain the
//! daemon's progress stream synchronously to completion; an unreadable or
//! interrupted stream fails the operation. Progress lines are copied to
//! stdout as they arrive.

use crate::error::{MigrateError, Result};
use crate::output::OutputManager;
use crate::registry::auth::RegistryAuth;
use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::query_parameters::{CreateImageOptions, PushImageOptions, TagImageOptions};
use futures_util::StreamExt;

/// Image operations the orchestrator needs from a registry-capable engine.
///
/// `auth` is the opaque encoded token built by [`RegistryAuth::token`];
/// `None` means anonymous access.
#[async_trait]
pub trait ImageEngine: Send + Sync {
    /// Pull `image` from its registry into local storage.
    async fn pull(&self, image: &str, auth: Option<&str>) -> Result<()>;

    /// Create a local alias `destination` for the already-pulled `source`.
    async fn tag(&self, source: &str, destination: &str) -> Result<()>;

    /// Push the locally tagged `image` to its registry.
    async fn push(&self, image: &str, auth: Option<&str>) -> Result<()>;
}

/// [`ImageEngine`] backed by the local Docker daemon.
#[derive(Clone)]
pub struct DockerEngine {
    docker: Docker,
    output: OutputManager,
}

impl std::fmt::Debug for DockerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerEngine").finish_non_exhaustive()
    }
}

impl DockerEngine {
    /// Connect to the Docker daemon using platform-specific defaults and
    /// verify connectivity with a ping.
    pub async fn connect(output: OutputManager) -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        docker.ping().await?;
        output.verbose("connected to Docker engine");
        Ok(Self { docker, output })
    }
}

/// Split an image reference into repository and tag.
///
/// Digest references (`repo@sha256:...`) are returned whole with no tag.
/// A `:` that belongs to a registry port (`localhost:5000/app`) is not
/// treated as a tag separator.
fn split_reference(image: &str) -> (&str, Option<&str>) {
    if image.contains('@') {
        return (image, None);
    }

    if let Some((repo, tag)) = image.rsplit_once(':') {
        if !tag.contains('/') {
            return (repo, Some(tag));
        }
    }

    (image, None)
}

/// Format one engine progress record the way the stream reports it.
fn render_progress(
    id: Option<&str>,
    status: Option<&str>,
    progress: Option<&str>,
) -> Option<String> {
    let status = status?;
    let mut line = match id {
        Some(id) => format!("{}: {}", id, status),
        None => status.to_string(),
    };
    if let Some(progress) = progress {
        line.push(' ');
        line.push_str(progress);
    }
    Some(line)
}

/// Split a push destination into repository and tag.
///
/// A registry accepts pushes to tags only; a digest reference names
/// immutable content and cannot be pushed to.
fn push_reference(image: &str) -> Result<(&str, &str)> {
    if image.contains('@') {
        return Err(MigrateError::push(
            image,
            "cannot push to a digest reference",
        ));
    }
    let (repo, tag) = split_reference(image);
    Ok((repo, tag.unwrap_or("latest")))
}

/// Decode an opaque auth token back into engine credentials.
fn engine_credentials(auth: Option<&str>) -> Result<Option<DockerCredentials>> {
    auth.map(|token| RegistryAuth::decode(token).map(|a| a.docker_credentials()))
        .transpose()
}

#[async_trait]
impl ImageEngine for DockerEngine {
    async fn pull(&self, image: &str, auth: Option<&str>) -> Result<()> {
        let credentials = engine_credentials(auth)?;

        let (repo, tag) = split_reference(image);
        let options = CreateImageOptions {
            from_image: Some(repo.to_string()),
            tag: if image.contains('@') {
                None
            } else {
                Some(tag.unwrap_or("latest").to_string())
            },
            ..Default::default()
        };

        self.output.verbose(&format!("pulling image {}", image));

        let mut stream = self.docker.create_image(Some(options), None, credentials);
        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| MigrateError::pull(image, e.to_string()))?;
            if let Some(error) = info.error {
                return Err(MigrateError::pull(image, error));
            }
            if let Some(line) =
                render_progress(info.id.as_deref(), info.status.as_deref(), info.progress.as_deref())
            {
                self.output.stream_line(&line);
            }
        }

        Ok(())
    }

    async fn tag(&self, source: &str, destination: &str) -> Result<()> {
        let (repo, tag) = split_reference(destination);
        let options = TagImageOptions {
            repo: Some(repo.to_string()),
            tag: Some(tag.unwrap_or("latest").to_string()),
            ..Default::default()
        };

        self.output.verbose(&format!("tagging {} as {}", source, destination));

        self.docker
            .tag_image(source, Some(options))
            .await
            .map_err(|e| MigrateError::tag(source, destination, e.to_string()))
    }

    async fn push(&self, image: &str, auth: Option<&str>) -> Result<()> {
        let credentials = engine_credentials(auth)?;

        let (repo, tag) = push_reference(image)?;
        let options = PushImageOptions {
            tag: Some(tag.to_string()),
            ..Default::default()
        };

        self.output.verbose(&format!("pushing image {}", image));

        let mut stream = self.docker.push_image(repo, Some(options), credentials);
        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| MigrateError::push(image, e.to_string()))?;
            if let Some(error) = info.error {
                return Err(MigrateError::push(image, error));
            }
            if let Some(line) =
                render_progress(None, info.status.as_deref(), info.progress.as_deref())
            {
                self.output.stream_line(&line);
            }
        }

        Ok(())
    }
}
