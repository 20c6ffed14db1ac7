use std::{
    env,
    path::{Path, PathBuf},
};

use tokio::fs;

use super::error::{ClientError, ClientResult};
use crate::dto::AuthResponse;
use crate::models::user::UserProfile;

/// The signed-in user and bearer token, persisted between runs.
///
/// `init` loads whatever a previous run stored, `sign_in` replaces it and
/// `teardown` forgets it on disk and in memory.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    current: Option<AuthResponse>,
}

impl Session {
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("MOODTRACK_SESSION_PATH") {
            return PathBuf::from(path);
        }

        let base = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        base.join(".moodtrack").join("session.json")
    }

    pub async fn init(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let current = match fs::read(&path).await {
            Ok(bytes) => Some(serde_json::from_slice::<AuthResponse>(&bytes).map_err(
                |source| ClientError::SessionFormat {
                    path: path.clone(),
                    source,
                },
            )?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => return Err(ClientError::SessionIo { path, source }),
        };

        tracing::debug!(path = %path.display(), signed_in = current.is_some(), "Session loaded");
        Ok(Self { path, current })
    }

    pub async fn sign_in(&mut self, auth: AuthResponse) -> ClientResult<()> {
        let io_err = |source| ClientError::SessionIo {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await.map_err(io_err)?;
        }

        let payload = serde_json::to_vec_pretty(&auth).map_err(|source| ClientError::SessionFormat {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, payload).await.map_err(io_err)?;
        restrict_permissions(&self.path).await.map_err(io_err)?;

        self.current = Some(auth);
        Ok(())
    }

    pub async fn teardown(&mut self) -> ClientResult<()> {
        self.current = None;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ClientError::SessionIo {
                path: self.path.clone(),
                source,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|auth| auth.token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.current.as_ref().map(|auth| &auth.user)
    }

    pub fn require_token(&self) -> ClientResult<&str> {
        self.token().ok_or(ClientError::NotSignedIn)
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
