use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::model::config::SyncConfig;
use crate::model::note::Note;

/// Error type for remote store operations
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("sync is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote returned {status} for {url}")]
    Status { status: StatusCode, url: String },
}

/// A per-user remote document collection.
///
/// One document per note; the engine never partially updates a document.
/// Abstracted as a trait so the sync engine tests run against an
/// in-memory fake.
pub trait RemoteStore {
    /// Fetch every note document in the user's collection.
    fn fetch_all(&self) -> Result<Vec<Note>, RemoteError>;
    /// Create or replace one note document.
    fn upsert(&self, note: &Note) -> Result<(), RemoteError>;
    /// Delete one note document. Deleting an absent document succeeds.
    fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

/// HTTP implementation of [`RemoteStore`].
pub struct HttpRemote {
    client: Client,
    base_url: String,
    user: String,
    token: String,
}

impl HttpRemote {
    /// Build a client from the `[sync]` config section.
    pub fn from_config(config: &SyncConfig) -> Result<HttpRemote, RemoteError> {
        if config.url.is_empty() {
            return Err(RemoteError::NotConfigured("sync.url is empty"));
        }
        if config.user.is_empty() {
            return Err(RemoteError::NotConfigured("sync.user is empty"));
        }
        Ok(HttpRemote {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            token: config.token.clone(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/users/{}/notes", self.base_url, self.user)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Status {
                status,
                url: response.url().to_string(),
            })
        }
    }
}

impl RemoteStore for HttpRemote {
    fn fetch_all(&self) -> Result<Vec<Note>, RemoteError> {
        let url = self.collection_url();
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()?;
        let notes: Vec<Note> = Self::check(response)?.json()?;
        Ok(notes)
    }

    fn upsert(&self, note: &Note) -> Result<(), RemoteError> {
        let url = self.document_url(&note.id);
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(note)
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let url = self.document_url(id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()?;
        let status = response.status();
        // A tombstone for a document that never made it remote is fine
        if status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, user: &str) -> SyncConfig {
        SyncConfig {
            enabled: true,
            url: url.to_string(),
            user: user.to_string(),
            token: "tok".to_string(),
            interval_secs: 300,
        }
    }

    #[test]
    fn from_config_requires_url_and_user() {
        assert!(matches!(
            HttpRemote::from_config(&config("", "u1")),
            Err(RemoteError::NotConfigured(_))
        ));
        assert!(matches!(
            HttpRemote::from_config(&config("https://x.test", "")),
            Err(RemoteError::NotConfigured(_))
        ));
        assert!(HttpRemote::from_config(&config("https://x.test", "u1")).is_ok());
    }

    #[test]
    fn urls_are_per_user_documents() {
        let remote = HttpRemote::from_config(&config("https://notes.example.com/", "u-42")).unwrap();
        assert_eq!(
            remote.collection_url(),
            "https://notes.example.com/users/u-42/notes"
        );
        assert_eq!(
            remote.document_url("n-1"),
            "https://notes.example.com/users/u-42/notes/n-1"
        );
    }
}
