//! Remote user-directory client.
//!
//! The storefront delegates identity persistence to an external
//! json-server style REST endpoint:
//!
//! - `GET /users?email=&password=` - login lookup
//! - `GET /users?email=` - signup duplicate check
//! - `POST /users` - create a user record
//! - `PATCH /users/{id}` - replace mutable fields of a user record
//!
//! A 2xx response body is the created/updated resource or an array of
//! matches; anything else is a failure. No retry, no offline queue, no
//! request timeout - a hung request hangs the calling flow, exactly as
//! the original design (flagged, not fixed).

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::models::User;

/// Errors that can occur when talking to the user-directory endpoint.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The HTTP request itself failed (offline, DNS, refused connection).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// The response body did not parse as the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Identity lookup and mutation operations.
///
/// The session store is generic over this trait so tests can substitute
/// an in-memory directory for the HTTP client.
pub trait UserDirectory {
    /// Find users matching both email and password (login lookup).
    fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Vec<User>, DirectoryError>> + Send;

    /// Find users with the given email (signup duplicate check).
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Vec<User>, DirectoryError>> + Send;

    /// Create a user record; returns the stored record.
    fn create(&self, user: &User) -> impl Future<Output = Result<User, DirectoryError>> + Send;

    /// Replace the mutable fields of a user record (full-record PATCH);
    /// returns the stored record.
    fn update(&self, user: &User) -> impl Future<Output = Result<User, DirectoryError>> + Send;
}

impl<D: UserDirectory + Send + Sync> UserDirectory for std::sync::Arc<D> {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<User>, DirectoryError> {
        (**self).find_by_credentials(email, password).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, DirectoryError> {
        (**self).find_by_email(email).await
    }

    async fn create(&self, user: &User) -> Result<User, DirectoryError> {
        (**self).create(user).await
    }

    async fn update(&self, user: &User) -> Result<User, DirectoryError> {
        (**self).update(user).await
    }
}

/// HTTP implementation of [`UserDirectory`].
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: Url,
}

/// PATCH body for address/profile replacement. json-server merges the
/// given fields into the stored record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserPatchBody<'a> {
    name: &'a str,
    avatar: &'a str,
    shipping_addresses: &'a [crate::models::Address],
    phone: &'a Option<String>,
}

impl HttpUserDirectory {
    /// Create a client for the directory at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn users_url(&self) -> String {
        format!("{}users", ensure_trailing_slash(&self.base_url))
    }

    async fn fetch_users(&self, url: &str) -> Result<Vec<User>, DirectoryError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))
    }
}

fn ensure_trailing_slash(url: &Url) -> String {
    let s = url.to_string();
    if s.ends_with('/') { s } else { format!("{s}/") }
}

impl UserDirectory for HttpUserDirectory {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<User>, DirectoryError> {
        let url = format!(
            "{}?email={}&password={}",
            self.users_url(),
            urlencoding::encode(email),
            urlencoding::encode(password)
        );
        self.fetch_users(&url).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, DirectoryError> {
        let url = format!("{}?email={}", self.users_url(), urlencoding::encode(email));
        self.fetch_users(&url).await
    }

    async fn create(&self, user: &User) -> Result<User, DirectoryError> {
        let response = self
            .client
            .post(self.users_url())
            .json(user)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))
    }

    async fn update(&self, user: &User) -> Result<User, DirectoryError> {
        let url = format!("{}/{}", self.users_url(), user.id);
        let body = UserPatchBody {
            name: &user.name,
            avatar: &user.avatar,
            shipping_addresses: &user.shipping_addresses,
            phone: &user.phone,
        };

        let response = self.client.patch(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))
    }
}
