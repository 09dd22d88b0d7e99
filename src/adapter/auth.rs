//! HTTP client for the bistro auth backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ConfigError, Error, Result};
use crate::port::auth::{AuthService, AuthSession};

/// Body for `POST /signup`.
#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Body for `POST /login`.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Success and error responses both carry a message.
#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    message: String,
}

/// Auth service client over HTTP.
pub struct HttpAuthClient {
    client: Client,
    base_url: Url,
}

impl HttpAuthClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
            field: "auth.base_url",
            reason: e.to_string(),
        })?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl AuthService for HttpAuthClient {
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<String> {
        let url = self.endpoint("signup")?;
        debug!(url = %url, "signing up");

        let response = self
            .client
            .post(url)
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await?;

        if response.status().is_success() {
            let body: MessageResponse = response.json().await?;
            info!(email = %email, "signup succeeded");
            Ok(body.message)
        } else {
            let body: MessageResponse = response.json().await.unwrap_or(MessageResponse {
                message: "signup failed".to_string(),
            });
            Err(Error::Auth {
                message: body.message,
            })
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = self.endpoint("login")?;
        debug!(url = %url, "logging in");

        let response = self
            .client
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if response.status().is_success() {
            let body: LoginResponse = response.json().await?;
            info!(email = %email, "login succeeded");
            Ok(AuthSession {
                token: body.token,
                message: body.message,
            })
        } else {
            let body: MessageResponse = response.json().await.unwrap_or(MessageResponse {
                message: "login failed".to_string(),
            });
            Err(Error::Auth {
                message: body.message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(HttpAuthClient::new("not a url").is_err());
    }

    #[test]
    fn endpoints_join_onto_base() {
        let client = HttpAuthClient::new("http://localhost:5000").unwrap();
        assert_eq!(
            client.endpoint("signup").unwrap().as_str(),
            "http://localhost:5000/signup"
        );
    }
}
