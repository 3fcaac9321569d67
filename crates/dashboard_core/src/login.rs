//! Email/password login: form validation, the HTTP call, session persistence
//! and the post-login redirect.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{InstrId, LoginId},
    error::{ApiError, ErrorCode},
    protocol::{LoginRequest, LoginResponse},
};
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use crate::{endpoint, Navigator};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(30);
/// Where a user lands when the server does not remember a last visited page.
pub const DEFAULT_LANDING_PAGE: &str = "/dashboard";

#[derive(Debug, Error)]
pub enum LoginError {
    /// The server refused the login; `message` is its `error` string, untouched.
    #[error("{message}")]
    Rejected { code: ErrorCode, message: String },
    #[error("login request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid login endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("failed to persist session: {0}")]
    Session(String),
}

#[async_trait]
pub trait LoginApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, LoginError>;
}

pub struct HttpLoginApi {
    http: Client,
    login_url: Url,
}

impl HttpLoginApi {
    pub fn new(api_base_url: &Url) -> Result<Self, LoginError> {
        Ok(Self {
            http: Client::new(),
            login_url: endpoint(api_base_url, "login")?,
        })
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }
}

#[async_trait]
impl LoginApi for HttpLoginApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, LoginError> {
        let res = self
            .http
            .post(self.login_url.clone())
            .timeout(LOGIN_TIMEOUT)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(res.json().await?);
        }

        let body = res.bytes().await?;
        let message = serde_json::from_slice::<ApiError>(&body)
            .map(|api_error| api_error.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("login failed with status {}", status.as_u16()))
            });
        Err(LoginError::Rejected {
            code: ErrorCode::from_status(status.as_u16()),
            message,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub token: String,
    pub refresh_token: String,
    pub login_id: LoginId,
    pub instr_id: InstrId,
}

pub trait SessionStore: Send + Sync {
    fn save_session(&self, session: &Session) -> anyhow::Result<()>;
    fn save_remember_me(&self, email: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
    remembered_email: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn session(&self) -> Option<Session> {
        self.session.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn remembered_email(&self) -> Option<String> {
        self.remembered_email
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl SessionStore for MemorySessionStore {
    fn save_session(&self, session: &Session) -> anyhow::Result<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| anyhow!("session store poisoned"))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn save_remember_me(&self, email: &str) -> anyhow::Result<()> {
        let mut guard = self
            .remembered_email
            .lock()
            .map_err(|_| anyhow!("session store poisoned"))?;
        *guard = Some(email.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.email.into_iter().chain(self.password).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are checked so every problem is reported at once.
    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let email = self.email.trim();
        let errors = FormErrors {
            email: email.is_empty().then_some("Email is required"),
            password: self.password.is_empty().then_some("Password is required"),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn { session: Session, redirect: String },
    Invalid(FormErrors),
    /// Message to show the user as-is.
    Failed(String),
}

impl LoginOutcome {
    /// Text the login screen shows under the form, if any.
    pub fn error_messages(&self) -> Vec<String> {
        match self {
            Self::LoggedIn { .. } => Vec::new(),
            Self::Invalid(errors) => errors.messages().into_iter().map(str::to_string).collect(),
            Self::Failed(message) => vec![message.clone()],
        }
    }
}

pub struct LoginFlow {
    api: Arc<dyn LoginApi>,
    store: Arc<dyn SessionStore>,
}

impl LoginFlow {
    pub fn new(api: Arc<dyn LoginApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// Validates the form, calls the API, persists the session and redirects.
    /// The navigator is only touched on success.
    pub async fn submit(&self, form: &LoginForm, navigator: &dyn Navigator) -> LoginOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => return LoginOutcome::Invalid(errors),
        };

        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(email = %request.email, error = %err, "login failed");
                return LoginOutcome::Failed(err.to_string());
            }
        };

        let session = Session {
            email: request.email.clone(),
            token: response.token,
            refresh_token: response.refresh_token,
            login_id: response.login_id,
            instr_id: response.instr_id,
        };

        if let Err(err) = self.persist(&session) {
            error!(email = %session.email, error = %err, "failed to persist session");
            return LoginOutcome::Failed(err.to_string());
        }

        let redirect = response
            .last_visited_page
            .filter(|page| !page.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANDING_PAGE.to_string());
        info!(
            login_id = %session.login_id,
            instr_id = %session.instr_id,
            redirect = %redirect,
            "login succeeded"
        );
        navigator.navigate(&redirect);

        LoginOutcome::LoggedIn { session, redirect }
    }

    fn persist(&self, session: &Session) -> Result<(), LoginError> {
        self.store
            .save_session(session)
            .and_then(|_| self.store.save_remember_me(&session.email))
            .map_err(|err| LoginError::Session(format!("{err:#}")))
    }
}

#[cfg(test)]
#[path = "tests/login_tests.rs"]
mod tests;
