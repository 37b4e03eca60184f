//! Reqwest implementation of the remote-API traits.
//!
//! Talks to the task-manager REST backend: JSON bodies, bearer token plus
//! `X-User-Id` identity header on every authenticated request, multipart
//! uploads, raw bytes for downloads. Every non-success response is read and
//! classified into an [`ApiError`]; no reqwest error ever escapes as-is.

use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::Serialize;
use taskdeck_core::api::{AttachmentApi, AuthApi, LoginResponse, TaskApi};
use taskdeck_core::error::Result;
use taskdeck_core::{ApiError, Attachment, Credentials, FileUpload, Task};

/// HTTP client for the task-manager backend.
///
/// Implements [`AuthApi`], [`TaskApi`] and [`AttachmentApi`] against the
/// REST interface. Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    config: ApiConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username_or_email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskRequest<'a> {
    title: &'a str,
    description: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetCompletedRequest<'a> {
    is_completed: bool,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttachRequest<'a> {
    task_id: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetachRequest<'a> {
    user_id: &'a str,
}

impl HttpApiClient {
    /// Creates a client with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a client configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Attaches the bearer token, the user-identity header and the request
    /// timeout. Reads one credentials snapshot, so token and user id always
    /// belong together.
    fn authed(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request
            .bearer_auth(&credentials.token)
            .header("X-User-Id", &credentials.user_id)
            .timeout(self.config.request_timeout)
    }

    /// Passes a successful response through, classifies everything else.
    async fn check(&self, response: Response, fallback: &str) -> Result<Response> {
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = self.classify(status, &body, fallback);
        tracing::warn!("[HttpApiClient] Request failed ({}): {}", status, error);
        Err(error)
    }

    fn classify(&self, status: u16, body: &str, fallback: &str) -> ApiError {
        let message = extract_message(body, fallback);
        match status {
            401 | 403 => ApiError::Auth { status, message },
            404 => ApiError::NotFound(message),
            413 => ApiError::PayloadTooLarge(format!(
                "File too large. Maximum allowed size is {}MB.",
                self.config.upload_limit_mb
            )),
            _ => ApiError::Server { status, message },
        }
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
        fallback: &str,
    ) -> Result<T> {
        response.json().await.map_err(|e| {
            tracing::warn!("[HttpApiClient] Unparseable response body: {}", e);
            ApiError::server(500, fallback)
        })
    }

    fn multipart_form(&self, file: &FileUpload) -> Result<multipart::Form> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                ApiError::validation(format!(
                    "Invalid content type '{}': {}",
                    file.content_type, e
                ))
            })?;
        Ok(multipart::Form::new().part("file", part))
    }
}

/// Converts a reqwest send error into the transport variant. Used only when
/// no response was received.
fn transport(error: reqwest::Error) -> ApiError {
    ApiError::transport(error.to_string())
}

/// Pulls a human-readable message out of an error response body.
///
/// Tries a structured `{code, msg}` / `{message}` JSON body first, then the
/// raw text, then the per-operation fallback.
fn extract_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => return s,
            serde_json::Value::Object(map) => {
                for key in ["msg", "message"] {
                    if let Some(serde_json::Value::String(s)) = map.get(key) {
                        if !s.trim().is_empty() {
                            return s.clone();
                        }
                    }
                }
            }
            _ => {}
        }
    } else if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    fallback.to_string()
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, username_or_email: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest {
                username_or_email,
                password,
            })
            .timeout(self.config.request_timeout);

        let response = request.send().await.map_err(transport)?;
        let response = self.check(response, "Login failed.").await?;
        self.parse_json(response, "Login failed.").await
    }

    async fn current_user(&self, token: &str) -> Result<LoginResponse> {
        let request = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .timeout(self.config.request_timeout);

        let response = request.send().await.map_err(transport)?;
        let response = self.check(response, "Failed to restore session.").await?;
        self.parse_json(response, "Failed to restore session.").await
    }

    async fn logout(&self, credentials: &Credentials) -> Result<()> {
        let request = self.authed(self.client.post(self.url("/auth/logout")), credentials);
        let response = request.send().await.map_err(transport)?;
        self.check(response, "Logout failed.").await?;
        Ok(())
    }
}

#[async_trait]
impl TaskApi for HttpApiClient {
    async fn list(&self, credentials: &Credentials) -> Result<Vec<Task>> {
        let request = self.authed(
            self.client
                .get(self.url("/tasks"))
                .query(&[("userId", credentials.user_id.as_str())]),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        let response = self.check(response, "Failed to fetch tasks.").await?;
        self.parse_json(response, "Failed to fetch tasks.").await
    }

    async fn create(
        &self,
        credentials: &Credentials,
        title: &str,
        description: &str,
    ) -> Result<Task> {
        let request = self.authed(
            self.client.post(self.url("/tasks")).json(&CreateTaskRequest {
                title,
                description,
                user_id: &credentials.user_id,
            }),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        let response = self.check(response, "Failed to create task.").await?;
        self.parse_json(response, "Failed to create task.").await
    }

    async fn set_completed(
        &self,
        credentials: &Credentials,
        task_id: &str,
        completed: bool,
    ) -> Result<()> {
        let request = self.authed(
            self.client
                .patch(self.url(&format!("/tasks/{}", task_id)))
                .json(&SetCompletedRequest {
                    is_completed: completed,
                    user_id: &credentials.user_id,
                }),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        self.check(response, "Failed to update task.").await?;
        Ok(())
    }

    async fn delete(&self, credentials: &Credentials, task_id: &str) -> Result<()> {
        let request = self.authed(
            self.client
                .delete(self.url(&format!("/tasks/{}", task_id)))
                .query(&[("userId", credentials.user_id.as_str())]),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        self.check(response, "Failed to delete task.").await?;
        Ok(())
    }
}

#[async_trait]
impl AttachmentApi for HttpApiClient {
    async fn list_for_user(&self, credentials: &Credentials) -> Result<Vec<Attachment>> {
        let request = self.authed(
            self.client
                .get(self.url("/attachments"))
                .query(&[("userId", credentials.user_id.as_str())]),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        let response = self
            .check(response, "Failed to get user attachments.")
            .await?;
        self.parse_json(response, "Failed to get user attachments.")
            .await
    }

    async fn list_for_task(
        &self,
        credentials: &Credentials,
        task_id: &str,
    ) -> Result<Vec<Attachment>> {
        let request = self.authed(
            self.client
                .get(self.url(&format!("/tasks/{}/attachments", task_id)))
                .query(&[("userId", credentials.user_id.as_str())]),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        let response = self
            .check(response, "Failed to get task attachments.")
            .await?;
        self.parse_json(response, "Failed to get task attachments.")
            .await
    }

    async fn upload(&self, credentials: &Credentials, file: &FileUpload) -> Result<Attachment> {
        tracing::debug!(
            "[HttpApiClient] Uploading '{}' ({} bytes)",
            file.filename,
            file.bytes.len()
        );
        let form = self.multipart_form(file)?;
        let request = self.authed(
            self.client
                .post(self.url(&format!("/attachments/{}", credentials.user_id)))
                .multipart(form),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        let response = self.check(response, "Failed to upload file.").await?;
        self.parse_json(response, "Failed to upload file.").await
    }

    async fn upload_for_task(
        &self,
        credentials: &Credentials,
        task_id: &str,
        file: &FileUpload,
    ) -> Result<Attachment> {
        tracing::debug!(
            "[HttpApiClient] Uploading '{}' ({} bytes) for task {}",
            file.filename,
            file.bytes.len(),
            task_id
        );
        let form = self.multipart_form(file)?;
        let request = self.authed(
            self.client
                .post(self.url(&format!(
                    "/tasks/{}/attachments/{}",
                    task_id, credentials.user_id
                )))
                .multipart(form),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        let response = self
            .check(response, "Failed to upload file for task.")
            .await?;
        self.parse_json(response, "Failed to upload file for task.")
            .await
    }

    async fn attach(
        &self,
        credentials: &Credentials,
        attachment_id: &str,
        task_id: &str,
    ) -> Result<()> {
        let request = self.authed(
            self.client
                .post(self.url(&format!("/attachments/{}/attach", attachment_id)))
                .json(&AttachRequest {
                    task_id,
                    user_id: &credentials.user_id,
                }),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        self.check(response, "Failed to attach file to task.").await?;
        Ok(())
    }

    async fn detach(&self, credentials: &Credentials, attachment_id: &str) -> Result<()> {
        let request = self.authed(
            self.client
                .post(self.url(&format!("/attachments/{}/detach", attachment_id)))
                .json(&DetachRequest {
                    user_id: &credentials.user_id,
                }),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        self.check(response, "Failed to detach file from task.")
            .await?;
        Ok(())
    }

    async fn download(&self, credentials: &Credentials, attachment_id: &str) -> Result<Vec<u8>> {
        let request = self.authed(
            self.client
                .get(self.url(&format!("/attachments/{}", attachment_id)))
                .query(&[("userId", credentials.user_id.as_str())]),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        let response = self.check(response, "Failed to download file.").await?;
        let bytes = response.bytes().await.map_err(transport)?;
        Ok(bytes.to_vec())
    }

    async fn delete(&self, credentials: &Credentials, attachment_id: &str) -> Result<()> {
        let request = self.authed(
            self.client
                .delete(self.url(&format!("/attachments/{}", attachment_id)))
                .query(&[("userId", credentials.user_id.as_str())]),
            credentials,
        );

        let response = request.send().await.map_err(transport)?;
        self.check(response, "Failed to delete attachment.").await?;
        Ok(())
    }
}
