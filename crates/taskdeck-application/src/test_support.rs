//! Shared mock API implementations for store tests.
//!
//! Each mock counts the requests it receives so tests can assert that a
//! short-circuited operation never reached the network, and each can be
//! scripted to fail with a specific classified error.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use taskdeck_core::api::{AttachmentApi, AuthApi, LoginResponse, TaskApi};
use taskdeck_core::error::Result;
use taskdeck_core::{ApiError, Attachment, Credentials, FileUpload, Task};

pub fn sample_task(id: &str, title: &str) -> Task {
    let now = chrono::Utc::now();
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        is_completed: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_attachment(id: &str, filename: &str, task_id: Option<&str>) -> Attachment {
    let now = chrono::Utc::now();
    Attachment {
        id: id.to_string(),
        filename: filename.to_string(),
        content_type: "text/plain".to_string(),
        created_at: now,
        updated_at: now,
        task_id: task_id.map(str::to_string),
    }
}

#[derive(Default)]
pub struct MockAuthApi {
    pub fail_login: bool,
    pub fail_logout: bool,
    pub logout_calls: AtomicUsize,
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _username_or_email: &str, _password: &str) -> Result<LoginResponse> {
        if self.fail_login {
            return Err(ApiError::Auth {
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }
        Ok(LoginResponse {
            token: "tok-1".to_string(),
            user_id: "u-1".to_string(),
        })
    }

    async fn current_user(&self, token: &str) -> Result<LoginResponse> {
        if self.fail_login {
            return Err(ApiError::Auth {
                status: 401,
                message: "Invalid token".to_string(),
            });
        }
        Ok(LoginResponse {
            token: token.to_string(),
            user_id: "u-1".to_string(),
        })
    }

    async fn logout(&self, _credentials: &Credentials) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout {
            return Err(ApiError::transport("connection refused"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTaskApi {
    pub calls: AtomicUsize,
    pub fail_with: Mutex<Option<ApiError>>,
    pub list_response: Mutex<Vec<Task>>,
    created: AtomicUsize,
}

impl MockTaskApi {
    pub fn failing_with(error: ApiError) -> Self {
        Self {
            fail_with: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn scripted_failure(&self) -> Option<ApiError> {
        self.fail_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskApi for MockTaskApi {
    async fn list(&self, _credentials: &Credentials) -> Result<Vec<Task>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failure() {
            return Err(error);
        }
        Ok(self.list_response.lock().unwrap().clone())
    }

    async fn create(
        &self,
        _credentials: &Credentials,
        title: &str,
        description: &str,
    ) -> Result<Task> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failure() {
            return Err(error);
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        let mut task = sample_task(&format!("t-{}", n), title);
        task.description = description.to_string();
        Ok(task)
    }

    async fn set_completed(
        &self,
        _credentials: &Credentials,
        _task_id: &str,
        _completed: bool,
    ) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn delete(&self, _credentials: &Credentials, _task_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MockAttachmentApi {
    pub calls: AtomicUsize,
    pub fail_with: Mutex<Option<ApiError>>,
    pub list_response: Mutex<Vec<Attachment>>,
    pub download_response: Mutex<Vec<u8>>,
    uploaded: AtomicUsize,
}

impl MockAttachmentApi {
    pub fn failing_with(error: ApiError) -> Self {
        Self {
            fail_with: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn scripted_failure(&self) -> Option<ApiError> {
        self.fail_with.lock().unwrap().clone()
    }

    fn next_upload(&self, file: &FileUpload, task_id: Option<&str>) -> Attachment {
        let n = self.uploaded.fetch_add(1, Ordering::SeqCst) + 1;
        let mut attachment = sample_attachment(&format!("a-{}", n), &file.filename, task_id);
        attachment.content_type = file.content_type.clone();
        attachment
    }
}

#[async_trait]
impl AttachmentApi for MockAttachmentApi {
    async fn list_for_user(&self, _credentials: &Credentials) -> Result<Vec<Attachment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failure() {
            return Err(error);
        }
        Ok(self.list_response.lock().unwrap().clone())
    }

    async fn list_for_task(
        &self,
        _credentials: &Credentials,
        task_id: &str,
    ) -> Result<Vec<Attachment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failure() {
            return Err(error);
        }
        Ok(self
            .list_response
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.task_id.as_deref() == Some(task_id))
            .cloned()
            .collect())
    }

    async fn upload(&self, _credentials: &Credentials, file: &FileUpload) -> Result<Attachment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failure() {
            return Err(error);
        }
        Ok(self.next_upload(file, None))
    }

    async fn upload_for_task(
        &self,
        _credentials: &Credentials,
        task_id: &str,
        file: &FileUpload,
    ) -> Result<Attachment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failure() {
            return Err(error);
        }
        Ok(self.next_upload(file, Some(task_id)))
    }

    async fn attach(
        &self,
        _credentials: &Credentials,
        _attachment_id: &str,
        _task_id: &str,
    ) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn detach(&self, _credentials: &Credentials, _attachment_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn download(&self, _credentials: &Credentials, _attachment_id: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failure() {
            return Err(error);
        }
        Ok(self.download_response.lock().unwrap().clone())
    }

    async fn delete(&self, _credentials: &Credentials, _attachment_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
