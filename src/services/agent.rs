//! Client for the remote farming agent API.
//!
//! Every endpoint takes a multipart form and answers with JSON. The payload is
//! handed back untouched; only the HTTP status is interpreted.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::{KisanflowError, Result, config::AgentConfig, utils};

const START_SESSION_PATH: &str = "/api/agent/start-session";
const EXECUTE_TASK_PATH: &str = "/api/agent/execute-task";
const VOICE_COMMAND_PATH: &str = "/api/agent/voice-command";
const VOICE_FILE_NAME: &str = "voice.webm";

/// File attached to an `execute_task` call, e.g. a leaf photo.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AgentClient {
    client: reqwest::Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_millis(config.timeout_ms)).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Opens an agent session. A random user id is used when none is given.
    pub async fn start_session(
        &self,
        user_id: Option<&str>,
        language: &str,
    ) -> Result<serde_json::Value> {
        let user_id = user_id.map(str::to_string).unwrap_or_else(utils::shortid);
        let form = Form::new().text("user_id", user_id).text("language", language.to_string());
        self.post(START_SESSION_PATH, form, "Failed to start session").await
    }

    pub async fn execute_task(
        &self,
        session_id: &str,
        task_type: &str,
        user_input: Option<&str>,
        language: &str,
        file: Option<Attachment>,
    ) -> Result<serde_json::Value> {
        let mut form = Form::new().text("session_id", session_id.to_string()).text("task_type", task_type.to_string());
        if let Some(input) = user_input.filter(|i| !i.is_empty()) {
            form = form.text("user_input", input.to_string());
        }
        form = form.text("language", language.to_string());
        if let Some(file) = file {
            form = form.part("file", Part::bytes(file.bytes).file_name(file.file_name));
        }

        self.post(EXECUTE_TASK_PATH, form, "Failed to execute task").await
    }

    /// Sends a recorded voice clip; the clip is always uploaded as `voice.webm`.
    pub async fn voice_command(
        &self,
        session_id: &str,
        audio: Vec<u8>,
        language: &str,
    ) -> Result<serde_json::Value> {
        let form = Form::new()
            .text("session_id", session_id.to_string())
            .part("audio_file", Part::bytes(audio).file_name(VOICE_FILE_NAME))
            .text("language", language.to_string());

        self.post(VOICE_COMMAND_PATH, form, "Failed to handle voice command").await
    }

    async fn post(
        &self,
        path: &str,
        form: Form,
        failure: &str,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("agent: POST {}", url);

        let response = self.client.post(&url).multipart(form).send().await.map_err(|e| {
            warn!("agent: request to {} failed: {}", path, e);
            KisanflowError::NetworkFailure(failure.to_string())
        })?;

        if !response.status().is_success() {
            warn!("agent: {} answered {}", path, response.status());
            return Err(KisanflowError::NetworkFailure(failure.to_string()));
        }

        response.json::<serde_json::Value>().await.map_err(|e| KisanflowError::Convert(format!("agent: invalid response from {}: {}", path, e)))
    }
}
