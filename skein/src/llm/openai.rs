//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Blocking client over `ureq`. Credentials come from an explicit [`OpenAIConfig`],
//! usually built from `skein-config` settings; nothing is read from the process
//! environment here. Optional tools can be bound for function/tool calling; when
//! present, the API may return `tool_calls` in the response.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use env_config::{LlmSettings, LoadError, OPENAI_API_KEY};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ToolChoiceMode};
use crate::message::{Message, ToolCall};
use crate::tool_source::{ToolSource, ToolSourceError, ToolSpec};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAIConfig {
    /// Config for the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Config from resolved settings; the API key is required.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LoadError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LoadError::Missing(OPENAI_API_KEY.to_string()))?;
        let config = Self::new(api_key);
        Ok(match settings.base_url.as_deref() {
            Some(base) if !base.trim().is_empty() => config.with_base_url(base.trim()),
            _ => config,
        })
    }

    /// Chat completions URL. Does not append /v1 when the base already ends with /v1.
    pub fn chat_completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }
}

/// OpenAI Chat Completions client implementing `LlmClient`.
///
/// Build with [`ChatOpenAI::with_config`] or [`ChatOpenAI::from_settings`], then
/// optionally bind tools (e.g. from `ToolSource::list_tools()`) to enable tool calls.
#[derive(Clone)]
pub struct ChatOpenAI {
    agent: ureq::Agent,
    config: OpenAIConfig,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
    tool_choice: Option<ToolChoiceMode>,
}

impl std::fmt::Debug for ChatOpenAI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatOpenAI")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("tools", &self.tools.as_ref().map(Vec::len))
            .field("temperature", &self.temperature)
            .field("tool_choice", &self.tool_choice)
            .finish()
    }
}

impl ChatOpenAI {
    /// Build client with explicit config.
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            config,
            model: model.into(),
            tools: None,
            temperature: None,
            tool_choice: None,
        }
    }

    /// Build client from resolved settings: key and base URL, model (default
    /// [`DEFAULT_MODEL`]) and temperature.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LoadError> {
        let config = OpenAIConfig::from_settings(settings)?;
        let model = settings.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let client = Self::with_config(config, model);
        Ok(match settings.temperature {
            Some(t) => client.with_temperature(t),
            None => client,
        })
    }

    /// Bind every tool listed by `tool_source`.
    ///
    /// Use the same source for the tool node so the model and the executor see the
    /// same tools.
    pub fn bind_tools(self, tool_source: &dyn ToolSource) -> Result<Self, ToolSourceError> {
        let tools = tool_source.list_tools()?;
        Ok(self.with_tools(tools))
    }

    /// Set tools for this completion (enables tool_calls in response).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set tool choice mode (auto, none, required). Overrides the API default when tools are present.
    pub fn with_tool_choice(mut self, mode: ToolChoiceMode) -> Self {
        self.tool_choice = Some(mode);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sampling temperature sent with each request, if set.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    fn build_request<'a>(&'a self, messages: &[Message]) -> ChatRequest<'a> {
        let tools = self.tools.as_ref().filter(|t| !t.is_empty()).map(|tools| {
            tools
                .iter()
                .map(|t| WireTool {
                    kind: "function",
                    function: WireFunctionDef {
                        name: &t.name,
                        description: t.description.as_deref(),
                        parameters: &t.input_schema,
                    },
                })
                .collect()
        });
        let tool_choice = match (&tools, self.tool_choice) {
            (Some(_), Some(mode)) => Some(mode.as_str()),
            _ => None,
        };
        ChatRequest {
            model: &self.model,
            messages: messages.iter().map(WireMessage::from).collect(),
            tools,
            tool_choice,
            temperature: self.temperature,
        }
    }
}

impl LlmClient for ChatOpenAI {
    fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let request = self.build_request(messages);
        let url = self.config.chat_completions_url();
        debug!(
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            tools_count = request.tools.as_ref().map(Vec::len).unwrap_or(0),
            temperature = ?self.temperature,
            tool_choice = ?self.tool_choice,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(url = %url, request = %js, "OpenAI request body");
        }

        let mut response = self
            .agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .send_json(&request)
            .map_err(|e| AgentError::Llm(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(AgentError::Llm(format!(
                "OpenAI API error: HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let body: ChatResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| AgentError::Llm(format!("OpenAI response decode failed: {}", e)))?;
        trace!(url = %url, response = ?body, "OpenAI response body");
        parse_response(body)
    }
}

fn parse_response(response: ChatResponse) -> Result<LlmResponse, AgentError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AgentError::Llm("OpenAI returned no choices".to_string()))?;
    let tool_calls = choice
        .message
        .tool_calls
        .into_iter()
        .map(|tc| ToolCall::new(tc.id, tc.function.name, tc.function.arguments))
        .collect();
    Ok(LlmResponse {
        content: choice.message.content.unwrap_or_default(),
        tool_calls,
        usage: response.usage,
    })
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum WireMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<WireToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        match message {
            Message::System(content) => Self::System {
                content: content.clone(),
            },
            Message::User(content) => Self::User {
                content: content.clone(),
            },
            Message::Assistant {
                content,
                tool_calls,
            } => Self::Assistant {
                content: (!content.is_empty() || tool_calls.is_empty()).then(|| content.clone()),
                tool_calls: tool_calls
                    .iter()
                    .map(|c| WireToolCall {
                        id: c.id.clone(),
                        kind: "function".to_string(),
                        function: WireFunctionCall {
                            name: c.name.clone(),
                            arguments: c.arguments.clone(),
                        },
                    })
                    .collect(),
            },
            Message::Tool {
                call_id, content, ..
            } => Self::Tool {
                tool_call_id: call_id.clone(),
                content: content.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionDef<'a>,
}

#[derive(Debug, Serialize)]
struct WireFunctionDef<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    parameters: &'a Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<LlmUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}
