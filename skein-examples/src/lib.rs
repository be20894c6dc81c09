//! Helpers shared by the skein demos: logging setup, the `multiply` tool, a chat
//! client built from settings and the [`mood`] graph.
//!
//! Run a demo with `cargo run -p skein-examples --example <simple_graph|chain|router>`.

pub mod mood;

use std::sync::Arc;

use env_config::{Settings, LOG_FILE, RUST_LOG};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use skein::tool_source::{parse_arguments, FnToolSource, ToolCallContent, ToolSourceError, ToolSpec};
use skein::{ChatOpenAI, CompiledStateGraph, Message, MessagesState};

/// Name used to look up `$XDG_CONFIG_HOME/skein/config.toml`.
pub const APP_NAME: &str = "skein";

/// Initializes tracing from settings.
///
/// - **RUST_LOG**: filter directives, e.g. `skein=debug`. Default: `warn`.
/// - **LOG_FILE**: when set, logs are appended to this file without ANSI colors;
///   otherwise they go to stderr so stdout only carries the demo output.
pub fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let directives = settings.get(RUST_LOG).unwrap_or("warn");
    let filter = tracing_subscriber::EnvFilter::try_new(directives)?;

    if let Some(path) = settings.get(LOG_FILE) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(file_layer).try_init()?;
        tracing::info!(path = %path, "skein demo logging to file");
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter);
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
    }
    Ok(())
}

#[derive(Deserialize)]
struct MultiplyArgs {
    a: i64,
    b: i64,
}

/// Tool source with the single `multiply(a, b)` tool used by the chain and router demos.
pub fn multiply_tools() -> FnToolSource {
    FnToolSource::new().with_tool(
        ToolSpec::new(
            "multiply",
            "Multiply a and b.",
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "integer", "description": "first int"},
                    "b": {"type": "integer", "description": "second int"}
                },
                "required": ["a", "b"]
            }),
        ),
        |args| {
            let MultiplyArgs { a, b } = parse_arguments(args)?;
            let product = a.checked_mul(b).ok_or_else(|| {
                ToolSourceError::Execution(format!("{} * {} overflows a 64-bit integer", a, b))
            })?;
            Ok(ToolCallContent::text(product.to_string()))
        },
    )
}

/// Temperature used when `OPENAI_TEMPERATURE` is unset; keeps demo replies repeatable.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Chat client from `OPENAI_*` settings with the `multiply` tool bound.
///
/// Fails when `OPENAI_API_KEY` is missing or `OPENAI_TEMPERATURE` does not parse.
pub fn build_llm(
    settings: &Settings,
    tools: &FnToolSource,
) -> Result<Arc<ChatOpenAI>, Box<dyn std::error::Error>> {
    let llm_settings = settings.llm()?;
    let temperature = llm_settings.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    let llm = ChatOpenAI::from_settings(&llm_settings)?
        .with_temperature(temperature)
        .bind_tools(tools)?;
    tracing::debug!(model = llm.model(), "chat client ready");
    Ok(Arc::new(llm))
}

/// Runs the two illustrative inputs through `graph`, printing each transcript
/// under its demo header.
pub fn run_demos(
    graph: &CompiledStateGraph<MessagesState>,
) -> Result<(), Box<dyn std::error::Error>> {
    for (header, input) in DEMOS {
        println!("--- {} ---", header);
        let state = graph.invoke(MessagesState::from_user(input))?;
        print_messages(&state.messages);
        println!();
    }
    Ok(())
}

/// Demo headers and the user message each one sends.
pub const DEMOS: [(&str, &str); 2] = [
    ("Demo 1: No tool call", "Hello there!"),
    ("Demo 2: Tool call (multiply)", "Multiply 2 and 3"),
];

/// Prints each message in its pretty, banner-headed form.
pub fn print_messages(messages: &[Message]) {
    for message in messages {
        println!("{}", message.pretty());
    }
}
