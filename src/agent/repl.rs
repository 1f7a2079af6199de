//! Interactive chat loop bridging terminal input, the chat model, and the
//! server's tool catalog.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

use crate::{
    agent::{
        config::AgentConfig,
        llm::{ChatMessage, ChatModel, OpenAiChatModel, ToolSchema},
        session::{McpToolSession, RemoteCatalog, ToolBridge},
    },
    lib::{errors::AgentError, telemetry::TurnSpan},
};

const EXIT_KEYWORDS: [&str; 3] = ["q", "quit", "exit"];

fn is_exit_keyword(input: &str) -> bool {
    let trimmed = input.trim();
    EXIT_KEYWORDS
        .iter()
        .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
}

fn print_items(name: &str, items: &[String]) {
    println!();
    println!("Available {name}:");
    if items.is_empty() {
        println!("No items available");
    } else {
        for item in items {
            println!(" * {item}");
        }
    }
}

fn print_catalog(catalog: &RemoteCatalog) {
    print_items(
        "resources",
        &catalog
            .resources
            .iter()
            .map(|r| r.raw.uri.to_string())
            .collect::<Vec<_>>(),
    );
    print_items(
        "prompts",
        &catalog
            .prompts
            .iter()
            .map(|p| p.name.to_string())
            .collect::<Vec<_>>(),
    );
    print_items(
        "resource templates",
        &catalog
            .templates
            .iter()
            .map(|t| t.raw.uri_template.to_string())
            .collect::<Vec<_>>(),
    );
    print_items(
        "tools",
        &catalog
            .tools
            .iter()
            .map(|t| t.name.to_string())
            .collect::<Vec<_>>(),
    );
    println!();
    println!("{}", catalog.greeting);
}

/// Connect to the catalog server and run the chat loop until quit or EOF.
pub async fn run(config: AgentConfig) -> Result<()> {
    let session = McpToolSession::connect(&config.url).await?;
    let loop_result = chat_loop(&session, &config).await;
    let close_result = session.close().await;
    loop_result.and(close_result)
}

async fn chat_loop(session: &McpToolSession, config: &AgentConfig) -> Result<()> {
    let catalog = session.fetch_catalog().await?;
    if config.banner {
        print_catalog(&catalog);
    }
    let schemas = McpToolSession::tool_schemas(&catalog);
    let model = OpenAiChatModel::new(config);
    info!(
        target: "soroban::agent",
        model = model.model(),
        tools = schemas.len(),
        "Agent ready"
    );

    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut turn_index: u64 = 0;

    loop {
        print!("User: ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(input) = lines.next_line().await.context("failed to read input")? else {
            // EOF is a clean shutdown, same as an explicit quit.
            return Ok(());
        };
        if input.trim().is_empty() {
            continue;
        }
        if is_exit_keyword(&input) {
            println!("Bye!");
            return Ok(());
        }

        turn_index += 1;
        let span = TurnSpan::start(Uuid::new_v4(), turn_index);
        match run_turn(session, &model, &schemas, &mut history, &input, config.max_rounds).await {
            Ok((text, rounds)) => {
                span.finish("completed", rounds);
                println!("Assistant: {text}");
            }
            Err(error) => {
                span.finish("failed", 0);
                return Err(error);
            }
        }
    }
}

/// Run one user turn to completion: call the model, bridge any tool calls it
/// requests, repeat until it produces final text or the round budget runs out.
async fn run_turn(
    session: &dyn ToolBridge,
    model: &dyn ChatModel,
    schemas: &[ToolSchema],
    history: &mut Vec<ChatMessage>,
    input: &str,
    max_rounds: usize,
) -> Result<(String, usize)> {
    history.push(ChatMessage::user(input));

    for round in 1..=max_rounds {
        let reply = model.complete(history, schemas).await?;

        if reply.tool_calls.is_empty() {
            let text = reply.content.unwrap_or_default();
            history.push(ChatMessage::assistant(text.clone()));
            return Ok((text, round));
        }

        history.push(ChatMessage::assistant_tool_calls(
            reply.content.clone(),
            reply.tool_calls.clone(),
        ));
        for call in &reply.tool_calls {
            let text = match serde_json::from_str::<Value>(&call.function.arguments) {
                Ok(arguments) => session
                    .call_tool(&call.function.name, arguments)
                    .await?
                    .into_text(),
                // The model emitted malformed JSON; tell it instead of dying.
                Err(error) => format!("Tool error: arguments are not valid JSON: {error}"),
            };
            history.push(ChatMessage::tool_result(call.id.clone(), text));
        }
    }

    Err(AgentError::RoundBudgetExhausted { rounds: max_rounds }.into())
}
