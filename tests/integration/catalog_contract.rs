use anyhow::Result;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, GetPromptRequestParam, PromptMessageContent,
    PromptMessageRole, ReadResourceRequestParam, ResourceContents,
};
use serde_json::{json, Map, Value};

use crate::common::{connect_catalog_pair, CatalogClient};

async fn call_tool(client: &CatalogClient, name: &str, args: Value) -> Result<CallToolResult> {
    let arguments: Option<Map<String, Value>> = args.as_object().cloned();
    let result = client
        .call_tool(CallToolRequestParam {
            name: name.to_string().into(),
            arguments,
        })
        .await?;
    Ok(result)
}

fn structured_result(result: &CallToolResult) -> Value {
    result
        .structured_content
        .clone()
        .expect("structured_content should exist")
}

fn text_content(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|item| item.as_text().map(|t| t.text.clone()))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn read_text(client: &CatalogClient, uri: &str) -> Result<String> {
    let result = client
        .read_resource(ReadResourceRequestParam {
            uri: uri.to_string(),
        })
        .await?;
    let mut text = String::new();
    for contents in result.contents {
        if let ResourceContents::TextResourceContents { text: chunk, .. } = contents {
            text.push_str(&chunk);
        }
    }
    Ok(text)
}

#[tokio::test]
async fn list_tools_returns_all_thirteen_in_registration_order() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let list = client.list_tools(None).await?;
    let names: Vec<&str> = list.tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert_eq!(
        names,
        [
            "add",
            "subtract",
            "multiply",
            "divide",
            "power",
            "sqrt",
            "cbrt",
            "factorial",
            "log",
            "remainder",
            "sin",
            "cos",
            "tan",
        ]
    );

    let add = &list.tools[0];
    assert_eq!(add.description.as_deref(), Some("Add two numbers"));
    let schema = serde_json::to_value(add.input_schema.as_ref())?;
    assert_eq!(schema["type"], json!("object"));
    assert_eq!(schema["properties"]["a"]["type"], json!("integer"));
    assert_eq!(schema["required"], json!(["a", "b"]));

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn integer_tools_return_structured_integers() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let result = call_tool(&client, "add", json!({ "a": 2, "b": 3 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 5 }));
    assert_eq!(text_content(&result), "5");

    let result = call_tool(&client, "power", json!({ "a": 2, "b": 10 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 1024 }));

    let result = call_tool(&client, "factorial", json!({ "a": 5 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 120 }));

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn float_tools_return_structured_floats() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let result = call_tool(&client, "divide", json!({ "a": 7, "b": 2 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 3.5 }));

    let result = call_tool(&client, "sqrt", json!({ "a": 4 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 2.0 }));

    let result = call_tool(&client, "cbrt", json!({ "a": 27 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 3.0 }));

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn remainder_sign_follows_the_divisor() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let result = call_tool(&client, "remainder", json!({ "a": -7, "b": 3 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 2 }));

    let result = call_tool(&client, "remainder", json!({ "a": 7, "b": -3 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": -2 }));

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn integral_float_arguments_are_accepted() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    // JSON numbers like 2.0 decode to the declared integer parameters.
    let result = call_tool(&client, "add", json!({ "a": 2.0, "b": 3.0 })).await?;
    assert_eq!(structured_result(&result), json!({ "result": 5 }));

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn static_resource_and_template_are_both_advertised() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let resources = client.list_resources(None).await?;
    let uris: Vec<&str> = resources
        .resources
        .iter()
        .map(|r| r.raw.uri.as_str())
        .collect();
    assert_eq!(uris, ["hello://world"]);

    let templates = client.list_resource_templates(None).await?;
    let patterns: Vec<&str> = templates
        .resource_templates
        .iter()
        .map(|t| t.raw.uri_template.as_str())
        .collect();
    assert_eq!(patterns, ["greeting://{name}"]);

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn resource_payloads_match_the_published_texts() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    assert_eq!(read_text(&client, "hello://world").await?, "Hello, World!");
    assert_eq!(
        read_text(&client, "greeting://Shane").await?,
        "Hello Shane! Welcome to MCP."
    );
    assert_eq!(
        read_text(&client, "greeting://Ada").await?,
        "Hello Ada! Welcome to MCP."
    );

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn review_code_prompt_renders_a_user_message() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let prompts = client.list_prompts(None).await?;
    assert_eq!(prompts.prompts.len(), 1);
    let prompt = &prompts.prompts[0];
    assert_eq!(prompt.name, "review_code");
    let arguments = prompt.arguments.as_ref().expect("prompt takes arguments");
    assert_eq!(arguments.len(), 1);
    assert_eq!(arguments[0].name, "code");
    assert_eq!(arguments[0].required, Some(true));

    let rendered = client
        .get_prompt(GetPromptRequestParam {
            name: "review_code".into(),
            arguments: json!({ "code": "fn main() {}" }).as_object().cloned(),
        })
        .await?;
    assert_eq!(rendered.messages.len(), 1);
    let message = &rendered.messages[0];
    assert!(matches!(message.role, PromptMessageRole::User));
    match &message.content {
        PromptMessageContent::Text { text } => {
            assert_eq!(text, "Please review this code:\n\nfn main() {}");
        }
        other => panic!("expected text content, got {other:?}"),
    }

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn server_info_reports_catalog_instructions() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let info = client.peer_info().expect("initialize should have completed");
    assert_eq!(
        info.instructions.as_deref(),
        Some("integration test server")
    );

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}
