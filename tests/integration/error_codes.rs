use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, ErrorData, GetPromptRequestParam, ReadResourceRequestParam},
    service::ServiceError,
};
use serde_json::{json, Map, Value};

use crate::common::{connect_catalog_pair, CatalogClient};

async fn call_tool_error(client: &CatalogClient, name: &str, args: Value) -> ErrorData {
    let arguments: Option<Map<String, Value>> = args.as_object().cloned();
    let error = client
        .call_tool(CallToolRequestParam {
            name: name.to_string().into(),
            arguments,
        })
        .await
        .expect_err("call should be rejected");
    match error {
        ServiceError::McpError(inner) => inner,
        other => panic!("expected a protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_tool_is_method_not_found() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let error = call_tool_error(&client, "modulo", json!({ "a": 1, "b": 2 })).await;
    assert_eq!(error.code.0, -32601);
    assert_eq!(error.message, "Tool `modulo` is not registered");

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn bad_tool_arguments_are_invalid_params() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let missing = call_tool_error(&client, "add", json!({ "a": 2 })).await;
    assert_eq!(missing.code.0, -32602);
    assert!(missing.message.contains("missing required argument `b`"));

    let unexpected = call_tool_error(&client, "add", json!({ "a": 2, "b": 3, "c": 4 })).await;
    assert_eq!(unexpected.code.0, -32602);
    assert!(unexpected.message.contains("unexpected argument `c`"));

    let wrong_type = call_tool_error(&client, "add", json!({ "a": "two", "b": 3 })).await;
    assert_eq!(wrong_type.code.0, -32602);

    let fractional = call_tool_error(&client, "add", json!({ "a": 2.5, "b": 3 })).await;
    assert_eq!(fractional.code.0, -32602);
    assert!(fractional.message.contains("whole number"));

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn compute_failures_are_internal_errors() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let division = call_tool_error(&client, "divide", json!({ "a": 1, "b": 0 })).await;
    assert_eq!(division.code.0, -32603);
    assert!(division.message.contains("division by zero"));

    let negative_factorial = call_tool_error(&client, "factorial", json!({ "a": -1 })).await;
    assert_eq!(negative_factorial.code.0, -32603);

    let overflow = call_tool_error(&client, "factorial", json!({ "a": 21 })).await;
    assert_eq!(overflow.code.0, -32603);
    assert!(overflow.message.contains("overflow"));

    let domain = call_tool_error(&client, "sqrt", json!({ "a": -4 })).await;
    assert_eq!(domain.code.0, -32603);
    assert!(domain.message.contains("domain"));

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn unknown_resource_uri_is_resource_not_found() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let error = client
        .read_resource(ReadResourceRequestParam {
            uri: "void://nothing".into(),
        })
        .await
        .expect_err("unknown URI should be rejected");
    match error {
        ServiceError::McpError(inner) => {
            assert_eq!(inner.code.0, -32002);
            assert_eq!(inner.message, "Resource `void://nothing` is not registered");
        }
        other => panic!("expected a protocol error, got {other:?}"),
    }

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn prompt_failures_are_invalid_params() -> Result<()> {
    let (client, server_task) = connect_catalog_pair().await?;

    let unknown = client
        .get_prompt(GetPromptRequestParam {
            name: "summarize".into(),
            arguments: None,
        })
        .await
        .expect_err("unknown prompt should be rejected");
    match unknown {
        ServiceError::McpError(inner) => {
            assert_eq!(inner.code.0, -32602);
            assert_eq!(inner.message, "Prompt `summarize` is not registered");
        }
        other => panic!("expected a protocol error, got {other:?}"),
    }

    let missing = client
        .get_prompt(GetPromptRequestParam {
            name: "review_code".into(),
            arguments: None,
        })
        .await
        .expect_err("missing argument should be rejected");
    match missing {
        ServiceError::McpError(inner) => {
            assert_eq!(inner.code.0, -32602);
            assert!(inner.message.contains("missing required argument `code`"));
        }
        other => panic!("expected a protocol error, got {other:?}"),
    }

    client.cancel().await?;
    let _ = server_task.await;
    Ok(())
}
