use std::time::Duration;

use anyhow::Result;
use rmcp::{model::ClientInfo, serve_client};
use tokio::time::timeout;

use crate::common::spawn_server_process;

#[tokio::test]
async fn inspector_style_spawn_serves_the_full_catalog() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let tools = client.list_tools(None).await?;
    assert_eq!(tools.tools.len(), 13, "all tools should be advertised");
    assert!(
        tools.tools.iter().any(|tool| tool.name.as_ref() == "add"),
        "list_tools should include add: {:?}",
        tools.tools
    );
    let resources = client.list_resources(None).await?;
    assert_eq!(resources.resources.len(), 1);

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}
