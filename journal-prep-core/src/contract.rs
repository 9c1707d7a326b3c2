//! # contract: the seam between journal data and an agent runtime
//!
//! Agents never touch the filesystem directly. They call tools, and every
//! tool implements the [`Tool`] trait defined here: a name and description
//! the model sees, a JSON Schema for the arguments, and an async `invoke`.
//!
//! The conversation orchestrator that picks which agent speaks next is an
//! external collaborator and is not modelled here. It only needs something
//! that can look tools up by name, which is what [`ToolBox`] provides.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate deterministic mocks.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// What an agent sees of a tool before calling it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema of the `args` object passed to [`Tool::invoke`].
    pub parameters: Value,
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("error {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A capability an agent can call.
///
/// Implementations must be cheap to describe; `spec` may be called for every
/// turn of a conversation.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;

    /// Run the tool. `args` must satisfy `spec().parameters`.
    async fn invoke(&self, args: Value) -> Result<String, ToolError>;
}

/// Tools registered for one agent session, looked up by name.
#[derive(Default)]
pub struct ToolBox {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        tracing::debug!(tool = %tool.spec().name, "Registered tool");
        self.tools.push(tool);
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    pub async fn invoke(&self, name: &str, args: Value) -> Result<String, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.spec().name == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::info!(tool = name, "Invoking tool");
        let result = tool.invoke(args).await;
        if let Err(e) = &result {
            tracing::error!(tool = name, error = %e, "Tool invocation failed");
        }
        result
    }
}
