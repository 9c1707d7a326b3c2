//! Read access to combined journal documents for agents.
//!
//! Agents ask for a document by bare file name (`journal-app.txt`); the
//! tool resolves it inside a fixed root directory and refuses anything
//! that would escape it.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::contract::{Tool, ToolError, ToolSpec};

pub const FILE_TOOL_NAME: &str = "File_Tool";

pub struct FileTool {
    root: PathBuf,
}

impl FileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Contents of `filename` inside the root, prefixed with its path.
    pub async fn read(&self, filename: &str) -> Result<String, ToolError> {
        let path = self.resolve(filename)?;
        if !fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
        {
            return Err(ToolError::NotFound(path));
        }
        self.ensure_inside_root(filename, &path).await?;
        let content = fs::read_to_string(&path)
            .await
            .map_err(|source| ToolError::Read {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "File_Tool read file");
        Ok(format!("path: {}, content: {}", path.display(), content))
    }

    /// Symlinks in the root may only point at files inside it.
    async fn ensure_inside_root(&self, filename: &str, path: &Path) -> Result<(), ToolError> {
        let root = canonical(&self.root).await?;
        let target = canonical(path).await?;
        if !target.starts_with(&root) {
            tracing::warn!(
                file = filename,
                target = %target.display(),
                "File_Tool refused a link leaving its root"
            );
            return Err(ToolError::InvalidFileName(filename.to_string()));
        }
        Ok(())
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf, ToolError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(ToolError::InvalidFileName(filename.to_string())),
        }
    }
}

async fn canonical(path: &Path) -> Result<PathBuf, ToolError> {
    fs::canonicalize(path)
        .await
        .map_err(|source| ToolError::Read {
            path: path.to_path_buf(),
            source,
        })
}

#[async_trait]
impl Tool for FileTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: FILE_TOOL_NAME.to_string(),
            description: "Retrieves content from a file in a specific folder. \
                Given a file name, it returns the file path and its contents."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "Name of the file inside the journal folder, e.g. journal-app.txt."
                    }
                },
                "required": ["filename"]
            }),
        }
    }

    async fn invoke(&self, args: Value) -> Result<String, ToolError> {
        let filename = args["filename"]
            .as_str()
            .ok_or(ToolError::MissingArgument("filename"))?;
        self.read(filename).await
    }
}
