// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool registry with startup validation.
//!
//! ```text
//! ToolRegistry::standard()
//!   register(create_repo) register(check_git) register(init_repo)
//!   validate(): unique names, object schemas, required ⊆ properties
//! ```

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;

use crate::error::{ConfigError, PublishResult};

/// Which typed handler a tool dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolHandler {
    CreateRepo,
    CheckGit,
    InitRepo,
}

/// A registered tool as listed by `list_tools`.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
    #[serde(skip)]
    pub handler: ToolHandler,
}

impl Tool {
    fn create_repo() -> Self {
        Self {
            name: "create_repo",
            description: "Publish a local directory as a new GitHub repository: \
                          initialize and commit if needed, create the remote, push.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "directory": {"type": "string", "description": "Local directory to publish"},
                    "name": {"type": "string", "description": "Repository name (defaults to the directory name)"},
                    "private": {"type": "boolean", "description": "Create a private repository"},
                },
                "required": ["directory"],
            }),
            handler: ToolHandler::CreateRepo,
        }
    }

    fn check_git() -> Self {
        Self {
            name: "check_git",
            description: "Check that git is installed and report its version.",
            parameters: json!({"type": "object", "properties": {}}),
            handler: ToolHandler::CheckGit,
        }
    }

    fn init_repo() -> Self {
        Self {
            name: "init_repo",
            description: "Initialize a git repository in a directory and commit pending changes.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "directory": {"type": "string", "description": "Local directory to prepare"},
                },
                "required": ["directory"],
            }),
            handler: ToolHandler::InitRepo,
        }
    }
}

/// Ordered set of tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

fn invalid(tool: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        section: "tools".to_string(),
        key: tool.to_string(),
        message: message.into(),
    }
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tools served by `repo2gh serve`, validated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if validation fails.
    pub fn standard() -> PublishResult<Self> {
        let mut registry = Self::new();
        registry.register(Tool::create_repo());
        registry.register(Tool::check_git());
        registry.register(Tool::init_repo());
        registry.validate()?;
        Ok(registry)
    }

    pub fn register(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    /// Check names are unique and schemas are well formed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending tool.
    pub fn validate(&self) -> PublishResult<()> {
        let mut seen = HashSet::new();
        for tool in &self.tools {
            if tool.name.is_empty() {
                return Err(invalid("", "tool name must not be empty").into());
            }
            if !seen.insert(tool.name) {
                return Err(invalid(tool.name, "duplicate tool name").into());
            }
            if tool.parameters.get("type").and_then(Value::as_str) != Some("object") {
                return Err(invalid(tool.name, "parameters must be an object schema").into());
            }
            let Some(properties) = tool.parameters.get("properties").and_then(Value::as_object)
            else {
                return Err(invalid(tool.name, "parameters.properties must be an object").into());
            };
            let required = tool
                .parameters
                .get("required")
                .and_then(Value::as_array)
                .map_or(&[][..], Vec::as_slice);
            for field in required {
                let Some(field) = field.as_str() else {
                    return Err(invalid(tool.name, "required entries must be strings").into());
                };
                if !properties.contains_key(field) {
                    return Err(invalid(
                        tool.name,
                        format!("required parameter '{field}' is not declared"),
                    )
                    .into());
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// `{"tools": [{name, description, parameters}]}`.
    #[must_use]
    pub fn list(&self) -> Value {
        json!({ "tools": self.tools })
    }
}
