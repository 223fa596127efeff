//! Ordered tool collections built from heterogeneous sources.
//!
//! | Source | Result |
//! |--------|--------|
//! | [`ToolSource::Function`] | Introspected definition with a local implementation |
//! | [`ToolSource::Definition`] | Used as given |
//! | [`ToolSource::Raw`] | Schema-only definition, rendered verbatim |
//! | [`ToolSource::Toolset`] | Members expanded in place, names namespaced |

use super::definition::ToolDefinition;
use super::error::ToolError;
use super::function::ToolFn;
use super::introspect::introspect;
use super::toolset::{FnToolset, Toolset};
use crate::config::ToolingConfig;
use crate::schema::parameters_from_type;
use crate::types::ToolSpec;
use crate::Result;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Anything that can be registered as one or more tools.
#[derive(Clone)]
pub enum ToolSource {
    Function(ToolFn),
    Definition(ToolDefinition),
    Raw(Value),
    Toolset(Arc<dyn Toolset>),
}

impl fmt::Debug for ToolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolSource::Function(tool) => f.debug_tuple("Function").field(&tool.name()).finish(),
            ToolSource::Definition(def) => f.debug_tuple("Definition").field(&def.name).finish(),
            ToolSource::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            ToolSource::Toolset(set) => f.debug_tuple("Toolset").field(&set.name()).finish(),
        }
    }
}

impl From<ToolFn> for ToolSource {
    fn from(tool: ToolFn) -> Self {
        ToolSource::Function(tool)
    }
}

impl From<ToolDefinition> for ToolSource {
    fn from(def: ToolDefinition) -> Self {
        ToolSource::Definition(def)
    }
}

impl From<Value> for ToolSource {
    fn from(raw: Value) -> Self {
        ToolSource::Raw(raw)
    }
}

impl From<Arc<dyn Toolset>> for ToolSource {
    fn from(set: Arc<dyn Toolset>) -> Self {
        ToolSource::Toolset(set)
    }
}

impl From<FnToolset> for ToolSource {
    fn from(set: FnToolset) -> Self {
        ToolSource::Toolset(Arc::new(set))
    }
}

/// A raw tool whose parameter schema is derived from `T` with `schemars`.
pub fn raw_tool_from_type<T: schemars::JsonSchema>(
    name: impl Into<String>,
    description: impl Into<String>,
) -> ToolSource {
    ToolSource::Raw(json!({
        "name": name.into(),
        "description": description.into(),
        "parameters": parameters_from_type::<T>(),
    }))
}

/// Immutable, ordered set of tool definitions.
///
/// Lookup is exact and case-sensitive; when two tools share a name the first
/// one registered wins and the later ones are kept but unreachable by name.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn build<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<ToolSource>,
    {
        Self::build_with(sources, &ToolingConfig::default())
    }

    pub fn build_with<I>(sources: I, config: &ToolingConfig) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<ToolSource>,
    {
        let mut tools = Vec::new();
        for source in sources {
            match source.into() {
                ToolSource::Function(tool) => tools.push(introspect(&tool)?),
                ToolSource::Definition(def) => tools.push(def),
                ToolSource::Raw(raw) => tools.push(ToolDefinition::from_raw(raw)?),
                ToolSource::Toolset(set) => {
                    for member in set.tools() {
                        let member = if config.namespaced_toolsets {
                            let name =
                                set.format_tool_name(member.name(), &config.namespace_separator);
                            member.with_name(name)
                        } else {
                            member
                        };
                        tools.push(introspect(&member)?);
                    }
                }
            }
        }

        let registry = Self { tools };
        for name in registry.duplicates() {
            tracing::debug!(tool = %name, "duplicate tool name; later definitions are unreachable");
        }
        tracing::debug!(count = registry.tools.len(), "built tool registry");
        Ok(registry)
    }

    /// First tool registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<&ToolDefinition> {
        find_tool_by_name(&self.tools, name)
    }

    pub fn get(&self, name: &str) -> std::result::Result<&ToolDefinition, ToolError> {
        self.resolve(name)
            .ok_or_else(|| ToolError::does_not_exist(name))
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Names registered more than once, each reported once.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut out = Vec::new();
        for tool in &self.tools {
            let name = tool.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                out.push(name);
            }
        }
        out
    }

    /// Envelopes to hand to the model, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(ToolDefinition::to_spec).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Normalize heterogeneous sources into definitions with default settings.
pub fn prepare_tools<I>(sources: I) -> Result<Vec<ToolDefinition>>
where
    I: IntoIterator,
    I::Item: Into<ToolSource>,
{
    Ok(ToolRegistry::build(sources)?.tools)
}

/// First definition whose name equals `name` exactly.
pub fn find_tool_by_name<'a>(tools: &'a [ToolDefinition], name: &str) -> Option<&'a ToolDefinition> {
    tools.iter().find(|t| t.name == name)
}
