//! Callable introspection: [`ToolFn`] metadata to [`ToolDefinition`].

use super::definition::{BoundCallable, ToolDefinition};
use super::function::ToolFn;
use super::validate::ArgumentValidator;
use crate::schema::{compile, SchemaError, SchemaNode};
use std::collections::HashSet;
use thiserror::Error;

/// Failures raised while turning a callable or raw schema into a definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntrospectionError {
    #[error("tool name must not be empty")]
    EmptyName,

    #[error("tool `{name}` must have documentation")]
    MissingDocumentation { name: String },

    #[error("tool `{tool}` declares parameter `{parameter}` more than once")]
    DuplicateParameter { tool: String, parameter: String },

    #[error("parameter `{parameter}` of tool `{tool}`: {source}")]
    Parameter {
        tool: String,
        parameter: String,
        source: SchemaError,
    },

    #[error("raw tool schema is invalid: {reason}")]
    InvalidRawSchema { reason: String },

    #[error("parameter schema of tool `{tool}` cannot be validated against: {reason}")]
    Validator { tool: String, reason: String },
}

/// Build the definition of a callable.
///
/// Receiver and variadic parameters are left out of the schema. Every named
/// parameter gets a description: its string annotation if it has one, otherwise
/// `Parameter <name> of type <type>`.
pub fn introspect(tool: &ToolFn) -> Result<ToolDefinition, IntrospectionError> {
    let name = tool.name();
    if name.trim().is_empty() {
        return Err(IntrospectionError::EmptyName);
    }

    let description = tool
        .doc()
        .map(normalize_description)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| IntrospectionError::MissingDocumentation {
            name: name.to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut properties = Vec::new();
    let mut required = Vec::new();
    for param in &tool.signature().params {
        if !seen.insert(param.name.as_str()) {
            return Err(IntrospectionError::DuplicateParameter {
                tool: name.to_string(),
                parameter: param.name.clone(),
            });
        }
        if !param.is_schema_visible() {
            continue;
        }

        let mut node =
            compile(&param.descriptor).map_err(|source| IntrospectionError::Parameter {
                tool: name.to_string(),
                parameter: param.name.clone(),
                source,
            })?;
        if node.description.is_none() {
            node.description = Some(format!(
                "Parameter {} of type {}",
                param.name,
                param.descriptor.type_name()
            ));
        }
        properties.push((param.name.clone(), node));
        if param.is_required() {
            required.push(param.name.clone());
        }
    }

    let parameters = SchemaNode::object(properties, required).to_value();

    let validator = if tool.validates_arguments() {
        Some(
            ArgumentValidator::compile(&parameters).map_err(|reason| {
                IntrospectionError::Validator {
                    tool: name.to_string(),
                    reason,
                }
            })?,
        )
    } else {
        None
    };

    tracing::debug!(tool = %name, "introspected tool definition");

    Ok(ToolDefinition::new(name, description, parameters)
        .with_static_defaults(tool.static_defaults().clone())
        .with_callable(BoundCallable {
            signature: Some(tool.signature().clone()),
            invoker: tool.invoker().clone(),
            validator,
        }))
}

/// Trim every line, drop blank lines at both ends and collapse inner runs of
/// blank lines into one.
pub fn normalize_description(doc: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut pending_blank = false;
    for line in doc.lines().map(str::trim) {
        if line.is_empty() {
            pending_blank = !lines.is_empty();
            continue;
        }
        if pending_blank {
            lines.push("");
            pending_blank = false;
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeDescriptor;
    use crate::tool::CallArgs;
    use serde_json::{json, Value};

    fn noop(builder: crate::tool::ToolFnBuilder) -> ToolFn {
        builder.sync(|_args: CallArgs| Ok(Value::Null))
    }

    #[test]
    fn test_description_normalization() {
        assert_eq!(
            normalize_description("\n    This is a longer docstring.\n    It spans multiple lines.\n    "),
            "This is a longer docstring.\nIt spans multiple lines."
        );
        assert_eq!(
            normalize_description("Summary.\n\n\n\n    Details here.\n"),
            "Summary.\n\nDetails here."
        );
        assert_eq!(normalize_description("   \n  \n"), "");
    }

    #[test]
    fn test_missing_documentation_fails() {
        let tool = noop(ToolFn::builder("undocumented").param::<i64>("x"));
        assert_eq!(
            introspect(&tool).unwrap_err(),
            IntrospectionError::MissingDocumentation {
                name: "undocumented".into()
            }
        );

        let blank = noop(ToolFn::builder("blank").doc("  \n "));
        assert!(matches!(
            introspect(&blank),
            Err(IntrospectionError::MissingDocumentation { .. })
        ));
    }

    #[test]
    fn test_parameter_descriptions() {
        let tool = noop(
            ToolFn::builder("search")
                .doc("Search things.")
                .receiver("self")
                .param_described::<String>("query", "User search query")
                .param::<String>("text")
                .variadic_keyword("kwargs"),
        );
        let def = introspect(&tool).unwrap();
        assert_eq!(
            def.parameters,
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "User search query"},
                    "text": {"type": "string", "description": "Parameter text of type string"}
                },
                "required": ["query", "text"]
            })
        );
    }

    #[test]
    fn test_no_parameters_still_yields_object_schema() {
        let def = introspect(&noop(ToolFn::builder("ping").doc("Ping."))).unwrap();
        assert_eq!(
            def.parameters,
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn test_schema_failure_names_the_parameter() {
        let tool = noop(
            ToolFn::builder("broken")
                .doc("Broken.")
                .param_of("choice", TypeDescriptor::Union(Vec::new())),
        );
        assert_eq!(
            introspect(&tool).unwrap_err(),
            IntrospectionError::Parameter {
                tool: "broken".into(),
                parameter: "choice".into(),
                source: SchemaError::EmptyUnion,
            }
        );
    }

    #[test]
    fn test_duplicate_parameters_fail() {
        let tool = noop(
            ToolFn::builder("dup")
                .doc("Dup.")
                .param::<i64>("x")
                .param::<String>("x"),
        );
        assert!(matches!(
            introspect(&tool),
            Err(IntrospectionError::DuplicateParameter { .. })
        ));
    }
}
