//! Callables exposed as tools.
//!
//! A [`ToolFn`] pairs a body (blocking or suspending) with the metadata the
//! introspector needs: name, documentation and parameter descriptors.
//!
//! ```rust
//! use ai_lib_tools::tool::{CallArgs, ToolFn};
//!
//! let add = ToolFn::builder("add")
//!     .doc("Add two integers.")
//!     .param::<i64>("a")
//!     .param::<i64>("b")
//!     .sync(|args: CallArgs| Ok(args.get::<i64>("a")? + args.get::<i64>("b")?));
//!
//! assert_eq!(add.name(), "add");
//! ```

use super::args::CallArgs;
use super::error::{BoxError, CallResult};
use crate::schema::{Describe, TypeDescriptor};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// How a parameter participates in binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Bound implicitly (instance state); never part of the schema.
    Receiver,
    /// Named argument supplied by the model.
    Named,
    /// Catch-all for extra positional values; never part of the schema.
    VarPositional,
    /// Catch-all for extra keyword arguments; never part of the schema.
    VarKeyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub descriptor: TypeDescriptor,
    pub default: Option<Value>,
}

impl Param {
    pub fn is_schema_visible(&self) -> bool {
        self.kind == ParamKind::Named
    }

    pub fn is_required(&self) -> bool {
        self.is_schema_visible() && self.default.is_none()
    }
}

/// Ordered parameter list of a callable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub params: Vec<Param>,
}

impl Signature {
    /// Parameters that appear in the compiled schema, in declaration order.
    pub fn named(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|p| p.is_schema_visible())
    }

    pub fn accepts_extra_keywords(&self) -> bool {
        self.params.iter().any(|p| p.kind == ParamKind::VarKeyword)
    }
}

/// Blocking tool body.
pub type BlockingBody = dyn Fn(CallArgs) -> CallResult<Value> + Send + Sync;

/// Suspending tool body.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: CallArgs) -> CallResult<Value>;
}

struct FnHandler<F, Fut, R> {
    f: F,
    _marker: PhantomData<fn() -> (Fut, R)>,
}

#[async_trait]
impl<F, Fut, R> ToolHandler for FnHandler<F, Fut, R>
where
    F: Fn(CallArgs) -> Fut + Send + Sync,
    Fut: Future<Output = CallResult<R>> + Send + 'static,
    R: Serialize + 'static,
{
    async fn call(&self, args: CallArgs) -> CallResult<Value> {
        let out = (self.f)(args).await?;
        to_value(out)
    }
}

fn to_value<R: Serialize>(out: R) -> CallResult<Value> {
    serde_json::to_value(out).map_err(|e| Box::new(e) as BoxError)
}

/// The local implementation behind a tool.
#[derive(Clone)]
pub enum Invoker {
    Blocking(Arc<BlockingBody>),
    Suspending(Arc<dyn ToolHandler>),
}

impl Invoker {
    pub fn is_suspending(&self) -> bool {
        matches!(self, Invoker::Suspending(_))
    }
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invoker::Blocking(_) => f.write_str("Invoker::Blocking"),
            Invoker::Suspending(_) => f.write_str("Invoker::Suspending"),
        }
    }
}

/// A callable plus the metadata needed to describe it as a tool.
#[derive(Debug, Clone)]
pub struct ToolFn {
    name: String,
    doc: Option<String>,
    signature: Signature,
    static_defaults: Map<String, Value>,
    validate: bool,
    invoker: Invoker,
}

impl ToolFn {
    pub fn builder(name: impl Into<String>) -> ToolFnBuilder {
        ToolFnBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn static_defaults(&self) -> &Map<String, Value> {
        &self.static_defaults
    }

    pub fn validates_arguments(&self) -> bool {
        self.validate
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }

    /// Rename the tool, e.g. when a toolset namespaces its members.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Builder for [`ToolFn`]; finished by [`sync`](Self::sync),
/// [`suspending`](Self::suspending) or [`handler`](Self::handler).
#[derive(Debug, Clone)]
pub struct ToolFnBuilder {
    name: String,
    doc: Option<String>,
    signature: Signature,
    static_defaults: Map<String, Value>,
    validate: bool,
}

impl ToolFnBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            signature: Signature::default(),
            static_defaults: Map::new(),
            validate: false,
        }
    }

    /// Documentation text; becomes the tool description.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// A required parameter typed by `T`.
    pub fn param<T: Describe + ?Sized>(self, name: impl Into<String>) -> Self {
        self.param_of(name, T::descriptor())
    }

    /// A required parameter with a human-readable description.
    pub fn param_described<T: Describe + ?Sized>(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.param_of(name, T::descriptor().described(description))
    }

    /// An optional parameter; `default` fills the gap when the model omits it.
    ///
    /// A default that cannot be serialized is recorded as `null`.
    pub fn param_with_default<T: Describe + ?Sized, D: Serialize>(
        mut self,
        name: impl Into<String>,
        default: D,
    ) -> Self {
        self.signature.params.push(Param {
            name: name.into(),
            kind: ParamKind::Named,
            descriptor: T::descriptor(),
            default: Some(serde_json::to_value(default).unwrap_or(Value::Null)),
        });
        self
    }

    /// A required parameter with an explicit descriptor.
    pub fn param_of(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.signature.params.push(Param {
            name: name.into(),
            kind: ParamKind::Named,
            descriptor,
            default: None,
        });
        self
    }

    /// An explicit descriptor with an optional default.
    pub fn param_of_with_default(
        mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
        default: Value,
    ) -> Self {
        self.signature.params.push(Param {
            name: name.into(),
            kind: ParamKind::Named,
            descriptor,
            default: Some(default),
        });
        self
    }

    /// Declare the implicit receiver (e.g. `self` of a toolset method).
    ///
    /// The receiver always comes first, whenever it is declared.
    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.signature.params.insert(0, Param {
            name: name.into(),
            kind: ParamKind::Receiver,
            descriptor: TypeDescriptor::Any,
            default: None,
        });
        self
    }

    pub fn variadic_positional(mut self, name: impl Into<String>) -> Self {
        self.signature.params.push(Param {
            name: name.into(),
            kind: ParamKind::VarPositional,
            descriptor: TypeDescriptor::Sequence(None),
            default: None,
        });
        self
    }

    /// Accept keyword arguments beyond the declared parameters.
    pub fn variadic_keyword(mut self, name: impl Into<String>) -> Self {
        self.signature.params.push(Param {
            name: name.into(),
            kind: ParamKind::VarKeyword,
            descriptor: TypeDescriptor::Map(None),
            default: None,
        });
        self
    }

    /// Static defaults merged under every call's arguments.
    pub fn defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.static_defaults = defaults;
        self
    }

    pub fn default_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.static_defaults.insert(name.into(), value.into());
        self
    }

    /// Check merged arguments against the parameter schema before invoking.
    pub fn validate(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Finish with a blocking body.
    pub fn sync<F, R>(self, f: F) -> ToolFn
    where
        F: Fn(CallArgs) -> CallResult<R> + Send + Sync + 'static,
        R: Serialize,
    {
        let body: Arc<BlockingBody> = Arc::new(move |args| f(args).and_then(to_value));
        self.finish(Invoker::Blocking(body))
    }

    /// Finish with a suspending body.
    pub fn suspending<F, Fut, R>(self, f: F) -> ToolFn
    where
        F: Fn(CallArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallResult<R>> + Send + 'static,
        R: Serialize + 'static,
    {
        self.finish(Invoker::Suspending(Arc::new(FnHandler {
            f,
            _marker: PhantomData,
        })))
    }

    /// Finish with a handler implementation.
    pub fn handler(self, handler: Arc<dyn ToolHandler>) -> ToolFn {
        self.finish(Invoker::Suspending(handler))
    }

    fn finish(self, invoker: Invoker) -> ToolFn {
        ToolFn {
            name: self.name,
            doc: self.doc,
            signature: self.signature,
            static_defaults: self.static_defaults,
            validate: self.validate,
            invoker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signature_tracks_parameter_kinds() {
        let tool = ToolFn::builder("search")
            .doc("Search.")
            .receiver("self")
            .param::<String>("query")
            .param_with_default::<u32, _>("limit", 10)
            .variadic_positional("args")
            .variadic_keyword("kwargs")
            .sync(|_args| Ok(Value::Null));

        let names: Vec<&str> = tool.signature().named().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["query", "limit"]);
        assert!(tool.signature().accepts_extra_keywords());
        assert!(tool.signature().params[1].is_required());
        assert!(!tool.signature().params[2].is_required());
        assert_eq!(tool.signature().params[2].default, Some(json!(10)));
    }

    #[tokio::test]
    async fn test_suspending_body_serializes_result() {
        let tool = ToolFn::builder("echo")
            .doc("Echo.")
            .param::<String>("text")
            .suspending(|args: CallArgs| async move { Ok::<_, BoxError>(args.get::<String>("text")?) });

        let Invoker::Suspending(handler) = tool.invoker() else {
            panic!("expected a suspending body");
        };
        let out = handler
            .call(CallArgs::from_value("echo", json!({"text": "hi"})))
            .await
            .unwrap();
        assert_eq!(out, json!("hi"));
    }
}
