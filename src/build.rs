//! Build orchestrator: the public entry point that turns a clause tree into
//! query text plus a parameter map.

use crate::ast::node::{compile_fragment, root_of, AsAstNode, DynNode};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token joining labels in a multi-label expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelConjunction {
    /// `(n:A:B)`
    #[default]
    Colon,
    /// `(n:A&B)`
    Ampersand,
}

impl LabelConjunction {
    pub(crate) fn token(self) -> &'static str {
        match self {
            LabelConjunction::Colon => ":",
            LabelConjunction::Ampersand => "&",
        }
    }
}

/// Build-time configuration, read-only for the duration of one build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Prepended to every auto-generated name; the combined name is escaped
    /// once.
    pub name_prefix: Option<String>,
    /// When set, the query is prefixed with a `CYPHER <version>` directive
    /// line.
    pub dialect_version: Option<String>,
    pub label_conjunction: LabelConjunction,
    pub disable_label_escaping: bool,
    pub disable_relationship_type_escaping: bool,
    /// Merged into the output parameter map after collection; these keys win
    /// on conflict.
    pub extra_parameters: Map<String, Value>,
}

/// Compiled statement: query text plus every parameter the text references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildResult {
    pub query: String,
    pub parameters: Map<String, Value>,
}

/// Build from any clause handle; the chain's root is resolved first, so
/// building from the last clause of a chain compiles the whole statement.
pub fn build(clause: &dyn AsAstNode, config: &BuildConfig) -> Result<BuildResult, CompileError> {
    build_node(clause.as_dyn_node(), config)
}

pub(crate) fn build_node(
    node: DynNode,
    config: &BuildConfig,
) -> Result<BuildResult, CompileError> {
    let root = root_of(&node)?;
    let mut env = CompileEnv::new(config);
    let body = root.compile(&mut env)?;
    let query = match config.dialect_version.as_deref() {
        Some(version) if !version.is_empty() => format!("CYPHER {}\n{}", version, body),
        _ => body,
    };
    env.add_extra_parameters(config.extra_parameters.clone());
    let parameters = env.collect_parameters();
    log::debug!(
        "compiled query ({} chars, {} parameters)",
        query.len(),
        parameters.len()
    );
    Ok(BuildResult { query, parameters })
}

/// Best-effort rendering for inspection. Fragments that fail to compile are
/// replaced with an inline error marker; this path never fails and is never
/// used for the authoritative build.
pub fn debug_render(clause: &dyn AsAstNode) -> String {
    debug_render_node(clause.as_dyn_node())
}

pub(crate) fn debug_render_node(node: DynNode) -> String {
    let root = match root_of(&node) {
        Ok(root) => root,
        Err(err) => return format!("<compile error: {}>", err),
    };
    let mut env = CompileEnv::lenient(&BuildConfig::default());
    compile_fragment(&root, &mut env)
        .unwrap_or_else(|err| format!("<compile error: {}>", err))
}
