//! Query compiler: builder state → Cypher text
//!
//! Stages run strictly forward over an immutable snapshot:
//!
//! 1. alias resolution (`alias_resolver`)
//! 2. pattern classification and `MATCH` rendering (`pattern_builder`)
//! 3. `WHERE` rendering (`condition_builder`)
//! 4. overall shape: row limit or primary-entity limit (`limit_strategy`)
//! 5. `RETURN` (`projection_builder`) or `SET ... RETURN` (`update_builder`)
//!
//! Compilation is pure. The same state always produces byte-identical text,
//! and a `QueryCompiler` can be shared across threads.

use serde::Serialize;

use crate::config::CompilerConfig;
use crate::query_builder::QueryBuilderState;

mod alias_resolver;
pub mod common;
mod compile_ctx;
mod condition_builder;
pub mod errors;
mod limit_strategy;
mod pattern_builder;
mod projection_builder;
mod update_builder;


pub use alias_resolver::AliasTable;
pub use condition_builder::render_condition;
pub use errors::CompileError;
pub use pattern_builder::effective_match_type;
pub use update_builder::format_value;

use compile_ctx::CompileContext;
use limit_strategy::QueryShape;

#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    config: CompilerConfig,
}

impl QueryCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile a builder snapshot into a read query.
    pub fn compile(&self, state: &QueryBuilderState) -> String {
        let ctx = CompileContext::new(state, &self.config);
        let clauses = match limit_strategy::choose_shape(&ctx) {
            QueryShape::Rows { limit } => limit_strategy::build_rows_query(&ctx, limit),
            QueryShape::Nodes { primary, limit } => {
                limit_strategy::build_nodes_query(&ctx, primary, limit)
            }
        };
        let query = clauses.join(ctx.separator());
        log::debug!("compiled query: {}", query);
        query
    }

    /// Compile a builder snapshot plus property assignments into an update.
    ///
    /// `updates` is applied in iteration order, so pass an ordered collection
    /// (a `Vec`, a `BTreeMap` or a `serde_json::Map`) when the output must be
    /// reproducible.
    ///
    /// # Errors
    /// - [`CompileError::TargetAliasNotFound`] when `target_alias` is not bound
    ///   by any rendered node
    /// - [`CompileError::UnserializableValue`] when a value cannot be serialized
    pub fn compile_update<I, K, V>(
        &self,
        state: &QueryBuilderState,
        target_alias: &str,
        updates: I,
    ) -> Result<String, CompileError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let ctx = CompileContext::new(state, &self.config);
        update_builder::ensure_target_bound(&ctx, target_alias)?;
        let updates = update_builder::collect_updates(updates)?;
        let clauses = update_builder::build_update_query(&ctx, target_alias, &updates)?;
        let query = clauses.join(ctx.separator());
        log::debug!("compiled update: {}", query);
        Ok(query)
    }
}

/// Compile with the default configuration.
pub fn compile_query(state: &QueryBuilderState) -> String {
    QueryCompiler::default().compile(state)
}

/// Compile an update with the default configuration.
pub fn compile_update_query<I, K, V>(
    state: &QueryBuilderState,
    target_alias: &str,
    updates: I,
) -> Result<String, CompileError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Serialize,
{
    QueryCompiler::default().compile_update(state, target_alias, updates)
}
