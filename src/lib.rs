//! cypher-studio - query compiler for a graph modeling studio
//!
//! This crate turns the state of the studio's visual query builder into
//! Cypher:
//! - Builder model (nodes, relationships, conditions, projection, limit)
//! - Alias resolution and pattern classification
//! - `WHERE` rendering with type-driven literal formatting
//! - Row limits or primary-entity limits
//! - Update statements (`SET ... RETURN`)

pub mod config;
pub mod query_builder;
pub mod query_compiler;

pub use config::CompilerConfig;
pub use query_builder::{
    ConditionType, IdSequence, LimitMode, MatchType, QueryBuilderState, QueryCondition,
    QueryNode, QueryRelationship,
};
pub use query_compiler::{compile_query, compile_update_query, CompileError, QueryCompiler};
