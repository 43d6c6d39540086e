use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    #[error("Alias '{alias}' is not bound by the query (available: {})", .available.join(", "))]
    TargetAliasNotFound {
        alias: String,
        available: Vec<String>,
    },

    #[error("Value for property '{property}' cannot be serialized: {reason}")]
    UnserializableValue { property: String, reason: String },
}

impl CompileError {
    pub fn target_alias_not_found(alias: impl Into<String>, available: &[String]) -> Self {
        CompileError::TargetAliasNotFound {
            alias: alias.into(),
            available: available.to_vec(),
        }
    }

    pub fn unserializable_value(
        property: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        CompileError::UnserializableValue {
            property: property.into(),
            reason: reason.to_string(),
        }
    }
}
