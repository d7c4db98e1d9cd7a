//! Title identity resolution.
//!
//! The orchestrator builds both icon paths from a runtime title
//! identifier. The only contract the core places on the resolver is that
//! it returns a non-empty string.

/// Supplies the runtime title identifier used to build both icon paths.
pub trait IdentityResolver {
    /// Resolve the title identifier.
    fn resolve(&self) -> String;
}

/// A resolver that always returns a fixed, known title identifier.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    title_id: String,
}

impl FixedIdentity {
    /// Create a resolver for the given title identifier.
    pub fn new(title_id: impl Into<String>) -> Self {
        Self {
            title_id: title_id.into(),
        }
    }
}

impl IdentityResolver for FixedIdentity {
    fn resolve(&self) -> String {
        self.title_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_identity_resolves() {
        let identity = FixedIdentity::new("CUSA01234");
        assert_eq!(identity.resolve(), "CUSA01234");
    }

    #[test]
    fn fixed_identity_can_be_empty() {
        // Validation happens at path resolution, not here.
        let identity = FixedIdentity::new("");
        assert!(identity.resolve().is_empty());
    }
}
