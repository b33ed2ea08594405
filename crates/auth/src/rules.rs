//! Route access rules
//!
//! Two lists drive request handling: a public allow-list the gate bypasses
//! entirely, and an ordered rule list (first match wins) checked by the
//! authorization middleware after the gate has run.

use axum::http::Method;

use crate::error::AuthError;
use crate::types::{Principal, Role};

/// Access required by a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    /// Any one of the listed roles
    Roles(Vec<Role>),
}

/// Optional method plus an Ant-style path pattern.
///
/// A trailing `/**` matches the prefix itself and anything below it;
/// any other pattern must match the path exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatcher {
    method: Option<Method>,
    pattern: String,
}

impl RouteMatcher {
    /// Match `pattern` for every method
    pub fn any(pattern: impl Into<String>) -> Self {
        Self {
            method: None,
            pattern: pattern.into(),
        }
    }

    pub fn method(method: Method, pattern: impl Into<String>) -> Self {
        Self {
            method: Some(method),
            pattern: pattern.into(),
        }
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        if let Some(required) = &self.method {
            if required != method {
                return false;
            }
        }
        path_matches(&self.pattern, path)
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
        None => pattern == path,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub matcher: RouteMatcher,
    pub access: Access,
}

/// Public allow-list plus ordered access rules
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    public: Vec<RouteMatcher>,
    rules: Vec<AccessRule>,
    fallback: Access,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            public: Vec::new(),
            rules: Vec::new(),
            fallback: Access::Public,
        }
    }
}

impl RoutePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route the gate lets through without looking at any token
    pub fn permit(mut self, matcher: RouteMatcher) -> Self {
        self.public.push(matcher);
        self
    }

    /// Append a rule; earlier rules take precedence
    pub fn rule(mut self, matcher: RouteMatcher, access: Access) -> Self {
        self.rules.push(AccessRule { matcher, access });
        self
    }

    /// Access for requests no rule matches
    pub fn fallback(mut self, access: Access) -> Self {
        self.fallback = access;
        self
    }

    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        self.public.iter().any(|m| m.matches(method, path))
    }

    pub fn required_access(&self, method: &Method, path: &str) -> &Access {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(method, path))
            .map(|rule| &rule.access)
            .unwrap_or(&self.fallback)
    }

    /// Missing principal on a protected route → 401, wrong role → 403
    pub fn authorize(
        &self,
        method: &Method,
        path: &str,
        principal: Option<&Principal>,
    ) -> Result<(), AuthError> {
        match (self.required_access(method, path), principal) {
            (Access::Public, _) => Ok(()),
            (_, None) => Err(AuthError::MissingAuthorization),
            (Access::Authenticated, Some(_)) => Ok(()),
            (Access::Roles(roles), Some(principal)) => {
                if principal.has_any_role(roles) {
                    Ok(())
                } else {
                    Err(AuthError::InsufficientRole)
                }
            }
        }
    }
}
