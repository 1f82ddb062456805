//! Newtype identifiers and secrets.
//!
//! Names that the panel uses to address a resource are represented as distinct
//! newtypes wrapping a `String`. This prevents accidentally interchanging a
//! [`ProjectName`] with a [`ServiceName`] when composing a [`ServiceId`] for the
//! log stream.
//!
//! Tokens get their own newtypes so that they never show up in `Debug` output
//! (and therefore never in `tracing` fields).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped names.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for String-wrapped secrets.
// Same shape as `string_id!`, but `Debug` is redacted and there is no Display.
// ---------------------------------------------------------------------------
macro_rules! secret {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a secret value, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Exposes the secret. Only call this at the wire boundary.
            pub fn expose(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

string_id! {
    /// Name of a project, the top-level grouping for services.
    ProjectName
}

string_id! {
    /// Name of a service within a project.
    ServiceName
}

/// The panel-wide identifier of a service: `<project>_<service>`.
///
/// This is the form Docker Swarm uses for the service and the form the log
/// stream expects in its `service` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceId(String);

impl ServiceId {
    /// Composes the identifier from its project and service parts.
    pub fn new(project: &ProjectName, service: &ServiceName) -> Self {
        Self(format!("{}_{}", project.as_str(), service.as_str()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

secret! {
    /// The API token sent verbatim in the `Authorization` header of every request.
    AuthToken
}

secret! {
    /// A service's short-lived deploy token, used to authorise a log stream.
    ///
    /// Returned in the `token` field of an inspected service.
    DeployToken
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_names_are_rejected() {
        assert!(ProjectName::new("").is_none());
        assert!(ServiceName::new("").is_none());
        assert!(AuthToken::new("").is_none());
    }

    #[test]
    fn service_id_joins_project_and_service() {
        let project = ProjectName::new("myproj").unwrap();
        let service = ServiceName::new("web").unwrap();
        assert_eq!(ServiceId::new(&project, &service).as_str(), "myproj_web");
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let token = AuthToken::new("super-secret").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(rendered, "AuthToken(<redacted>)");
        assert_eq!(token.expose(), "super-secret");
    }

    #[test]
    fn names_serialize_as_plain_strings() {
        let name = ProjectName::new("proj").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""proj""#);
    }
}
