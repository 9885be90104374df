use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::OutputError;

/// Attributes reported for a resource once it has been created.
pub type Attributes = BTreeMap<String, String>;

/// A string value that may only become known after the resource it is read
/// from has been created by the reconciliation engine.
///
/// Pending values are never read eagerly. Composition (`concat`, `or_default`)
/// builds a new dependent value which resolves once every part it refers to
/// has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Known at declaration time.
    Known(String),
    /// Attribute of another resource in the same stack.
    Attribute {
        resource: String,
        attribute: String,
        /// Used when the resource exists but does not report the attribute.
        default: Option<String>,
    },
    /// Concatenation of several values.
    Concat(Vec<Output>),
}

/// Snapshot of whether an output can be read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputState {
    Resolved(String),
    Pending { waiting_on: Vec<String> },
}

impl Output {
    pub fn known(value: impl Into<String>) -> Self {
        Output::Known(value.into())
    }

    pub fn attribute(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Output::Attribute {
            resource: resource.into(),
            attribute: attribute.into(),
            default: None,
        }
    }

    /// Concatenates the given parts. Adjacent known parts are merged so a
    /// concatenation of only known values is itself known.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Output>,
    {
        let mut flat = Vec::new();
        for part in parts {
            part.flatten_into(&mut flat);
        }
        let mut merged: Vec<Output> = Vec::with_capacity(flat.len());
        for part in flat {
            if let Output::Known(next) = &part {
                if let Some(Output::Known(prev)) = merged.last_mut() {
                    prev.push_str(next);
                    continue;
                }
            }
            merged.push(part);
        }
        match merged.len() {
            0 => Output::Known(String::new()),
            1 => merged.remove(0),
            _ => Output::Concat(merged),
        }
    }

    fn flatten_into(self, out: &mut Vec<Output>) {
        match self {
            Output::Concat(inner) => inner.into_iter().for_each(|p| p.flatten_into(out)),
            other => out.push(other),
        }
    }

    /// Substitutes `default` for an attribute the resource does not report,
    /// instead of leaving the value undefined.
    pub fn or_default(self, default: impl Into<String>) -> Self {
        let default = default.into();
        match self {
            Output::Attribute {
                resource,
                attribute,
                ..
            } => Output::Attribute {
                resource,
                attribute,
                default: Some(default),
            },
            Output::Concat(parts) => Output::Concat(
                parts
                    .into_iter()
                    .map(|p| p.or_default(default.clone()))
                    .collect(),
            ),
            known => known,
        }
    }

    /// Names of the resources this value waits on, in first-seen order.
    pub fn references(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            Output::Known(_) => {}
            Output::Attribute { resource, .. } => {
                if !refs.contains(&resource.as_str()) {
                    refs.push(resource);
                }
            }
            Output::Concat(parts) => parts.iter().for_each(|p| p.collect_references(refs)),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Output::Known(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Output::Known(value) => Some(value),
            _ => None,
        }
    }

    pub fn state(&self) -> OutputState {
        match self {
            Output::Known(value) => OutputState::Resolved(value.clone()),
            _ => OutputState::Pending {
                waiting_on: self.references().into_iter().map(String::from).collect(),
            },
        }
    }

    /// Resolves every attribute whose resource `lookup` knows about. Parts
    /// referring to resources that do not exist yet stay pending.
    pub fn resolve<'a, F>(&self, lookup: &F) -> Result<Output, OutputError>
    where
        F: Fn(&str) -> Option<&'a Attributes>,
    {
        match self {
            Output::Known(_) => Ok(self.clone()),
            Output::Attribute {
                resource,
                attribute,
                default,
            } => match lookup(resource) {
                None => Ok(self.clone()),
                Some(attributes) => match (attributes.get(attribute), default) {
                    (Some(value), _) => Ok(Output::Known(value.clone())),
                    (None, Some(default)) => Ok(Output::Known(default.clone())),
                    (None, None) => Err(OutputError::MissingAttribute {
                        resource: resource.clone(),
                        attribute: attribute.clone(),
                    }),
                },
            },
            Output::Concat(parts) => {
                let resolved = parts
                    .iter()
                    .map(|p| p.resolve(lookup))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Output::concat(resolved))
            }
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Known(value) => f.write_str(value),
            Output::Attribute {
                resource,
                attribute,
                ..
            } => write!(f, "${{{}.{}}}", resource, attribute),
            Output::Concat(parts) => parts.iter().try_for_each(|p| write!(f, "{}", p)),
        }
    }
}

impl From<&str> for Output {
    fn from(value: &str) -> Self {
        Output::Known(value.to_string())
    }
}

impl From<String> for Output {
    fn from(value: String) -> Self {
        Output::Known(value)
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Only known values can come from a manifest.
impl<'de> Deserialize<'de> for Output {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Output::Known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_concat_of_known_values_is_known() {
        let out = Output::concat(vec![
            Output::known("europe-west1"),
            Output::known("-docker.pkg.dev/"),
            Output::known("my-project"),
        ]);
        assert_eq!(out, Output::known("europe-west1-docker.pkg.dev/my-project"));
        assert!(out.is_resolved());
    }

    #[test]
    fn test_concat_flattens_nested_concat() {
        let repo = Output::concat(vec![
            Output::known("host/"),
            Output::attribute("repo", "repository_id"),
        ]);
        let image = Output::concat(vec![repo, Output::known("/api")]);
        assert_eq!(
            image,
            Output::Concat(vec![
                Output::known("host/"),
                Output::attribute("repo", "repository_id"),
                Output::known("/api"),
            ])
        );
        assert_eq!(image.to_string(), "host/${repo.repository_id}/api");
    }

    #[test]
    fn test_pending_state_lists_references_once() {
        let out = Output::concat(vec![
            Output::attribute("a", "x"),
            Output::known("-"),
            Output::attribute("b", "y"),
            Output::attribute("a", "z"),
        ]);
        assert_eq!(
            out.state(),
            OutputState::Pending {
                waiting_on: vec!["a".to_string(), "b".to_string()]
            }
        );
        assert_eq!(out.value(), None);
    }

    #[test]
    fn test_resolve_leaves_unknown_resources_pending() {
        let a = attrs(&[("x", "1")]);
        let out = Output::concat(vec![Output::attribute("a", "x"), Output::attribute("b", "y")]);
        let resolved = out
            .resolve(&|name: &str| if name == "a" { Some(&a) } else { None })
            .unwrap();
        assert_eq!(
            resolved,
            Output::Concat(vec![Output::known("1"), Output::attribute("b", "y")])
        );
    }

    #[test]
    fn test_resolve_missing_attribute_uses_default() {
        let image = attrs(&[]);
        let digest = Output::attribute("image", "repo_digest").or_default("");
        let resolved = digest.resolve(&|_: &str| Some(&image)).unwrap();
        assert_eq!(resolved, Output::known(""));
    }

    #[test]
    fn test_resolve_missing_attribute_without_default_fails() {
        let service = attrs(&[]);
        let url = Output::attribute("service", "url");
        let err = url.resolve(&|_: &str| Some(&service)).unwrap_err();
        assert!(matches!(err, OutputError::MissingAttribute { .. }));
    }

    #[test]
    fn test_serializes_as_interpolated_string() {
        let out = Output::concat(vec![
            Output::known("https://"),
            Output::attribute("svc", "url"),
        ]);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json, serde_json::json!("https://${svc.url}"));
    }
}
