//! Requester capabilities passed explicitly into mutation calls.
//!
//! How a capability set is obtained (bearer token lookup, tests, the admin CLI)
//! is outside the domain; the domain only asks whether a capability is present.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A single permission understood by the url mutation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Create,
    Delete,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Create, Capability::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Create => "create",
            Capability::Delete => "delete",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Capability::Create),
            "delete" => Ok(Capability::Delete),
            other => Err(format!("unknown capability '{}'", other)),
        }
    }
}

/// The set of capabilities held by the current requester.
///
/// The default value is the empty set (anonymous requester).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<Capability>);

impl Capabilities {
    /// No capabilities at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every capability.
    pub fn all() -> Self {
        Self(Capability::ALL.into_iter().collect())
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn can_create(&self) -> bool {
        self.can(Capability::Create)
    }

    pub fn can_delete(&self) -> bool {
        self.can(Capability::Delete)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Builds a capability set from stored names, skipping names it does not know.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .filter_map(|name| name.as_ref().parse().ok())
                .collect(),
        )
    }

    /// Capability names in stable order, as persisted alongside API tokens.
    pub fn to_names(&self) -> Vec<String> {
        self.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_grants_nothing() {
        let caps = Capabilities::none();
        assert!(caps.is_empty());
        assert!(!caps.can_create());
        assert!(!caps.can_delete());
    }

    #[test]
    fn test_all_grants_everything() {
        let caps = Capabilities::all();
        assert!(caps.can_create());
        assert!(caps.can_delete());
    }

    #[test]
    fn test_from_names_skips_unknown() {
        let caps = Capabilities::from_names(["create", "publish", " DELETE "]);
        assert!(caps.can_create());
        assert!(caps.can_delete());
        assert_eq!(caps.to_names(), vec!["create", "delete"]);
    }

    #[test]
    fn test_parse_capability() {
        assert_eq!("create".parse::<Capability>(), Ok(Capability::Create));
        assert!("admin".parse::<Capability>().is_err());
    }

    #[test]
    fn test_collect_from_iterator() {
        let caps: Capabilities = [Capability::Delete].into_iter().collect();
        assert!(!caps.can_create());
        assert!(caps.can_delete());
    }
}
