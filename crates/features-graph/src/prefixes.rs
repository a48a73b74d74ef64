//! Namespace prefix bindings for compact IRI display.

use std::collections::BTreeMap;

use crate::vocab::DEFAULT_PREFIXES;

/// Prefix → namespace IRI bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: BTreeMap<String, String>,
}

impl PrefixMap {
    /// A map holding the well-known vocabulary prefixes.
    pub fn with_defaults() -> Self {
        let mut map = Self::default();
        for (prefix, iri) in DEFAULT_PREFIXES {
            map.bind(*prefix, *iri);
        }
        map
    }

    /// Bind a prefix, replacing any previous binding of the same prefix.
    pub fn bind(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Add every binding of `other`, letting `other` win on conflicts.
    pub fn extend(&mut self, other: &PrefixMap) {
        for (prefix, iri) in &other.prefixes {
            self.bind(prefix.clone(), iri.clone());
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// `prefix:local` for an IRI, using the longest matching namespace.
    ///
    /// Falls back to `<iri>` when no binding matches or the local part is
    /// not a plain name.
    pub fn compact(&self, iri: &str) -> String {
        let best = self
            .prefixes
            .iter()
            .filter(|(_, ns)| !ns.is_empty() && iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len());

        if let Some((prefix, ns)) = best {
            let local = &iri[ns.len()..];
            if local
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
                && !local.ends_with('.')
            {
                return format!("{}:{}", prefix, local);
            }
        }
        format!("<{}>", iri)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, i)| (p.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
