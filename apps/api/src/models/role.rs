use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TextNormalizer;

/// A job role: unique name, raw description, and its normalized form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleDescription {
    pub name: String,
    pub raw_text: String,
    pub cleaned_text: String,
}

impl RoleDescription {
    pub fn new(
        name: impl Into<String>,
        raw_text: impl Into<String>,
        normalizer: &TextNormalizer,
    ) -> Self {
        let raw_text = raw_text.into();
        let cleaned_text = normalizer.normalize(&raw_text);
        Self {
            name: name.into(),
            raw_text,
            cleaned_text,
        }
    }
}

/// A candidate resume after text extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeDocument {
    pub raw_text: String,
    pub cleaned_text: String,
}

impl ResumeDocument {
    pub fn new(raw_text: impl Into<String>, normalizer: &TextNormalizer) -> Self {
        let raw_text = raw_text.into();
        let cleaned_text = normalizer.normalize(&raw_text);
        Self {
            raw_text,
            cleaned_text,
        }
    }
}

/// Insertion-ordered set of roles keyed by name.
///
/// Iteration order is load order, which decides best-match ties.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleCatalog {
    roles: Vec<RoleDescription>,
}

impl RoleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a role. An existing name keeps its position and gets the new
    /// text; the replaced role is returned.
    pub fn insert(&mut self, role: RoleDescription) -> Option<RoleDescription> {
        match self.roles.iter_mut().find(|r| r.name == role.name) {
            Some(existing) => Some(std::mem::replace(existing, role)),
            None => {
                self.roles.push(role);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RoleDescription> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleDescription> {
        self.roles.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_description_derives_cleaned_text() {
        let n = TextNormalizer::default();
        let role = RoleDescription::new("Data Scientist", "Python & Machine-Learning!", &n);
        assert_eq!(role.cleaned_text, "python machinelearning");
        assert_eq!(role.raw_text, "Python & Machine-Learning!");
    }

    #[test]
    fn test_catalog_keeps_insertion_order() {
        let n = TextNormalizer::default();
        let mut catalog = RoleCatalog::new();
        catalog.insert(RoleDescription::new("B", "beta", &n));
        catalog.insert(RoleDescription::new("A", "alpha", &n));
        assert_eq!(catalog.names(), vec!["B", "A"]);
    }

    #[test]
    fn test_catalog_duplicate_replaces_in_place() {
        let n = TextNormalizer::default();
        let mut catalog = RoleCatalog::new();
        catalog.insert(RoleDescription::new("A", "first", &n));
        catalog.insert(RoleDescription::new("B", "beta", &n));
        let replaced = catalog.insert(RoleDescription::new("A", "second", &n));

        assert_eq!(replaced.map(|r| r.raw_text), Some("first".to_string()));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["A", "B"]);
        assert_eq!(catalog.get("A").map(|r| r.raw_text.as_str()), Some("second"));
    }
}
