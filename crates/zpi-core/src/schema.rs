//! Directory schema mappings
//!
//! Names of the object classes and attributes the inspector reads. The
//! defaults match a stock Zimbra directory.

use crate::types::ListKind;
use serde::{Deserialize, Serialize};

/// Object class and attribute names used during derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchemaMappings {
    /// Attribute holding the object classes
    #[serde(default = "default_object_class_attr")]
    pub object_class: String,

    /// Marker class of dynamic groups
    #[serde(default = "default_dynamic_group_class")]
    pub dynamic_group_class: String,

    /// Marker class of static distribution lists
    #[serde(default = "default_static_list_class")]
    pub static_list_class: String,

    /// Marker class of person (account) entries
    #[serde(default = "default_person_class")]
    pub person_class: String,

    /// Primary key attribute of dynamic groups
    #[serde(default = "default_dynamic_key")]
    pub dynamic_key: String,

    /// Primary key attribute of static lists
    #[serde(default = "default_static_key")]
    pub static_key: String,

    /// Access control entry attribute
    #[serde(default = "default_ace_attr")]
    pub ace: String,

    /// Unique internal identifier attribute
    #[serde(default = "default_identifier_attr")]
    pub identifier: String,

    /// Login name attribute
    #[serde(default = "default_login_attr")]
    pub login: String,
}

fn default_object_class_attr() -> String {
    "objectClass".to_string()
}

fn default_dynamic_group_class() -> String {
    "zimbraGroup".to_string()
}

fn default_static_list_class() -> String {
    "zimbraDistributionList".to_string()
}

fn default_person_class() -> String {
    "inetOrgPerson".to_string()
}

fn default_dynamic_key() -> String {
    "cn".to_string()
}

fn default_static_key() -> String {
    "uid".to_string()
}

fn default_ace_attr() -> String {
    "zimbraACE".to_string()
}

fn default_identifier_attr() -> String {
    "zimbraId".to_string()
}

fn default_login_attr() -> String {
    "uid".to_string()
}

impl Default for SchemaMappings {
    fn default() -> Self {
        Self {
            object_class: default_object_class_attr(),
            dynamic_group_class: default_dynamic_group_class(),
            static_list_class: default_static_list_class(),
            person_class: default_person_class(),
            dynamic_key: default_dynamic_key(),
            static_key: default_static_key(),
            ace: default_ace_attr(),
            identifier: default_identifier_attr(),
            login: default_login_attr(),
        }
    }
}

impl SchemaMappings {
    /// Marker object class for a list kind
    pub fn list_marker(&self, kind: ListKind) -> &str {
        match kind {
            ListKind::Dynamic => &self.dynamic_group_class,
            ListKind::Static => &self.static_list_class,
        }
    }

    /// Primary key attribute for a list kind
    pub fn list_key(&self, kind: ListKind) -> &str {
        match kind {
            ListKind::Dynamic => &self.dynamic_key,
            ListKind::Static => &self.static_key,
        }
    }

    /// Attributes to request from the directory, without duplicates
    pub fn requested_attributes(&self) -> Vec<String> {
        let mut attrs: Vec<String> = Vec::new();
        for attr in [
            &self.object_class,
            &self.dynamic_key,
            &self.static_key,
            &self.ace,
            &self.identifier,
            &self.login,
        ] {
            if !attrs.iter().any(|a| a.eq_ignore_ascii_case(attr)) {
                attrs.push(attr.clone());
            }
        }
        attrs
    }

    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("object_class", &self.object_class),
            ("dynamic_group_class", &self.dynamic_group_class),
            ("static_list_class", &self.static_list_class),
            ("person_class", &self.person_class),
            ("dynamic_key", &self.dynamic_key),
            ("static_key", &self.static_key),
            ("ace", &self.ace),
            ("identifier", &self.identifier),
            ("login", &self.login),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("Schema mapping '{}' must not be empty", name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_zimbra() {
        let schema = SchemaMappings::default();
        assert_eq!(schema.list_marker(ListKind::Dynamic), "zimbraGroup");
        assert_eq!(schema.list_marker(ListKind::Static), "zimbraDistributionList");
        assert_eq!(schema.list_key(ListKind::Dynamic), "cn");
        assert_eq!(schema.list_key(ListKind::Static), "uid");
    }

    #[test]
    fn test_requested_attributes_deduplicated() {
        let attrs = SchemaMappings::default().requested_attributes();
        assert_eq!(attrs, vec!["objectClass", "cn", "uid", "zimbraACE", "zimbraId"]);
    }

    #[test]
    fn test_partial_override_from_toml() {
        let schema: SchemaMappings = toml::from_str(r#"login = "mail""#).unwrap();
        assert_eq!(schema.login, "mail");
        assert_eq!(schema.ace, "zimbraACE");
    }

    #[test]
    fn test_validation_rejects_empty() {
        let schema = SchemaMappings {
            ace: " ".to_string(),
            ..Default::default()
        };
        assert!(schema.validate().is_err());
        assert!(SchemaMappings::default().validate().is_ok());
    }
}
