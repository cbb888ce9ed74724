//! `[[objects]]` entries - owning objects a key can point at.
//!
//! ```toml
//! [[objects]]
//! type = "flatpages.flatpage"
//! canonical_url = "/pages/{id}/"
//! ids = [1, 2, 3]
//!
//! [[objects]]
//! type = "sites.site"      # no canonical_url: cannot be mapped to
//! ids = [1]
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::object::{ContentType, ObjectId, ObjectRegistry, ObjectTable, ParseContentTypeError};

/// Objects of one content type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "objects")]
pub struct ObjectConfig {
    /// Content type, written app_label.model.
    #[serde(rename = "type")]
    #[config(name = "type")]
    pub content_type: String,

    /// Canonical URL template; `{id}` is replaced by the object id.
    pub canonical_url: Option<String>,

    /// Ids of the objects that exist.
    pub ids: Vec<ObjectId>,
}

impl ObjectConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(e) = self.content_type.parse::<ContentType>() {
            diag.error_with_hint(
                Self::FIELDS.content_type,
                e.to_string(),
                "write content types as app_label.model, e.g. \"flatpages.flatpage\"",
            );
        }
        if let Some(template) = &self.canonical_url
            && !template.contains("{id}")
        {
            diag.warn(
                Self::FIELDS.canonical_url,
                format!("`{template}` has no {{id}} placeholder, every object shares one URL"),
            );
        }
    }

    fn table(&self) -> ObjectTable {
        let table = ObjectTable::new(self.ids.iter().copied());
        match &self.canonical_url {
            Some(template) => table.with_canonical_url(template.clone()),
            None => table,
        }
    }
}

/// Build the object registry. Entries for the same type are merged.
pub fn object_registry(objects: &[ObjectConfig]) -> Result<ObjectRegistry, ParseContentTypeError> {
    let mut merged: Vec<(ContentType, ObjectConfig)> = Vec::new();
    for object in objects {
        let content_type: ContentType = object.content_type.parse()?;
        match merged.iter_mut().find(|(ct, _)| *ct == content_type) {
            Some((_, existing)) => {
                existing.ids.extend(object.ids.iter().copied());
                if existing.canonical_url.is_none() {
                    existing.canonical_url.clone_from(&object.canonical_url);
                }
            }
            None => merged.push((content_type, object.clone())),
        }
    }

    Ok(merged
        .into_iter()
        .fold(ObjectRegistry::new(), |registry, (ct, object)| {
            registry.with(ct, object.table())
        }))
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::object::ObjectRef;

    use super::*;

    #[test]
    fn test_objects_parse() {
        let config = test_parse_config(
            "[[objects]]\ntype = \"flatpages.flatpage\"\ncanonical_url = \"/pages/{id}/\"\nids = [1, 2]\n\n[[objects]]\ntype = \"sites.site\"\nids = [1]",
        );
        assert_eq!(config.objects.len(), 2);
        assert_eq!(config.objects[0].content_type, "flatpages.flatpage");

        let registry = object_registry(&config.objects).unwrap();
        let page = ObjectRef {
            content_type: ContentType::new("flatpages", "flatpage"),
            id: 2,
        };
        assert_eq!(registry.canonical_url(&page).as_deref(), Some("/pages/2/"));
        assert!(!registry.has_canonical_url(&ContentType::new("sites", "site")));
    }

    #[test]
    fn test_objects_merge_same_type() {
        let objects = [
            ObjectConfig {
                content_type: "flatpages.flatpage".into(),
                canonical_url: None,
                ids: vec![1],
            },
            ObjectConfig {
                content_type: "FlatPages.FlatPage".into(),
                canonical_url: Some("/pages/{id}/".into()),
                ids: vec![2],
            },
        ];
        let registry = object_registry(&objects).unwrap();
        let ct = ContentType::new("flatpages", "flatpage");
        assert_eq!(registry.content_types(), [&ct]);
        assert!(registry.exists(&ObjectRef { content_type: ct.clone(), id: 1 }));
        assert!(registry.has_canonical_url(&ct));
    }

    #[test]
    fn test_object_validate() {
        let object = ObjectConfig {
            content_type: "flatpage".into(),
            canonical_url: Some("/pages/".into()),
            ids: vec![1],
        };
        let mut diag = ConfigDiagnostics::new();
        object.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "objects.type");
        assert_eq!(diag.warnings().len(), 1);
        assert!(object_registry(&[object]).is_err());
    }
}
