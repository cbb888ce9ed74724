//! Administrative commands: set and remove stored mappings.
//!
//! `set` applies the editing rules on top of record validation: the mapping
//! kind must be allowed and object mappings may only use selectable content
//! types.

use anyhow::{Context, Result, bail};

use super::SetArgs;
use crate::engine::{PutError, UrlMapper};
use crate::log;
use crate::mapping::{MappingKind, MappingRecord, ValidationError};
use crate::object::{ContentType, ObjectId};

/// Parse `TYPE:ID`, e.g. `flatpages.flatpage:1`.
fn parse_object(text: &str) -> Result<(ContentType, ObjectId)> {
    let (content_type, id) = text
        .rsplit_once(':')
        .with_context(|| format!("'{text}' is not in the form TYPE:ID"))?;
    let content_type: ContentType = content_type.parse()?;
    let id: ObjectId = id
        .trim()
        .parse()
        .with_context(|| format!("'{id}' is not a valid object id"))?;
    Ok((content_type, id))
}

/// Build the record described by the arguments.
pub fn record_from_args(args: &SetArgs) -> Result<MappingRecord> {
    let record = MappingRecord::new(args.key.clone());
    Ok(match (&args.url, &args.object, &args.route) {
        (Some(url), None, None) => record.with_url(url.clone()),
        (None, Some(object), None) => {
            let (content_type, id) = parse_object(object)?;
            record.with_object(content_type, id)
        }
        (None, None, Some(route)) => {
            record.with_route(route.clone(), args.params.clone().unwrap_or_default())
        }
        _ => bail!("supply exactly one of --url, --object or --route"),
    })
}

/// Check the editing rules that sit above record validation.
pub fn check_editable(mapper: &UrlMapper, record: &MappingRecord) -> Result<()> {
    let registry = mapper.registry();

    if let Some(kind) = record.mapping_kind()
        && !registry.allows(kind)
    {
        let allowed: Vec<_> = registry.allowed_kinds().iter().map(MappingKind::as_str).collect();
        bail!(
            "{} mappings are not allowed (allowed: {})",
            kind.label(),
            allowed.join(", ")
        );
    }

    if let Some(content_type) = &record.content_type
        && !registry.content_type_selectable(content_type)
    {
        bail!("content type `{content_type}` is not selectable for object mappings");
    }

    Ok(())
}

/// Validate and store a mapping.
pub fn set_mapping(mapper: &UrlMapper, args: &SetArgs) -> Result<()> {
    let record = record_from_args(args)?;
    check_editable(mapper, &record)?;

    let key = record.key.clone();
    match mapper.put(record.clone()) {
        Ok(()) => {
            log!("saved"; "{}", record.describe(mapper.env()));
            Ok(())
        }
        Err(PutError::Validation(e @ ValidationError::InvalidKey(_))) => {
            bail!("{e} (choices: {})", mapper.key_choices().join(", "))
        }
        Err(PutError::Validation(e)) => {
            Err(e).with_context(|| format!("Invalid mapping for '{key}'"))
        }
        Err(PutError::Store(e)) => Err(e).context("Failed to save mapping"),
    }
}

/// Delete a mapping; a missing mapping is only reported.
pub fn remove_mapping(mapper: &UrlMapper, key: &str) -> Result<()> {
    if mapper
        .remove(key)
        .with_context(|| format!("Failed to remove mapping '{key}'"))?
    {
        log!("store"; "removed {}", key);
    } else {
        log!("store"; "no stored mapping for {}", key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::object::{ObjectRegistry, ObjectTable};
    use crate::registry::{FunctionMap, Registry, RegistrySettings};
    use crate::route::RouteTable;
    use crate::store::MemoryStore;

    fn args(key: &str) -> SetArgs {
        SetArgs {
            key: key.into(),
            url: None,
            object: None,
            route: None,
            params: None,
        }
    }

    fn mapper(settings: RegistrySettings) -> UrlMapper {
        let routes = RouteTable::new()
            .route("test", "test/")
            .and_then(|t| t.route("test", "test/{pk:int}/"))
            .unwrap();
        let objects = ObjectRegistry::new()
            .with(
                ContentType::new("flatpages", "flatpage"),
                ObjectTable::new([1]).with_canonical_url("/pages/{id}/"),
            )
            .with(
                ContentType::new("urlmapper", "urlmap"),
                ObjectTable::new([1]).with_canonical_url("/maps/{id}/"),
            );
        UrlMapper::new(
            Arc::new(Registry::load(settings.with_keys(["terms", "home"]), FunctionMap::new()).unwrap()),
            Arc::new(MemoryStore::new()),
            Arc::new(routes),
            Arc::new(objects),
        )
    }

    #[test]
    fn test_parse_object() {
        let (ct, id) = parse_object("flatpages.flatpage:12").unwrap();
        assert_eq!(ct.to_string(), "flatpages.flatpage");
        assert_eq!(id, 12);
        assert!(parse_object("flatpages.flatpage").is_err());
        assert!(parse_object("flatpages.flatpage:x").is_err());
        assert!(parse_object("flatpage:1").is_err());
    }

    #[test]
    fn test_record_from_args() {
        let record = record_from_args(&SetArgs {
            route: Some("test".into()),
            params: Some("pk=1".into()),
            ..args("terms")
        })
        .unwrap();
        assert_eq!(record.mapping_kind(), Some(MappingKind::Route));
        assert_eq!(record.route_params, "pk=1");

        assert!(record_from_args(&args("terms")).is_err());
    }

    #[test]
    fn test_set_mapping() {
        let m = mapper(RegistrySettings::default());
        set_mapping(&m, &SetArgs { url: Some("/test/1/".into()), ..args("terms") }).unwrap();
        assert_eq!(m.resolve("terms", None).unwrap(), "/test/1/");

        // Validation failures are not stored
        assert!(set_mapping(&m, &SetArgs { url: Some("/nope/".into()), ..args("home") }).is_err());
        assert!(!m.store().exists("home"));

        // Not a key choice
        let err = set_mapping(&m, &SetArgs { url: Some("/test/".into()), ..args("other") })
            .unwrap_err();
        assert!(err.to_string().contains("choices: home, terms"));
    }

    #[test]
    fn test_set_respects_allowed_kinds() {
        let settings = RegistrySettings {
            allowed_mappings: vec!["direct".into()],
            ..RegistrySettings::default()
        };
        let m = mapper(settings);
        let err = set_mapping(&m, &SetArgs { route: Some("test".into()), ..args("terms") })
            .unwrap_err();
        assert!(err.to_string().contains("Route mappings are not allowed"));
    }

    #[test]
    fn test_set_respects_selectable_content_types() {
        let m = mapper(RegistrySettings::default());
        assert!(
            set_mapping(&m, &SetArgs { object: Some("urlmapper.urlmap:1".into()), ..args("terms") })
                .is_err()
        );
        set_mapping(&m, &SetArgs { object: Some("flatpages.flatpage:1".into()), ..args("terms") })
            .unwrap();
        assert_eq!(m.resolve("terms", None).unwrap(), "/pages/1/");
    }

    #[test]
    fn test_remove_mapping() {
        let m = mapper(RegistrySettings::default());
        m.put(MappingRecord::direct("terms", "/test/")).unwrap();
        remove_mapping(&m, "terms").unwrap();
        remove_mapping(&m, "terms").unwrap();
        assert!(!m.store().exists("terms"));
    }
}
