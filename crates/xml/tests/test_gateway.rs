use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use ech_xml::{
    CachedGateway, Diagnostic, SchemaCache, SchemaGateway, SchemaSource, XmlError, validate_with,
};

/// Source that counts fetches and is slow enough for threads to collide.
#[derive(Clone, Default)]
struct CountingSource {
    fetches: Arc<AtomicUsize>,
}

impl SchemaSource for CountingSource {
    fn fetch(&self, schema_id: &str) -> Result<Vec<u8>, String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        if schema_id.ends_with(".xsd") {
            Ok(format!("<xs:schema id=\"{schema_id}\"/>").into_bytes())
        } else {
            Err(format!("no such schema: {schema_id}"))
        }
    }
}

/// Compiled form used by the tests: the required root element name.
#[derive(Debug)]
struct RequiredRoot(String);

fn compile(schema_id: &str, _bytes: &[u8]) -> Result<RequiredRoot, String> {
    let root = if schema_id.starts_with("eCH-0099") {
        "<eCH-0099:delivery"
    } else {
        "<eCH-0020:delivery"
    };
    Ok(RequiredRoot(root.to_string()))
}

fn check(schema: &RequiredRoot, xml: &[u8]) -> Result<(), Vec<Diagnostic>> {
    let text = String::from_utf8_lossy(xml);
    if text.contains(&schema.0) {
        Ok(())
    } else {
        Err(vec![
            Diagnostic::new(format!("expected root {}", schema.0)).at_line(1, 1),
        ])
    }
}

#[test]
fn test_concurrent_first_use_loads_once() {
    let source = CountingSource::default();
    let fetches = source.fetches.clone();
    let cache = SchemaCache::new(source, compile);

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let schema = cache.get("eCH-0020-3-0.xsd");
                assert!(schema.is_ok());
            });
        }
    });

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(cache.is_loaded("eCH-0020-3-0.xsd"));
}

#[test]
fn test_each_identifier_loaded_separately() -> ech_xml::Result<()> {
    let source = CountingSource::default();
    let fetches = source.fetches.clone();
    let cache = SchemaCache::new(source, compile);

    let first = cache.get("eCH-0020-3-0.xsd")?;
    let again = cache.get("eCH-0020-3-0.xsd")?;
    assert!(Arc::ptr_eq(&first, &again));
    cache.get("eCH-0099-2-1.xsd")?;

    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(cache.loaded(), ["eCH-0020-3-0.xsd", "eCH-0099-2-1.xsd"]);
    Ok(())
}

#[test]
fn test_failed_load_is_reported_and_retried() {
    let source = CountingSource::default();
    let fetches = source.fetches.clone();
    let cache = SchemaCache::new(source, compile);

    let err = cache.get("missing").unwrap_err();
    assert!(matches!(err, XmlError::SchemaUnavailable { ref schema_id, .. } if schema_id == "missing"));
    assert!(!cache.is_loaded("missing"));
    assert!(cache.get("missing").is_err());
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[test]
fn test_validate_with_maps_diagnostics() {
    let gateway = CachedGateway::new(
        SchemaCache::new(CountingSource::default(), compile),
        check,
    );

    let good = br#"<?xml version="1.0"?><eCH-0020:delivery/>"#;
    assert!(validate_with(&gateway, good, "eCH-0020-3-0.xsd").is_ok());

    let err = validate_with(&gateway, good, "eCH-0099-2-1.xsd").unwrap_err();
    match err {
        XmlError::SchemaValidationFailed {
            schema_id,
            diagnostics,
        } => {
            assert_eq!(schema_id, "eCH-0099-2-1.xsd");
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].line, Some(1));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(gateway.cache().loaded().len(), 2);
}

#[test]
fn test_unavailable_schema_becomes_diagnostic() {
    let gateway = CachedGateway::new(
        SchemaCache::new(CountingSource::default(), compile),
        check,
    );
    let diagnostics = gateway.validate(b"<x/>", "nowhere").unwrap_err();
    assert!(diagnostics[0].message.contains("nowhere"));
}
