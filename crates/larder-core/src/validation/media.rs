use crate::error::ValidationReport;
use crate::media::MediaAltCache;
use crate::types::MediaReference;

/// Checks that a media reference resolves to alt text.
///
/// Inline alt on a populated relation wins without a lookup; otherwise the
/// id is resolved through the run's cache. A reference that carries neither
/// alt nor an id is reported as not pointing at a media item.
pub fn ensure_media_alt(
    cache: &mut MediaAltCache<'_>,
    report: &mut ValidationReport,
    label: &str,
    path: &str,
    reference: &MediaReference,
) {
    if reference.inline_alt().is_some() {
        return;
    }

    let Some(id) = reference.media_id() else {
        report.issue(path, format!("{label} must reference a Media item."));
        return;
    };

    if cache.alt_for(id).is_none() {
        report.issue(path, format!("{label} is missing alt text in Media."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::InMemoryMediaStore;
    use crate::types::MediaRecord;
    use serde_json::json;

    fn check(store: &InMemoryMediaStore, reference: MediaReference) -> ValidationReport {
        let mut cache = MediaAltCache::new(store);
        let mut report = ValidationReport::new();
        ensure_media_alt(&mut cache, &mut report, "Featured media", "featuredMedia", &reference);
        report
    }

    #[test]
    fn inline_alt_skips_lookup() {
        let store = InMemoryMediaStore::new();
        let report = check(&store, MediaReference::with_alt(1, "Lemon tart"));
        assert!(report.is_empty());
        assert_eq!(store.lookup_count(), 0);
    }

    #[test]
    fn stored_alt_satisfies_reference() {
        let store = InMemoryMediaStore::new().with_record(MediaRecord::new(1, Some("Lemon tart")));
        assert!(check(&store, MediaReference::id(1)).is_empty());
    }

    #[test]
    fn unresolvable_id_reports_missing_alt() {
        let store = InMemoryMediaStore::new();
        let report = check(&store, MediaReference::id(99));
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.issues[0].message,
            "Featured media is missing alt text in Media."
        );
    }

    #[test]
    fn blank_or_fractional_ids_report_missing_alt() {
        let store = InMemoryMediaStore::new();
        for raw in [json!(" "), json!(1.5)] {
            let reference = MediaReference::from_value(raw).unwrap();
            let report = check(&store, reference);
            assert_eq!(
                report.issues[0].message,
                "Featured media is missing alt text in Media."
            );
        }
        assert_eq!(store.lookup_count(), 2);
    }

    #[test]
    fn reference_without_id_is_rejected() {
        let store = InMemoryMediaStore::new();
        let reference = MediaReference::from_value(json!({"url": "/m/x.jpg"})).unwrap();
        let report = check(&store, reference);
        assert_eq!(
            report.issues[0].message,
            "Featured media must reference a Media item."
        );
        assert_eq!(store.lookup_count(), 0);
    }
}
