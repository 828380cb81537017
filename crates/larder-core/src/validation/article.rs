use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ValidationReport;
use crate::media::{MediaAltCache, MediaLookup};
use crate::types::de::is_non_empty;
use crate::types::ArticleDraft;
use crate::validation::gallery::validate_image_blocks;
use crate::validation::media::ensure_media_alt;
use crate::validation::recipe::validate_recipe_blocks;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap()
});

/// Returns true for lowercase, hyphen-separated URL slugs such as
/// `lemon-tart-2`.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Runs the publication checklist against a merged article draft.
///
/// Drafts that are not flagged `readyForPublication: true` are not checked
/// at all. Otherwise every applicable rule is evaluated and all failures are
/// returned together:
/// - title, slug (URL-safe) and publication date are required
/// - some content must exist; without it the run stops with one issue
/// - legacy-only articles stop here and pass
/// - modern articles need an excerpt, a primary body (rich text, content
///   blocks or recipe blocks), featured media with alt text, alt text on the
///   SEO image if set, complete recipe cards and non-empty galleries whose
///   images all have alt text
///
/// Media alt text is resolved through `lookup` at most once per id.
pub fn validate_publication_checklist(
    draft: &ArticleDraft,
    lookup: &dyn MediaLookup,
) -> ValidationReport {
    if !draft.is_ready_for_publication() {
        return ValidationReport::new();
    }

    let mut report = ValidationReport::new();
    let mut cache = MediaAltCache::new(lookup);

    check_identity(draft, &mut report);

    let has_modern = draft.has_modern_content();
    if !has_modern && !draft.has_legacy_content() {
        report.issue(
            "contentV2",
            "Add content before publication (Rich Text, blocks, or legacy content fallback).",
        );
        return report;
    }

    if !has_modern {
        debug!(slug = ?draft.slug, "legacy-only article; remaining checks skipped");
        return report;
    }

    if !is_non_empty(draft.excerpt.as_deref()) {
        report.issue(
            "excerpt",
            "Short excerpt is required for modern content articles.",
        );
    }

    if !draft.has_primary_body() {
        report.issue(
            "contentV2",
            "Add at least one paragraph/section/recipe block before publication.",
        );
    }

    match &draft.featured_media {
        None => report.issue(
            "featuredMedia",
            "Featured media is required for modern content publication.",
        ),
        Some(reference) => ensure_media_alt(
            &mut cache,
            &mut report,
            "Featured media",
            "featuredMedia",
            reference,
        ),
    }

    if let Some(reference) = &draft.seo_image {
        ensure_media_alt(&mut cache, &mut report, "SEO image", "seoImage", reference);
    }

    report.merge(validate_recipe_blocks(&draft.recipe_blocks));
    report.merge(validate_image_blocks(&draft.image_blocks, &mut cache));

    debug!(
        issues = report.len(),
        media_lookups = cache.len(),
        "publication checklist finished"
    );
    report
}

fn check_identity(draft: &ArticleDraft, report: &mut ValidationReport) {
    if !is_non_empty(draft.title.as_deref()) {
        report.issue("title", "Title is required before publication.");
    }

    match draft.slug.as_deref() {
        Some(slug) if is_non_empty(Some(slug)) => {
            if !is_valid_slug(slug.trim()) {
                report.issue(
                    "slug",
                    "Use a URL-safe slug (lowercase letters, numbers, and hyphens only).",
                );
            }
        }
        _ => report.issue("slug", "Slug is required before publication."),
    }

    if !draft.has_date() {
        report.issue("date", "Publication date is required before publication.");
    }
}
