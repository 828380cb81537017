use crate::error::ValidationReport;
use crate::media::MediaAltCache;
use crate::types::ImageGalleryBlock;
use crate::validation::media::ensure_media_alt;

/// Validates every gallery in `imageBlocks`.
///
/// An empty gallery gets one issue and no per-image checks. Otherwise each
/// image, in order, must resolve to alt text.
pub fn validate_image_blocks(
    blocks: &[ImageGalleryBlock],
    cache: &mut MediaAltCache<'_>,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (block_index, block) in blocks.iter().enumerate() {
        if block.images.is_empty() {
            report.issue(
                format!("imageBlocks.{block_index}.images"),
                "Add at least one image in each gallery block.",
            );
            continue;
        }

        for (image_index, row) in block.images.iter().enumerate() {
            // A row without an image has nothing to resolve.
            let Some(reference) = &row.image else {
                continue;
            };
            ensure_media_alt(
                cache,
                &mut report,
                "Gallery image",
                &format!("imageBlocks.{block_index}.images.{image_index}.image"),
                reference,
            );
        }
    }

    report
}
