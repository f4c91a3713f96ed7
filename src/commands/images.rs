//! Run the image pipeline

use anyhow::Result;

use crate::images::ImagePipeline;
use crate::Penna;

/// Convert and mirror images into the target directory
pub fn run(site: &Penna) -> Result<()> {
    let start = std::time::Instant::now();

    let stats = ImagePipeline::new(site).run()?;

    tracing::info!(
        "Images done in {:.2}s: {} converted, {} copied, {} skipped",
        start.elapsed().as_secs_f64(),
        stats.converted,
        stats.copied,
        stats.skipped
    );

    Ok(())
}
