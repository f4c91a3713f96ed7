//! Generate static files

use anyhow::Result;

use crate::content::ContentStore;
use crate::generator::Generator;
use crate::Penna;

/// Generate the static site
pub fn run(site: &Penna) -> Result<()> {
    let start = std::time::Instant::now();

    let store = ContentStore::load(site)?;
    tracing::info!(
        "Loaded {} posts and {} pages",
        store.posts().len(),
        store.pages().count()
    );

    let generator = Generator::new(site)?;
    generator.generate(&store)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
