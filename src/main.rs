use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use spendee_cleaner::{run, PipelineConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🧾 Spendee Cleaner v{}", spendee_cleaner::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Paths are fixed; see config::DEFAULT_INPUT_DIR / DEFAULT_OUTPUT_PATH
    let config = PipelineConfig::default();

    println!("\n📂 Reading exports from {}", config.input_dir.display());
    let report = run(&config).with_context(|| {
        format!(
            "Failed to clean exports in {}",
            config.input_dir.display()
        )
    })?;

    println!("✓ {}", report.summary());
    println!("✓ Categories remapped: {}", report.categories_remapped);
    println!("✓ Notes cleaned: {}", report.labels.notes_cleaned);
    for (rule, hits) in &report.labels.rule_hits {
        println!("  • {}: {} rows", rule, hits);
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💾 Wrote {}", report.output_path.display());

    Ok(())
}
