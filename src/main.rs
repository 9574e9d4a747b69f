use anyhow::Context;
use clap::Parser;
use tracing::info;
use veld::cli::Cli;
use veld::{AllowAll, CurrentValues, GrantSet, VisibilityPolicy};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.schema)
        .with_context(|| format!("failed to read schema file {}", cli.schema.display()))?;
    let document: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("schema file {} is not valid JSON", cli.schema.display()))?;

    let values = match &cli.values {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read values file {}", path.display()))?;
            let values: CurrentValues = serde_json::from_str(&raw).with_context(|| {
                format!("values file {} is not a flat JSON string map", path.display())
            })?;
            Some(values)
        }
        None => None,
    };

    // No grants means no authorization concept at all, not "deny everything".
    let policy: Box<dyn VisibilityPolicy> = if cli.grants.is_empty() {
        Box::new(AllowAll)
    } else {
        Box::new(cli.grants.iter().cloned().collect::<GrantSet>())
    };

    let path = cli.collection.as_deref().unwrap_or("");
    match veld::render_collection(&document, path, values.as_ref(), policy.as_ref())? {
        Some(html) => println!("{html}"),
        None => info!("nothing to render for collection '{}'", path),
    }

    Ok(())
}
