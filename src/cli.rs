use clap::Parser;
use std::path::PathBuf;

/// Schema-driven form field builder - renders select controls as HTML
#[derive(Parser, Debug, Clone)]
#[command(name = "veld", version, about, long_about = None)]
pub struct Cli {
    /// Path to the schema JSON document
    #[arg(short, long, env = "VELD_SCHEMA", default_value = "preferences.json")]
    pub schema: PathBuf,

    /// Collection path to render, dot separated (e.g. "account.privacy")
    #[arg(short, long, env = "VELD_COLLECTION")]
    pub collection: Option<String>,

    /// JSON file with saved values that override schema defaults
    #[arg(long, env = "VELD_VALUES")]
    pub values: Option<PathBuf>,

    /// Capability token granted to the rendering subject (repeatable)
    #[arg(long = "grant")]
    pub grants: Vec<String>,
}
