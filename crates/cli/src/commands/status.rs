//! `exoquery status` — Show resolved configuration and directory state.

use exoquery_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🔭 exoquery Status");
    println!("==================");
    println!("  Config file:  {}", AppConfig::config_path().display());
    println!("  Input dir:    {}", config.input_dir.display());
    println!("  Output dir:   {}", config.output_dir.display());
    println!("  Archive:      {}", config.archive.base_url);
    println!("  Table:        {}", config.archive.table);
    println!("  Timeout:      {}s", config.archive.timeout_secs);
    println!("  Max attempts: {}", config.archive.max_attempts);
    println!("  Fields:       {}", config.fields.len());

    if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — using defaults");
    }

    if config.input_dir.is_dir() {
        let csv_files = std::fs::read_dir(&config.input_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path().extension().and_then(|x| x.to_str()) == Some("csv")
            })
            .count();
        println!("  ✅ Input directory found ({csv_files} cycle file(s))");
    } else {
        println!("  ⚠️  Input directory missing: {}", config.input_dir.display());
    }

    Ok(())
}
