//! `exoquery fields` — Print the active parameter field catalogue.

use exoquery_config::AppConfig;
use exoquery_core::ValueKind;

pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let catalogue = config.catalogue();

    if json {
        println!("{}", serde_json::to_string_pretty(&catalogue)?);
        return Ok(());
    }

    println!("{:<18} {:<12} {:<8} {:<12} measured", "name", "column", "unit", "kind");
    println!("{}", "-".repeat(62));
    for field in catalogue.iter() {
        println!(
            "{:<18} {:<12} {:<8} {:<12} {}",
            field.name,
            field.column,
            field.unit.as_deref().unwrap_or("-"),
            match field.kind {
                ValueKind::Numeric => "numeric",
                ValueKind::Categorical => "categorical",
            },
            if field.measured { "yes" } else { "no" }
        );
    }

    Ok(())
}
