//! Fields command - list the fields the configured registry extracts.

use console::style;

use super::config::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let registry = config.build_registry()?;

    let width = registry
        .fields()
        .iter()
        .map(|f| f.key.len())
        .max()
        .unwrap_or(0);

    println!("{}", style("Fields (in report order):").bold());
    println!();

    for field in registry.fields() {
        let required = if field.required {
            style("required").red().to_string()
        } else {
            style("optional").dim().to_string()
        };
        println!(
            "  {:<width$}  {:<6}  {}  {} pattern(s)",
            field.key,
            field.kind.label(),
            required,
            field.patterns.len(),
            width = width
        );
    }

    if !registry.rules().is_empty() {
        println!();
        println!("{}", style("Cross-field rules:").bold());
        for rule in registry.rules() {
            let [field, reference] = rule.keys();
            println!("  {} must not be before {}", field, reference);
        }
    }

    Ok(())
}
