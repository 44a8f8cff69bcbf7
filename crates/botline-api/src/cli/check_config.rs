//! `botline check-config` - validate and print the effective configuration.

use std::path::Path;

use anyhow::Result;
use console::style;

use botline_infra::config::{render, try_load_config};
use botline_infra::secret::EnvSecrets;
use botline_types::config::BotlineConfig;

/// Secret variables the configuration refers to, with whether each is set.
/// `(label, variable, set)`; values are never read out.
fn secret_report(config: &BotlineConfig, secrets: &EnvSecrets) -> Vec<(&'static str, String, bool)> {
    let mut report = vec![(
        "completion API key",
        config.llm.api_key_env.clone(),
        secrets.is_set(&config.llm.api_key_env),
    )];
    if let Some(wa) = &config.whatsapp {
        report.push((
            "WhatsApp access token",
            wa.access_token_env.clone(),
            secrets.is_set(&wa.access_token_env),
        ));
        report.push((
            "WhatsApp app secret",
            wa.app_secret_env.clone(),
            secrets.is_set(&wa.app_secret_env),
        ));
    }
    report
}

pub async fn check_config(path: &Path) -> Result<()> {
    let config = match try_load_config(path).await? {
        Some(config) => {
            println!(
                "  {} Loaded {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
            config
        }
        None => {
            println!(
                "  {} {} not found, showing defaults",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            BotlineConfig::default()
        }
    };

    println!();
    println!("{}", render(&config)?);

    for (label, var, set) in secret_report(&config, &EnvSecrets::new()) {
        let mark = if set {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("  {mark} {label} ({})", style(var).dim());
    }
    println!();
    Ok(())
}
