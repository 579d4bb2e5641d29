use anyhow::Context;
use clap::Parser;
use futures::stream::{self, StreamExt};

use questscribe::config::AppConfig;
use questscribe::core::browser::Browser;
use questscribe::core::classifier::classify;
use questscribe::core::logging;
use questscribe::core::search::{CategoryKind, RESOLVE_CONCURRENCY};

#[derive(Parser, Debug)]
#[command(name = "questscribe")]
#[command(about = "Search the D&D 5e SRD compendium")]
#[command(version)]
struct Args {
    /// Only show entries of this category (repeatable, OR-ed)
    #[arg(short, long = "filter", value_name = "CATEGORY")]
    filters: Vec<CategoryKind>,

    /// Case-insensitive name search
    text: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, config_error) = match AppConfig::try_load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let _log_guard = logging::init(&config.log_dir());
    log::info!("{} v{} starting", questscribe::NAME, questscribe::VERSION);
    if let Some(e) = config_error {
        log::warn!("{e}; using defaults");
    }

    let browser = Browser::from_config(&config)
        .await
        .context("failed to open compendium")?;
    let mut session = browser.create_session().await;

    for kind in &args.filters {
        session.add_filter(*kind).await?;
    }
    let report = session.set_search_text(&args.text.join(" ")).await;

    logging::print_heading(&format!(
        "{} of {} entries visible",
        report.visible, report.total
    ));
    for failure in &report.failures {
        logging::print_warning(&format!("{}: {}", failure.name, failure.error));
    }

    let source = browser.source().clone();
    let lines: Vec<String> = stream::iter(session.visible_entries().cloned())
        .map(|entry| {
            let source = source.clone();
            async move {
                let variant = match source.resolve(&entry.url).await {
                    Ok(record) => classify(&record)
                        .map(|tag| tag.label().to_string())
                        .unwrap_or_else(|_| "?".to_string()),
                    Err(e) => {
                        log::warn!("Failed to resolve {}: {e}", entry.url);
                        "?".to_string()
                    }
                };
                format!("{:<40} {:<16} {}", entry.name, variant, entry.url)
            }
        })
        .buffered(RESOLVE_CONCURRENCY)
        .collect()
        .await;

    for line in lines {
        println!("{line}");
    }

    Ok(())
}
