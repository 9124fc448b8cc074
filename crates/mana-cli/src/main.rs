//! `mana` command-line front end

mod config;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::ManaConfig;
use mana_aggregator::{BuildAggregator, ResultCache};
use mana_providers::{build_providers, Locale, LocaleHandle, ProviderContext, ReqwestClient};
use mana_schema::{AggregatedResult, BuildRequest, Champion, GameMode, Position};
use mana_store::ChampionStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("mana")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Champion build aggregation from several upstream sources")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve runes, item sets and summoner spells for a champion")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Numeric champion id"),
                )
                .arg(
                    Arg::new("key")
                        .long("key")
                        .required(true)
                        .help("Champion key used in upstream URLs (e.g. MonkeyKing)"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Champion display name (defaults to the key)"),
                )
                .arg(
                    Arg::new("position")
                        .long("position")
                        .help("Lane: TOP, JUNGLE, MIDDLE, ADC or SUPPORT"),
                )
                .arg(
                    Arg::new("assigned")
                        .long("assigned")
                        .conflicts_with("position")
                        .help("Position as reported by the game client (UTILITY, BOTTOM, ...)"),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .default_value("CLASSIC")
                        .help("Game mode"),
                )
                .arg(
                    Arg::new("locale")
                        .long("locale")
                        .help("Client display language (overrides the config file)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("save-dir")
                        .long("save-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also store the result in this champion data directory"),
                ),
        )
        .subcommand(
            Command::new("clear-store")
                .about("Delete every stored champion file")
                .arg(
                    Arg::new("save-dir")
                        .long("save-dir")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Champion data directory"),
                ),
        )
}

fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn request_from(args: &ArgMatches) -> Result<BuildRequest> {
    let id = *args.get_one::<u32>("id").context("missing --id")?;
    let key = args.get_one::<String>("key").context("missing --key")?;
    let name = args.get_one::<String>("name").unwrap_or(key);

    let position = match (
        args.get_one::<String>("position"),
        args.get_one::<String>("assigned"),
    ) {
        (Some(position), _) => Some(position.parse::<Position>()?),
        (None, Some(assigned)) => Position::from_assigned(assigned)?,
        (None, None) => None,
    };

    let mode = args.get_one::<String>("mode").map_or("CLASSIC", String::as_str);
    let game_mode = GameMode::new(mode)?;

    let champion = Champion::new(id, key.as_str(), name.as_str());
    champion.validate()?;
    Ok(BuildRequest::new(champion, position, game_mode))
}

async fn resolve(args: &ArgMatches) -> Result<()> {
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => ManaConfig::load(path)?,
        None => ManaConfig::default(),
    };
    let request = request_from(args)?;

    let locale = args
        .get_one::<String>("locale")
        .map_or_else(|| config.locale(), |l| Locale::new(l.clone()));

    let http = ReqwestClient::new(&config.http).context("building HTTP client")?;
    let ctx = ProviderContext::new(Arc::new(http))
        .with_locale(LocaleHandle::new(locale))
        .with_settings(config.provider_settings.clone());
    let providers = build_providers(config.providers.as_slice(), &ctx)?;
    if providers.is_empty() {
        bail!("no providers configured");
    }

    let aggregator = BuildAggregator::new(providers, ResultCache::in_memory(), config.aggregator.clone());
    let resolution = aggregator.resolve_detailed(&request).await?;

    for attempt in &resolution.attempts {
        tracing::debug!(
            "{} / {}: {:?}",
            attempt.provider,
            attempt.capability,
            attempt.outcome
        );
    }
    tracing::info!(
        "Resolved {} with {} provider call(s): {} rune page(s), {} item set(s), {} spell pair(s)",
        request.key(),
        resolution.calls(),
        resolution.result.runes.len(),
        resolution.result.item_sets.len(),
        resolution.result.summoner_spells.len()
    );

    if let Some(dir) = args.get_one::<PathBuf>("save-dir") {
        let store: ChampionStore<AggregatedResult> = ChampionStore::new(dir);
        store.load().await?;
        store.set(request.champion.id, resolution.result.clone());
        store.save().await?;
    }

    println!("{}", serde_json::to_string_pretty(&resolution.result)?);
    Ok(())
}

async fn clear_store(args: &ArgMatches) -> Result<()> {
    let dir = args
        .get_one::<PathBuf>("save-dir")
        .context("missing --save-dir")?;
    let store: ChampionStore<serde_json::Value> = ChampionStore::new(dir);
    let removed = store.clear().await?;
    println!("Removed {removed} champion file(s) from {}", dir.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("resolve", args)) => resolve(args).await,
        Some(("clear-store", args)) => clear_store(args).await,
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
}
