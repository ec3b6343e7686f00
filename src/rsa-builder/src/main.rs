//! RSA Builder: assemble Responsive Search Ad campaigns from headline banks
//! and ad groups, then preview or export them as CSV for Google Ads.
//!
//! Editing commands load the saved session, apply one edit, and save it
//! back. `preview`, `export`, `summary`, and `lint` only read it.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rsa_core::config::{AppConfig, QuoteStyle, UrlJoin};
use rsa_core::types::{AdGroupConfig, AdGroupPatch, HeadlineCategory, MAX_DESCRIPTIONS};
use rsa_core::{HeadlineTemplate, RsaError};
use rsa_engine::{lint, CsvExporter, PreviewTable, SessionStore, StateAction, TableBuilder};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "rsa-builder")]
#[command(about = "Build Google Responsive Search Ad tables from headline banks and ad groups")]
#[command(version)]
struct Cli {
    /// Session file (overrides config)
    #[arg(long, global = true, env = "RSA_BUILDER__STATE__PATH")]
    state: Option<PathBuf>,

    /// Config file stem, without extension
    #[arg(long, global = true, default_value = "rsa-builder")]
    config: String,

    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new, empty session
    Init {
        /// Overwrite an existing session file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Edit campaign settings; omitted flags keep their current value
    Campaign(CampaignArgs),
    /// Manage the campaign-wide headline banks
    #[command(subcommand)]
    Bank(BankCommand),
    /// Manage ad groups
    #[command(subcommand)]
    Group(GroupCommand),
    /// Print the export table
    Preview,
    /// Write the export table as CSV
    Export(ExportArgs),
    /// Print one CSV line per ad group with its settings
    Summary,
    /// Check headline, description, and path lengths
    Lint {
        /// Print warnings as a JSON array
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct CampaignArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    domain: Option<String>,
    #[arg(long)]
    tag: Option<String>,
    /// Campaign descriptions in slot order (up to 4); replaces all of them
    #[arg(long = "description")]
    descriptions: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum BankCommand {
    /// Add headlines; every `;`-separated entry becomes its own headline
    Add {
        category: HeadlineCategory,
        text: String,
    },
    /// Add one headline whose `;`-separated entries rotate across ads
    AddVariants {
        category: HeadlineCategory,
        template: String,
    },
    /// Remove headlines left without any text
    Prune { category: HeadlineCategory },
    /// List bank headlines
    List,
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    Add(GroupArgs),
    /// Update an ad group by name or id
    Update {
        group: String,
        #[command(flatten)]
        args: GroupPatchArgs,
    },
    /// Remove an ad group by name or id
    Remove { group: String },
    List,
}

#[derive(Args, Debug)]
struct GroupArgs {
    #[arg(long)]
    name: String,
    /// URL relative to the campaign base domain
    #[arg(long)]
    url: String,
    #[arg(long, default_value = "")]
    path1: String,
    #[arg(long, default_value = "")]
    path2: String,
    #[arg(long, default_value_t = rsa_core::types::DEFAULT_ADS_COUNT)]
    ads: u32,
    /// Custom headline; `;` separates variants rotated across ads
    #[arg(long = "headline")]
    headlines: Vec<String>,
}

#[derive(Args, Debug)]
struct GroupPatchArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    path1: Option<String>,
    #[arg(long)]
    path2: Option<String>,
    #[arg(long)]
    ads: Option<u32>,
    /// Replaces all custom headlines
    #[arg(long = "headline")]
    headlines: Vec<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output file (overrides config)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Field quoting (overrides config)
    #[arg(long, value_enum)]
    quote: Option<QuoteArg>,
    /// Leave rows with fewer than 4 descriptions ragged
    #[arg(long, default_value_t = false)]
    no_pad: bool,
    /// Join base domain and group URL exactly as typed
    #[arg(long, default_value_t = false)]
    verbatim_urls: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum QuoteArg {
    Necessary,
    Always,
    Never,
}

impl From<QuoteArg> for QuoteStyle {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Necessary => QuoteStyle::Necessary,
            QuoteArg::Always => QuoteStyle::Always,
            QuoteArg::Never => QuoteStyle::Never,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    // Load configuration
    let mut config = AppConfig::load_from(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(state) = &cli.state {
        config.state.path = state.display().to_string();
    }

    // A broken session file must not block starting over.
    if let Command::Init { force } = cli.command {
        let store = SessionStore::new(&config.state.path);
        if store.path().exists() && !force {
            bail!("{} already exists (use --force to overwrite)", store.path().display());
        }
        store.save()?;
        info!(path = %store.path().display(), "initialized empty session");
        return Ok(());
    }

    let mut store = SessionStore::load(&config.state.path)
        .with_context(|| format!("loading session {}", config.state.path))?;

    match cli.command {
        Command::Init { .. } => unreachable!("handled above"),
        Command::Campaign(args) => {
            let mut campaign = store.state().campaign.clone();
            if let Some(name) = args.name { campaign.campaign_name = name; }
            if let Some(domain) = args.domain { campaign.base_domain = domain; }
            if let Some(tag) = args.tag { campaign.tag = tag; }
            if !args.descriptions.is_empty() {
                if args.descriptions.len() > MAX_DESCRIPTIONS {
                    bail!("at most {MAX_DESCRIPTIONS} descriptions are allowed");
                }
                campaign.descriptions = Default::default();
                for (slot, text) in campaign.descriptions.iter_mut().zip(args.descriptions) {
                    *slot = text;
                }
            }
            store.dispatch(StateAction::SetCampaign(campaign))?;
            store.save()?;
        }
        Command::Bank(cmd) => run_bank(&mut store, cmd)?,
        Command::Group(cmd) => run_group(&mut store, cmd)?,
        Command::Preview => {
            let rows = TableBuilder::new(config.export.url_join).build(store.state());
            print!("{}", PreviewTable::from_rows(&rows).render_text());
        }
        Command::Export(args) => {
            if let Some(quote) = args.quote {
                config.export.quote_style = quote.into();
            }
            if args.no_pad {
                config.export.pad_descriptions = false;
            }
            if args.verbatim_urls {
                config.export.url_join = UrlJoin::Verbatim;
            }
            let out = args.out.unwrap_or_else(|| PathBuf::from(&config.export.output_path));

            let rows = TableBuilder::new(config.export.url_join).build(store.state());
            match CsvExporter::from_config(&config.export).write_csv(&rows, &out) {
                Ok(()) => println!("Exported {} ads to {}", rows.len(), out.display()),
                Err(RsaError::NothingToExport) => println!("{}", RsaError::NothingToExport),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Summary => {
            print!("{}", CsvExporter::from_config(&config.export).ad_group_summary(&store.state().ad_groups));
        }
        Command::Lint { json } => {
            let warnings = lint(store.state(), &config.limits);
            if json {
                println!("{}", serde_json::to_string_pretty(&warnings)?);
            } else {
                for warning in &warnings {
                    println!("{warning}");
                }
                println!("{} warning(s)", warnings.len());
            }
        }
    }

    Ok(())
}

fn run_bank(store: &mut SessionStore, cmd: BankCommand) -> anyhow::Result<()> {
    match cmd {
        BankCommand::Add { category, text } => {
            store.dispatch(StateAction::AddHeadlines { category, input: text })?;
        }
        BankCommand::AddVariants { category, template } => {
            let mut items = store.state().banks.get(category).to_vec();
            items.push(rsa_core::HeadlineItem::new(category, template.as_str()));
            store.dispatch(StateAction::SetBank { category, items })?;
        }
        BankCommand::Prune { category } => {
            store.dispatch(StateAction::PruneEmptyHeadlines { category })?;
        }
        BankCommand::List => {
            for category in HeadlineCategory::ALL {
                let items = store.state().banks.get(category);
                println!("{category} ({}): {}", items.len(), category.guidance());
                for item in items {
                    let marker = if item.template.is_rotating() { " (rotates)" } else { "" };
                    println!("  {}  {}{marker}", item.id, item.template);
                }
            }
            return Ok(());
        }
    }
    store.save()?;
    Ok(())
}

fn run_group(store: &mut SessionStore, cmd: GroupCommand) -> anyhow::Result<()> {
    match cmd {
        GroupCommand::Add(args) => {
            let mut group = AdGroupConfig::new(args.name, args.url)
                .with_paths(args.path1, args.path2)
                .with_ads_count(args.ads);
            group.custom_headlines = templates(&args.headlines);
            let id = group.id;
            store.dispatch(StateAction::AddAdGroup(group))?;
            info!(%id, "ad group added");
        }
        GroupCommand::Update { group, args } => {
            let id = resolve_group(store, &group)?;
            let patch = AdGroupPatch {
                name: args.name,
                final_url: args.url,
                path1: args.path1,
                path2: args.path2,
                ads_count: args.ads,
                custom_headlines: (!args.headlines.is_empty()).then(|| templates(&args.headlines)),
            };
            store.dispatch(StateAction::UpdateAdGroup { id, patch })?;
        }
        GroupCommand::Remove { group } => {
            let id = resolve_group(store, &group)?;
            store.dispatch(StateAction::RemoveAdGroup { id })?;
        }
        GroupCommand::List => {
            for group in &store.state().ad_groups {
                println!(
                    "{}  {}  /{}  ads={}  custom={}",
                    group.id,
                    group.name,
                    group.final_url.trim_start_matches('/'),
                    group.ads_count,
                    group.custom_headlines.len()
                );
            }
            return Ok(());
        }
    }
    store.save()?;
    Ok(())
}

fn resolve_group(store: &SessionStore, key: &str) -> anyhow::Result<Uuid> {
    store
        .state()
        .find_ad_group(key)
        .map(|g| g.id)
        .with_context(|| format!("no ad group named or with id '{key}'"))
}

fn templates(raw: &[String]) -> Vec<HeadlineTemplate> {
    raw.iter()
        .map(|h| HeadlineTemplate::parse(h))
        .filter(|t| !t.is_empty())
        .collect()
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rsa_builder=info,rsa_engine=info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
