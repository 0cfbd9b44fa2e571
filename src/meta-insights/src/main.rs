//! Meta Insights — executive reporting over Meta Business Suite exports.
//!
//! Runs the CSV ETL, profiles raw exports, and prints the KPI report and
//! the paid-media dashboard summary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use insights_core::config::InsightsConfig;
use insights_core::types::InsightMetric;
use insights_reporting::breakdown::{time_series, top_posts, PostTotal, TimeSeriesPoint};
use insights_reporting::dashboard::{campaign_spend, DashboardDataset};
use insights_reporting::format;
use insights_reporting::funnel::{funnel_summary, FunnelStage};
use insights_reporting::kpi::{executive_kpis, ExecutiveKpis};
use insights_reporting::InsightFilter;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "meta-insights")]
#[command(about = "Executive reporting over Meta Business Suite exports")]
#[command(version)]
struct Cli {
    /// Optional TOML config file (environment variables still win)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the CSV exports (overrides config)
    #[arg(long, global = true, env = "META_INSIGHTS__DATA__DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Human-readable logs instead of JSON
    #[arg(long, global = true, default_value_t = false)]
    plain_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Unify every CSV export in the data directory into one dataset
    Etl,
    /// Print the shape of each CSV export
    Profile,
    /// KPI, trend, top-post and funnel report over the unified dataset
    Report {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Substring of the post id to keep
        #[arg(long)]
        post: Option<String>,
        /// Primary metric (overrides config)
        #[arg(long)]
        metric: Option<String>,
        /// Number of top posts to show (overrides config)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Headline dashboard summary from a JSON dataset (built-in sample if omitted)
    Summary {
        file: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct InsightsReport {
    metric: InsightMetric,
    rows: usize,
    kpis: ExecutiveKpis,
    time_series: Vec<TimeSeriesPoint>,
    top_posts: Vec<PostTotal>,
    funnel: Vec<FunnelStage>,
}

fn init_tracing(plain: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meta_insights=info,insights_ingest=info,insights_reporting=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if plain {
        builder.init();
    } else {
        builder.json().init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.plain_logs);

    let mut config = InsightsConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }

    info!(
        data_dir = %config.data.data_dir.display(),
        output_file = %config.data.output_file,
        "Configuration loaded"
    );

    match cli.command {
        Command::Etl => {
            let (path, rows) =
                insights_ingest::run_etl(&config.data.data_dir, &config.data.output_file)?;
            println!(
                "Wrote {} rows -> {}",
                format::with_thousands(rows as u64),
                path.display()
            );
        }
        Command::Profile => run_profile(&config)?,
        Command::Report {
            from,
            to,
            post,
            metric,
            limit,
            json,
        } => {
            let metric: InsightMetric = metric
                .as_deref()
                .unwrap_or(&config.report.primary_metric)
                .parse()?;
            let limit = limit.unwrap_or(config.report.top_posts_limit);
            let filter = InsightFilter::new(from, to, post)?;
            run_report(&config, &filter, metric, limit, json)?;
        }
        Command::Summary { file, json } => run_summary(file, json)?,
    }

    Ok(())
}

fn run_profile(config: &InsightsConfig) -> anyhow::Result<()> {
    let sources = insights_ingest::list_sources(&config.data.data_dir, &config.data.output_file)?;
    if sources.is_empty() {
        anyhow::bail!(
            "No CSVs found in {}. Upload them first.",
            config.data.data_dir.display()
        );
    }
    for path in &sources {
        let profile = insights_ingest::profile(path)?;
        println!("\n=== {} ===", profile.file_name);
        println!(
            "rows={}  cols={}",
            format::with_thousands(profile.rows as u64),
            profile.columns
        );
        println!("columns: {:?}", profile.headers);
        println!("sample:");
        for row in &profile.sample {
            println!("  {}", row.join(" | "));
        }
    }
    Ok(())
}

fn run_report(
    config: &InsightsConfig,
    filter: &InsightFilter,
    metric: InsightMetric,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let path = config.data.output_path();
    if !path.exists() {
        anyhow::bail!(
            "{} not found. Run `meta-insights etl` first.",
            path.display()
        );
    }
    let rows = filter.apply(&insights_ingest::read_unified(&path)?);

    let report = InsightsReport {
        metric,
        rows: rows.len(),
        kpis: executive_kpis(&rows),
        time_series: time_series(&rows, metric),
        top_posts: top_posts(&rows, metric, limit),
        funnel: funnel_summary(&rows),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Meta Insights — Executive Dashboard ({} rows)", report.rows);
    for card in report.kpis.cards() {
        println!("  {:<22} {:>14}", card.label, card.value);
    }
    println!("\n{} over time", metric);
    for point in &report.time_series {
        println!(
            "  {}  {}",
            point.date,
            format::with_thousands_f64(point.value, 2)
        );
    }
    if !report.top_posts.is_empty() {
        println!("\nTop posts by {}", metric);
        for post in &report.top_posts {
            println!(
                "  {:<32} {}",
                post.post_id,
                format::with_thousands_f64(post.value, 2)
            );
        }
    }
    println!("\nFunnel summary");
    for stage in &report.funnel {
        println!("  {:<12} {}", stage.stage, format::with_thousands(stage.value));
    }
    Ok(())
}

fn run_summary(file: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let dataset = match file {
        Some(path) => DashboardDataset::from_json(&std::fs::read_to_string(&path)?)?,
        None => {
            info!("No dataset given, using the built-in January 2025 sample");
            DashboardDataset::sample()
        }
    };
    let overview = dataset.overview();

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    let s = &overview.summary;
    println!("Reach            {}", format::with_thousands(s.total_reach));
    println!("Impressions      {}", format::with_thousands(s.total_impressions));
    println!(
        "Spend            {}  (CPL {}, campaigns {})",
        s.spend_display(),
        s.cost_per_lead,
        format::currency(campaign_spend(&dataset.campaigns))
    );
    println!(
        "Clicks           {}  (CTR {}, CPC {})",
        format::with_thousands(s.total_clicks),
        s.click_through_rate,
        s.cost_per_click
    );
    println!("Visits           {}", format::with_thousands(s.total_visits));
    println!("Leads            {}", format::with_thousands(s.total_leads));

    if !overview.channel_breakdown.is_empty() {
        println!("\nLeads by channel");
        for channel in &overview.channel_breakdown {
            println!(
                "  {:<12} {:>5} leads  {:>6}  CPL {}",
                channel.name, channel.leads, channel.share, channel.cost_per_lead
            );
        }
    }
    if !overview.campaigns.is_empty() {
        println!("\nRecent campaigns");
        for campaign in &overview.campaigns {
            println!(
                "  {:<22} {:<10} {:<10} {:>6}  {} leads",
                campaign.name,
                campaign.objective,
                campaign.status_label,
                campaign.spend,
                campaign.leads
            );
        }
    }
    Ok(())
}
