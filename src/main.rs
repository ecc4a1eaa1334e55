use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::info;

use quotescraper::scrapers::HttpScraper;
use quotescraper::{
    create_sink, MalformedBlockPolicy, QuoteCrawler, QuoteSelectors, RecordSink, ScrapeConfig,
    SinkType,
};

#[derive(Parser, Debug)]
#[command(name = "quotescraper", version)]
#[command(about = "Fetch one HTML page and extract its quotes, authors and tags")]
struct Cli {
    /// Page to scrape
    #[arg(long, env = "QUOTESCRAPER_URL")]
    url: String,

    /// Output file; stdout when omitted or "-"
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: csv, json or jsonl
    #[arg(short, long, default_value_t = SinkType::Csv)]
    format: SinkType,

    /// Skip quote blocks missing their text, author or tags instead of failing
    #[arg(long)]
    skip_malformed: bool,

    #[arg(long)]
    user_agent: Option<String>,

    /// Extra request header as NAME:VALUE, may be repeated
    #[arg(short = 'H', long = "header", value_parser = parse_header_arg)]
    headers: Vec<(String, String)>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(long, default_value = "div.quote")]
    block_selector: String,

    #[arg(long, default_value = "span.text")]
    text_selector: String,

    #[arg(long, default_value = "small.author")]
    author_selector: String,

    #[arg(long, default_value = "div.tags")]
    tags_selector: String,

    #[arg(long, default_value = "a.tag")]
    tag_selector: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn scrape_config(&self) -> ScrapeConfig {
        let selectors = QuoteSelectors::default()
            .with_block(&self.block_selector)
            .with_text(&self.text_selector)
            .with_author(&self.author_selector)
            .with_tags(&self.tags_selector)
            .with_tag(&self.tag_selector);

        let policy = if self.skip_malformed {
            MalformedBlockPolicy::Skip
        } else {
            MalformedBlockPolicy::Abort
        };

        let mut config = ScrapeConfig::new(self.url.as_str())
            .with_selectors(selectors)
            .with_malformed_policy(policy);
        for (name, value) in &self.headers {
            config = config.with_header(name, value);
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn parse_header_arg(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::builder()
        .filter_level(level)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.scrape_config();
    let crawler = QuoteCrawler::new(Box::new(
        HttpScraper::new().context("failed to build HTTP client")?,
    ));

    let quotes = crawler
        .run(&config)
        .await
        .with_context(|| format!("failed to scrape {}", config.url.trim()))?;

    let mut sink =
        create_sink(cli.format, cli.output.as_deref()).context("failed to open output")?;
    sink.write_records(&quotes).context("failed to write quotes")?;
    sink.finish().context("failed to write quotes")?;

    info!("Wrote {} quotes as {}", quotes.len(), cli.format);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
