use anyhow::Context;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use rulesearch::cli::{Cli, Commands, DailyCommand, DisplayArgs, KeywordsArgs, SearchArgs};
use rulesearch::error::Result;
use rulesearch::format::{format_daily_pick, format_results};
use rulesearch::rotation::GroupStore;
use rulesearch::search::{MatchResult, RuleSearcher};
use rulesearch::server::RulesServer;
use rulesearch::state::RulesState;
use rulesearch::{Config, Corpus};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    rulesearch::tracing::init(cli.log_level());

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(rules_file) = cli.rules_file {
        config.rules_file = rules_file;
    }

    match cli.command {
        Commands::Search(args) => run_search(&config, args),
        Commands::Keywords(args) => run_keywords(&config, args),
        Commands::Rule { number } => run_rule(&config, number),
        Commands::Random => run_random(&config),
        Commands::Daily {
            command,
            groups_file,
        } => run_daily(&config, command, groups_file),
        Commands::Interactive(args) => run_interactive(&config, &args),
        Commands::Serve => run_server(config).await,
    }
}

fn load_searcher(config: &Config) -> Result<RuleSearcher> {
    let corpus = Corpus::load(&config.rules_file)
        .with_context(|| format!("Failed to load rules from {}", config.rules_file.display()))?;
    Ok(RuleSearcher::new(Arc::new(corpus)))
}

fn threshold_or(value: Option<f64>, default: f64) -> Result<f64> {
    let threshold = value.unwrap_or(default);
    anyhow::ensure!(threshold.is_finite(), "Threshold must be a finite number");
    Ok(threshold)
}

fn print_results(results: &[MatchResult], show_scores: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        println!("{}", format_results(results, show_scores));
    }
    Ok(())
}

fn run_search(config: &Config, args: SearchArgs) -> Result<()> {
    let searcher = load_searcher(config)?;
    let threshold = threshold_or(args.display.threshold, config.threshold)?;
    let max_results = args.display.max_results.unwrap_or(config.max_results);

    let results = searcher.fuzzy_search(&args.query.join(" "), threshold, max_results);
    print_results(&results, args.display.show_scores, args.display.json)
}

fn run_keywords(config: &Config, args: KeywordsArgs) -> Result<()> {
    let searcher = load_searcher(config)?;
    let threshold = threshold_or(args.threshold, config.keyword_threshold)?;

    let results = searcher.search_by_keywords(&args.keywords, threshold);
    print_results(&results, args.show_scores, args.json)
}

fn run_rule(config: &Config, number: u32) -> Result<()> {
    let searcher = load_searcher(config)?;
    match searcher.lookup_by_number(number) {
        Some(hit) => println!("{}", format_results(&[hit], false)),
        None => println!("Rule #{} not found.", number),
    }
    Ok(())
}

fn run_random(config: &Config) -> Result<()> {
    let searcher = load_searcher(config)?;
    match searcher.random_rule(&mut rand::thread_rng()) {
        Some(hit) => println!("{}", format_results(&[hit], false)),
        None => println!("The rules file is empty."),
    }
    Ok(())
}

fn run_daily(config: &Config, command: DailyCommand, groups_file: Option<PathBuf>) -> Result<()> {
    let corpus = Corpus::load(&config.rules_file)
        .with_context(|| format!("Failed to load rules from {}", config.rules_file.display()))?;
    let path = groups_file.unwrap_or_else(|| config.groups_file.clone());
    let mut store = GroupStore::open(&path)?;

    match command {
        DailyCommand::Add { group } => {
            if store.add_group(group, &corpus)? {
                println!("Group {} registered for daily rules.", group);
            } else {
                println!("Group {} is already registered.", group);
            }
        }
        DailyCommand::Pick { group } => {
            match store.daily_rule(group, &corpus, &mut rand::thread_rng())? {
                Some(pick) => println!("{}", format_daily_pick(&pick)),
                None => println!("No daily rule for group {}.", group),
            }
        }
        DailyCommand::Remove { group } => {
            if store.remove_group(group)? {
                println!("Group {} removed.", group);
            } else {
                println!("Group {} was not registered.", group);
            }
        }
        DailyCommand::List => {
            let mut any = false;
            for group in store.groups() {
                any = true;
                println!(
                    "{}: {} shown, {} remaining",
                    group.id,
                    group.used.len(),
                    group.unused.len()
                );
            }
            if !any {
                println!("No groups registered.");
            }
        }
    }
    Ok(())
}

fn run_interactive(config: &Config, args: &DisplayArgs) -> Result<()> {
    let searcher = load_searcher(config)?;
    let threshold = threshold_or(args.threshold, config.threshold)?;
    let max_results = args.max_results.unwrap_or(config.max_results);

    println!("Rules Search - Interactive Mode");
    println!("Type 'quit' or 'exit' to exit, 'help' for search tips");
    println!("{}", "-".repeat(50));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nSearch: ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!("\nGoodbye!");
            break;
        };
        let query = line?;
        let query = query.trim();

        match query.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "h" => {
                println!("\nSearch Tips:");
                println!("- Use simple words or phrases");
                println!("- Search works in both languages");
                println!("- Type a number to show that rule");
                println!("- Try different thresholds: --threshold 0.4");
                println!("- Use the keywords command to require several words");
            }
            _ => {
                let results = searcher.fuzzy_search(query, threshold, max_results);
                print_results(&results, args.show_scores, args.json)?;
            }
        }
    }
    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    tracing::info!("Starting rulesearch MCP server");

    let state = Arc::new(RulesState::load(config)?);
    let server = RulesServer::new(state);

    // Create and serve the MCP server over stdio
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
