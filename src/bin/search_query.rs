use clap::Parser;
use enem_search::api::models::SearchResponse;
use enem_search::api::query::{SearchParams, SearchRequest};
use enem_search::config::DEFAULT_CORPUS_ROOT;
use enem_search::utils::logger;
use enem_search::{LocalCorpus, SearchEngine};

#[derive(Parser)]
#[command(name = "search_query")]
#[command(about = "Run a single keyword search against a question corpus and print JSON")]
struct Args {
    /// Keyword to look for (case-insensitive substring)
    keyword: String,

    /// Only search this exam year
    #[arg(short, long)]
    year: Option<String>,

    /// Page size (max 50)
    #[arg(short, long)]
    limit: Option<String>,

    /// Number of matches to skip
    #[arg(short, long)]
    offset: Option<String>,

    /// Directory holding the year partitions
    #[arg(long, default_value = DEFAULT_CORPUS_ROOT)]
    corpus_root: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let params = SearchParams {
        q: Some(args.keyword),
        year: args.year,
        limit: args.limit,
        offset: args.offset,
    };

    let request = match SearchRequest::try_from(params) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }
    };

    tracing::debug!("Searching {} for {:?}", args.corpus_root, request);

    let engine = SearchEngine::new(LocalCorpus::new(&args.corpus_root));
    let outcome = match engine.search(&request.keyword, request.options).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("❌ Search failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    tracing::info!("Found {} matching questions", outcome.total);

    let response = SearchResponse::new(request, outcome);
    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);

    Ok(())
}
