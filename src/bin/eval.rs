//! Evaluation CLI: replay labeled queries against the recommendation service and
//! report Top-1 accuracy, Precision@3, and Recall@3 with a CSV export.

use clap::Parser;
use std::path::PathBuf;
use testrec::eval::{load_cases, report, score_case, summarize, RecommendClient};

/// Evaluate recommendation quality against a labeled query set.
#[derive(Parser, Debug)]
#[command(name = "eval")]
struct Args {
    /// Path to labeled cases JSON (default: test_queries.json).
    #[arg(long, default_value = "test_queries.json")]
    cases: PathBuf,

    /// Base URL of the running recommendation service.
    #[arg(long, default_value = "http://localhost:8000")]
    service_url: String,

    /// Where to write the CSV export.
    #[arg(long, default_value = "evaluation_results.csv")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let cases = load_cases(&args.cases)?;
    let client = RecommendClient::new(&args.service_url)?;

    println!(
        "Running evaluation on {} cases against {}\n",
        cases.len(),
        args.service_url
    );

    let mut rows = Vec::with_capacity(cases.len());
    for case in &cases {
        let recommendations = client.recommend(&case.query).await?;
        let row = score_case(case, &recommendations)?;

        println!(
            "  {} -> {} (P@3: {:.2}, R@3: {:.2})",
            case.query,
            row.top_match,
            row.precision * 100.0,
            row.recall * 100.0
        );
        rows.push(row);
    }

    let summary = summarize(&rows)?;

    println!();
    print!("{}", report::render_table(&rows));
    println!();
    print!("{}", report::render_summary(&summary));
    println!();
    print!("{}", report::render_chart(&rows));

    report::write_csv(&rows, &args.out)?;
    println!("\nResults written to {}", args.out.display());

    Ok(())
}
