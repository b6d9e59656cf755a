mod display;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use policyqa_core::{CategoryFilter, Corpus};
use policyqa_search::{
    AnswerConfig, Assistant, ScoreBreakdown, SearchConfig, SearchResult, SupplementaryResult,
};
use policyqa_store::{CorpusStore, Session};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "policyqa", version, about = "Answer questions from internal policy documents")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "POLICYQA_CORPUS",
        default_value = "data/policies.json",
        help = "Corpus JSON file"
    )]
    corpus: PathBuf,
    #[arg(
        long,
        global = true,
        env = "POLICYQA_CATEGORY",
        default_value = "all",
        help = "Restrict search to one policy category"
    )]
    category: CategoryFilter,
    #[arg(long, global = true, env = "POLICYQA_MIN_SCORE", help = "Drop sections scoring below this")]
    min_score: Option<u32>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(short, long, global = true, help = "Debug logging on stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question.
    Ask { query: String },
    /// Show how each matching section scored.
    Explain { query: String },
    /// List the policy categories in the corpus.
    Categories,
    /// List the frequently asked questions shipped with the corpus.
    Faq,
    /// Interactive question loop on stdin.
    Chat,
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoredSection {
    rank: usize,
    #[serde(flatten)]
    result: SupplementaryResult,
    category: String,
    breakdown: ScoreBreakdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("policyqa v{}", env!("CARGO_PKG_VERSION"));

    let mut store = CorpusStore::new();
    store
        .load_file(&cli.corpus)
        .await
        .with_context(|| format!("loading corpus from {}", cli.corpus.display()))?;
    let corpus = store.corpus()?;

    let mut search = SearchConfig::default();
    if let Some(min_score) = cli.min_score {
        search.min_score = min_score;
    }
    let assistant = Assistant::new(search, AnswerConfig::default());

    match &cli.command {
        Commands::Ask { query } => {
            let answer = assistant
                .ask(&corpus, query, &cli.category)
                .context("answering question")?;
            if cli.json {
                print_json(&answer)?;
            } else {
                display::print_answer_card(&answer);
            }
        }
        Commands::Explain { query } => {
            let results = assistant
                .search(&corpus, query, &cli.category)
                .context("ranking sections")?;
            if cli.json {
                let rows: Vec<ScoredSection> = results
                    .iter()
                    .enumerate()
                    .map(|(i, r)| scored_section(i + 1, r))
                    .collect();
                print_json(&rows)?;
            } else {
                display::print_score_table(&results)?;
            }
        }
        Commands::Categories => {
            print_out(cli.json, &corpus.categories(), |c| c.to_string())?;
        }
        Commands::Faq => {
            let questions: Vec<_> = corpus
                .common_questions
                .iter()
                .filter(|q| cli.category.matches(&q.category))
                .collect();
            print_out(cli.json, &questions, |q| {
                if q.category.is_empty() {
                    q.question.clone()
                } else {
                    format!("[{}] {}", q.category, q.question)
                }
            })?;
        }
        Commands::Chat => {
            let mut session = Session::new(cli.category.clone());
            run_chat(&assistant, &corpus, &mut session, cli.json).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn scored_section(rank: usize, r: &SearchResult<'_>) -> ScoredSection {
    ScoredSection {
        rank,
        result: SupplementaryResult::from(r),
        category: r.document.category.clone(),
        breakdown: r.breakdown,
    }
}

// ── Chat loop ──

async fn run_chat(
    assistant: &Assistant,
    corpus: &Corpus,
    session: &mut Session,
    json: bool,
) -> anyhow::Result<()> {
    // With --json, stdout carries only JSON documents.
    if !json {
        println!("Ask a question, or :category <name>, :recent, :log, :quit");
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if let Some(prompt) = prompt(session, json) {
            print!("{prompt}");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit" | ":q", _) => break,
            (":category", name) => {
                session.set_category(CategoryFilter::parse(name));
                if json {
                    print_json(session.category().as_str())?;
                } else {
                    println!("category: {}", session.category());
                }
            }
            (":recent", _) => {
                let recent: Vec<&str> = session.recent_questions().collect();
                print_out(json, &recent, |q| q.to_string())?;
            }
            (":log", _) => {
                if json {
                    let entries: Vec<_> = session.log().collect();
                    print_json(&entries)?;
                } else {
                    session.log().for_each(display::print_log_entry);
                }
            }
            _ => {
                let outcome = assistant
                    .ask_detailed(corpus, line, session.category())
                    .context("answering question")?;
                if json {
                    print_json(&outcome.answer)?;
                } else {
                    display::print_answer_card(&outcome.answer);
                }
                session.record(line, &outcome);
            }
        }
        if !json {
            println!();
        }
    }

    Ok(())
}

/// Interactive prompt, or `None` when stdout is reserved for JSON.
fn prompt(session: &Session, json: bool) -> Option<String> {
    (!json).then(|| format!("[{}] > ", session.category()))
}

// ── Output helpers ──

fn json_out<T: Serialize>(data: T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOut { ok: true, data })
}

fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", json_out(data)?);
    Ok(())
}

fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        print_json(data)?;
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_prompt_in_json_mode() {
        let session = Session::new(CategoryFilter::parse("travel"));
        assert_eq!(prompt(&session, true), None);
        assert_eq!(prompt(&session, false).as_deref(), Some("[travel] > "));
    }

    #[test]
    fn category_change_reported_as_json() {
        let session = Session::new(CategoryFilter::parse("leave"));
        let out = json_out(session.category().as_str()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["data"], "leave");
    }

    #[test]
    fn chat_log_serializes_as_json() {
        let corpus = Corpus::from_json(
            r#"{"policies": [{
                "title": "Travel Policy", "version": "1.0", "effectiveDate": "2025-01-01",
                "owner": "HR team", "category": "travel", "status": "active",
                "sections": [{"section": "3", "title": "Travel limits",
                              "content": "Travel is capped at 50,000 won.", "amounts": [50000]}]
            }]}"#,
        )
        .unwrap();
        let mut session = Session::default();
        let outcome = Assistant::default()
            .ask_detailed(&corpus, "travel limit", session.category())
            .unwrap();
        session.record("travel limit", &outcome);

        let entries: Vec<_> = session.log().collect();
        let value: serde_json::Value = serde_json::from_str(&json_out(&entries).unwrap()).unwrap();
        assert_eq!(value["data"][0]["question"], "travel limit");
        assert_eq!(value["data"][0]["source"], "Travel Policy");
    }
}
