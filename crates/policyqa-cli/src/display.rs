//! Terminal rendering for answers and score tables.

use arrow::util::pretty::pretty_format_batches;
use policyqa_search::table::results_to_batch;
use policyqa_search::{ConfidenceLevel, SearchResult, StructuredAnswer};
use policyqa_store::ChatLogEntry;

// ── Answer card ──

/// Print a structured answer as a vertical card.
pub fn print_answer_card(answer: &StructuredAnswer) {
    println!("=== Answer ===");
    println!("{}", answer.conclusion);
    println!();

    if let Some(facts) = &answer.key_facts {
        println!("Key Facts");
        for (label, value) in facts.iter() {
            println!("  {:<26} {}", label, value);
        }
        println!();
    }

    if let Some(source) = &answer.source {
        println!("Source");
        println!("  {:<26} {}", "title", source.title);
        println!("  {:<26} {}", "section", source.section);
        println!("  {:<26} {}", "version", source.version);
        println!("  {:<26} {}", "effective_date", source.effective_date);
        println!("  {:<26} {}", "owner", source.owner);
        println!();
    }

    println!("Next Steps");
    println!("  {}", answer.next_steps);
    println!();

    if let Some(warnings) = &answer.warnings {
        println!("Warnings");
        for w in warnings {
            println!("  ! {w}");
        }
        println!();
    }

    if !answer.additional_results.is_empty() {
        println!("See Also");
        for r in &answer.additional_results {
            println!(
                "  {} §{} {}  (score {})",
                r.document_title, r.section, r.section_title, r.score
            );
        }
        println!();
    }

    let level = ConfidenceLevel::from_percentage(answer.confidence);
    println!("Confidence: {}% ({})", answer.confidence, level.as_str());
    if answer.escalation_advised {
        println!("Escalation advised.");
    }
}

// ── Score table ──

/// Print ranked results with their score breakdown as a table.
pub fn print_score_table(results: &[SearchResult<'_>]) -> anyhow::Result<()> {
    if results.is_empty() {
        println!("No section scored above the threshold.");
        return Ok(());
    }
    let batch = results_to_batch(results)?;
    println!("{}", pretty_format_batches(&[batch])?);
    Ok(())
}

// ── Chat log ──

pub fn print_log_entry(entry: &ChatLogEntry) {
    let source = entry.source.as_deref().unwrap_or("-");
    println!(
        "{}  [{}] {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.category,
        entry.question
    );
    println!(
        "    {}% · {} results · {}",
        entry.confidence, entry.result_count, source
    );
    println!("    {}", entry.answer_preview);
}
