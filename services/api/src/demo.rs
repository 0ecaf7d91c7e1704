use crate::infra::{build_engine, load_evaluator, InMemorySessionRepository};
use clap::Args;
use feedback_quality::config::AppConfig;
use feedback_quality::disclosure::{ContentModel, FormLayout};
use feedback_quality::error::AppError;
use feedback_quality::quality::{score_csv_path, Evaluation, FieldType};
use feedback_quality::sessions::{FormSessionService, SessionSnapshot};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Form field id (e.g. `situation`, `next-steps`); unknown ids score generically
    #[arg(long)]
    pub(crate) field: String,
    /// Field type override (e.g. `followUp`, `support`)
    #[arg(long)]
    pub(crate) field_type: Option<String>,
    /// Text to score. Read from stdin when omitted.
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Print the evaluation as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with `field_id,text` columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print one JSON object per row instead of the table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Content model to walk through (simple, sbi, star)
    #[arg(long, default_value = "sbi", value_parser = parse_model)]
    pub(crate) model: ContentModel,
}

fn parse_model(raw: &str) -> Result<ContentModel, String> {
    ContentModel::parse(raw)
        .ok_or_else(|| format!("unknown content model '{raw}' (expected simple, sbi or star)"))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        field,
        field_type,
        text,
        json,
    } = args;

    let config = AppConfig::load()?;
    let evaluator = load_evaluator(&config)?;
    let field_type = match field_type {
        Some(raw) => FieldType::parse(&raw),
        None => FormLayout::feedback_forge().field_type(&field),
    };

    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let evaluation = evaluator.evaluate(&text, field_type);
    if json {
        print_json(&evaluation);
    } else {
        println!("Field {field} ({field_type})");
        render_evaluation(&evaluation, evaluator.min_score_to_progress());
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let evaluator = load_evaluator(&config)?;
    let layout = FormLayout::feedback_forge();
    let rows = score_csv_path(&args.csv, &evaluator, layout.catalog())?;

    if args.json {
        for row in &rows {
            print_json(row);
        }
        return Ok(());
    }

    let threshold = evaluator.min_score_to_progress();
    println!("{:>5}  {:<24} {:<12} {:>5}  level", "line", "field", "type", "score");
    for row in &rows {
        println!(
            "{:>5}  {:<24} {:<12} {:>5}  {}",
            row.line,
            row.field_id,
            row.field_type.as_str(),
            row.evaluation.score,
            row.evaluation.level.label()
        );
    }

    if rows.is_empty() {
        println!("No rows to score.");
        return Ok(());
    }

    let total: u32 = rows.iter().map(|row| u32::from(row.evaluation.score)).sum();
    let blocked = rows
        .iter()
        .filter(|row| row.evaluation.score < threshold)
        .count();
    println!(
        "\n{} rows | average score {:.1} | {} below the progression threshold ({})",
        rows.len(),
        f64::from(total) / rows.len() as f64,
        blocked,
        threshold
    );
    Ok(())
}

/// Scripted inputs for each content model; the first entry is deliberately weak.
fn demo_script(model: ContentModel) -> Vec<(&'static str, &'static str)> {
    match model {
        ContentModel::Simple => vec![
            ("specific-strengths", "it was fine"),
            (
                "specific-strengths",
                "Your consistent approach to quality assurance kept a 99.8% accuracy rate \
                 across all deliverables over the past quarter",
            ),
            (
                "areas-for-improvement",
                "Share status updates with the client team before each Friday milestone review",
            ),
        ],
        ContentModel::Sbi => vec![
            ("situation", "it was fine"),
            (
                "situation",
                "During the Monday client meeting last week, the quarterly budget review ran over time",
            ),
            (
                "behavior",
                "You interrupted the finance lead twice and skipped the agenda item on vendor costs",
            ),
            (
                "impact",
                "The client left without a decision on the budget, so the project milestone slipped by a week",
            ),
        ],
        ContentModel::Star => vec![
            ("star-situation", "it went ok"),
            (
                "star-situation",
                "Last month the mobile release was blocked by 3 failing payment tests",
            ),
            (
                "task",
                "You owned fixing the payment tests before the Thursday release deadline",
            ),
            (
                "action",
                "You paired with QA, rewrote the test fixtures and added a nightly check on the staging server",
            ),
            (
                "result",
                "The release shipped on schedule and checkout errors dropped by 40% in the first week",
            ),
        ],
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config)?;
    let threshold = engine.evaluator().min_score_to_progress();
    let service = FormSessionService::new(Arc::new(InMemorySessionRepository::default()), engine);

    println!("FeedbackForge form demo: {}", args.model.label());
    let snapshot = service.create(Some(args.model))?;
    let session_id = snapshot.session_id.clone();
    render_snapshot(&snapshot);

    for (field_id, text) in demo_script(args.model) {
        println!("\n> {field_id}: \"{text}\"");
        let outcome = service.record_input(&session_id, field_id, text)?;
        render_evaluation(&outcome.evaluation, threshold);
        if outcome.revealed.is_empty() {
            println!("  Revealed: none");
        } else {
            println!("  Revealed: {}", outcome.revealed.join(", "));
        }
    }

    println!("\nFinal form state");
    render_snapshot(&service.get(&session_id)?);
    Ok(())
}

fn render_evaluation(evaluation: &Evaluation, threshold: u8) {
    let gate = if evaluation.score >= threshold {
        "meets"
    } else {
        "below"
    };
    println!(
        "  Score {} ({}) | {} the progression threshold of {}",
        evaluation.score,
        evaluation.level.label(),
        gate,
        threshold
    );
    let metrics = &evaluation.metrics;
    println!(
        "  Length {} | Specificity {} | Concreteness {} | Actionability {}",
        metrics.length, metrics.specificity, metrics.concreteness, metrics.actionability
    );
    for suggestion in &evaluation.suggestions {
        println!("  - {}", suggestion.message);
    }
}

fn render_snapshot(snapshot: &SessionSnapshot) {
    println!("Session {}", snapshot.session_id);
    for group in &snapshot.groups {
        let status = if group.is_complete() {
            "complete".to_string()
        } else {
            format!("waiting on {}", group.required_incomplete.join(", "))
        };
        println!(
            "  {}: {}/{} visible, {}/{} completed ({})",
            group.group_id, group.visible, group.total, group.completed, group.total, status
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("unable to serialize output: {err}"),
    }
}
