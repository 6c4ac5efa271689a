//! NIDANA symptom analysis CLI
//!
//! Ranks candidate conditions for a set of symptoms, suggests symptoms that
//! commonly occur alongside them, and prints home-remedy sheets.
//!
//! Usage:
//!   nidana suggest fever
//!   nidana predict "headache, nausea" dizziness
//!   nidana remedies migraine
//!   nidana consult headache --add dizziness --accept-suggestions
//!
//! The `intake` → `confirm` → `report` subcommands run the same consultation
//! across separate invocations, keeping state in a JSON session file.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use nidana_contracts::{
    error::{NidanaError, NidanaResult},
    MatchResult, RemedySheet, SymptomSet,
};
use nidana_core::{
    traits::{ConditionMatcher, RemedyCatalog, SymptomStore, SymptomSuggester},
    Consultation, Prediction,
};
use nidana_engine::{CoOccurrenceSuggester, WeightedMatcher};
use nidana_knowledge::KnowledgeBase;
use nidana_session::{InMemorySymptomStore, JsonFileStore};

// ── CLI definition ────────────────────────────────────────────────────────────

/// NIDANA: symptom matching and co-occurrence suggestions.
///
/// Symptom arguments may be comma-separated lists; each piece is trimmed and
/// exact duplicates are dropped.
#[derive(Parser)]
#[command(
    name = "nidana",
    about = "Rank candidate conditions for a set of symptoms",
    long_about = "Ranks candidate conditions for a set of symptoms, suggests co-occurring\n\
                  symptoms, and prints home-remedy sheets.\n\n\
                  This is not a medical diagnosis. Consult a healthcare professional."
)]
struct Cli {
    /// Knowledge base TOML file. Defaults to the built-in knowledge base.
    #[arg(long, global = true, value_name = "PATH")]
    knowledge: Option<PathBuf>,

    /// Session file used by `intake`, `confirm`, `report` and `reset`.
    #[arg(long, global = true, value_name = "PATH", default_value = ".nidana-session.json")]
    session: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SymptomArgs {
    /// Symptoms, e.g. `headache "sore throat"` or `"headache, nausea"`.
    #[arg(value_name = "SYMPTOMS")]
    symptoms: Vec<String>,

    /// Preset symptom to add, as listed by `nidana catalog`.
    #[arg(long = "preset", short = 'p', value_name = "NAME")]
    presets: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest symptoms that commonly accompany the given ones.
    Suggest(SymptomArgs),
    /// Rank candidate conditions for the given symptoms.
    Predict(SymptomArgs),
    /// Print the home-remedy sheet for a condition id.
    Remedies {
        #[arg(value_name = "CONDITION_ID")]
        condition_id: String,
    },
    /// Run a whole consultation in one go: intake, confirm, predict, remedies.
    Consult {
        #[command(flatten)]
        symptoms: SymptomArgs,
        /// Extra symptom to confirm alongside the intake set.
        #[arg(long = "add", value_name = "SYMPTOM")]
        add: Vec<String>,
        /// Confirm every suggested symptom as well.
        #[arg(long)]
        accept_suggestions: bool,
    },
    /// Start a consultation: store the intake set and show suggestions.
    Intake(SymptomArgs),
    /// Confirm the stored intake set, optionally adding or removing symptoms.
    Confirm {
        /// Extra symptom to confirm alongside the intake set.
        #[arg(long = "add", value_name = "SYMPTOM")]
        add: Vec<String>,
        /// Symptom to drop from the intake set first (exact spelling).
        #[arg(long = "remove", value_name = "SYMPTOM")]
        remove: Vec<String>,
    },
    /// Rank conditions for the confirmed symptoms and show remedies for the best match.
    Report,
    /// Forget the stored consultation.
    Reset,
    /// List conditions, preset symptoms and knowledge base issues.
    Catalog,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("nidana: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> NidanaResult<()> {
    let kb = KnowledgeBase::load(cli.knowledge.as_deref())?;

    match cli.command {
        Command::Suggest(args) => run_suggest(&kb, &args),
        Command::Predict(args) => run_predict(&kb, &args),
        Command::Remedies { condition_id } => run_remedies(&kb, &condition_id),
        Command::Consult {
            symptoms,
            add,
            accept_suggestions,
        } => run_consult(&kb, &symptoms, &add, accept_suggestions),
        Command::Intake(args) => run_intake(&kb, &cli.session, &args),
        Command::Confirm { add, remove } => run_confirm(&kb, &cli.session, &add, &remove),
        Command::Report => run_report(&kb, &cli.session),
        Command::Reset => run_reset(&kb, &cli.session),
        Command::Catalog => run_catalog(&kb),
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn consultation(kb: &KnowledgeBase, store: Box<dyn SymptomStore>) -> Consultation {
    Consultation::new(
        store,
        Box::new(CoOccurrenceSuggester::new(kb.cooccurrence())),
        Box::new(WeightedMatcher::new(kb.conditions())),
        Box::new(kb.remedies().clone()),
    )
}

fn session(kb: &KnowledgeBase, path: &Path) -> Consultation {
    debug!(path = %path.display(), "using session file");
    consultation(kb, Box::new(JsonFileStore::open(path)))
}

/// Build the intake set from positional symptoms and `--preset` flags.
fn symptom_set(kb: &KnowledgeBase, args: &SymptomArgs) -> NidanaResult<SymptomSet> {
    let mut set = SymptomSet::new();
    for arg in &args.symptoms {
        set.add_free_text(arg);
    }
    for preset in &args.presets {
        if !kb.presets().iter().any(|p| p == preset) {
            warn!(preset = %preset, "not a known preset, adding as entered");
        }
        set.add_preset(preset);
    }

    if set.is_empty() {
        return Err(NidanaError::NoSymptoms);
    }
    Ok(set)
}

/// Split each `--add` value the same way intake does.
fn extra_symptoms(values: &[String]) -> Vec<String> {
    let mut extra = SymptomSet::new();
    for value in values {
        extra.add_free_text(value);
    }
    extra.into_vec()
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_suggest(kb: &KnowledgeBase, args: &SymptomArgs) -> NidanaResult<()> {
    let set = symptom_set(kb, args)?;
    let suggestions = CoOccurrenceSuggester::new(kb.cooccurrence()).suggest(set.as_slice());
    print_suggestions(&suggestions);
    Ok(())
}

fn run_predict(kb: &KnowledgeBase, args: &SymptomArgs) -> NidanaResult<()> {
    let set = symptom_set(kb, args)?;
    let matches = WeightedMatcher::new(kb.conditions()).rank(set.as_slice());
    print_prediction(&Prediction {
        symptoms: set.into_vec(),
        matches,
    });
    Ok(())
}

fn run_remedies(kb: &KnowledgeBase, condition_id: &str) -> NidanaResult<()> {
    let sheet = kb
        .remedies()
        .lookup(condition_id)
        .ok_or_else(|| NidanaError::UnknownCondition {
            id: condition_id.to_string(),
        })?;
    print_remedy_sheet(sheet);
    Ok(())
}

fn run_consult(
    kb: &KnowledgeBase,
    args: &SymptomArgs,
    add: &[String],
    accept_suggestions: bool,
) -> NidanaResult<()> {
    let set = symptom_set(kb, args)?;
    let consultation = consultation(kb, Box::new(InMemorySymptomStore::new()));

    let suggestions = consultation.intake(&set)?;
    print_suggestions(&suggestions);

    let mut additional = extra_symptoms(add);
    if accept_suggestions {
        for suggestion in suggestions {
            if !additional.contains(&suggestion) {
                additional.push(suggestion);
            }
        }
    }
    consultation.confirm(&additional)?;

    let prediction = consultation.predict()?;
    print_prediction(&prediction);
    print_best_remedies(&consultation, &prediction)
}

fn run_intake(kb: &KnowledgeBase, path: &Path, args: &SymptomArgs) -> NidanaResult<()> {
    let set = symptom_set(kb, args)?;
    let suggestions = session(kb, path).intake(&set)?;

    println!("Recorded {} symptom(s): {}", set.len(), set.as_slice().join(", "));
    print_suggestions(&suggestions);
    println!("Next: nidana confirm [--add <SYMPTOM>]... [--remove <SYMPTOM>]...");
    Ok(())
}

fn run_confirm(
    kb: &KnowledgeBase,
    path: &Path,
    add: &[String],
    remove: &[String],
) -> NidanaResult<()> {
    let consultation = session(kb, path);

    for symptom in remove {
        consultation.revise(symptom)?;
    }
    let confirmed = consultation.confirm(&extra_symptoms(add))?;

    println!("Confirmed {} symptom(s): {}", confirmed.len(), confirmed.join(", "));
    println!("Next: nidana report");
    Ok(())
}

fn run_report(kb: &KnowledgeBase, path: &Path) -> NidanaResult<()> {
    let consultation = session(kb, path);
    let prediction = consultation.predict()?;
    print_prediction(&prediction);
    print_best_remedies(&consultation, &prediction)
}

fn run_reset(kb: &KnowledgeBase, path: &Path) -> NidanaResult<()> {
    session(kb, path).reset()?;
    println!("Session cleared.");
    Ok(())
}

fn run_catalog(kb: &KnowledgeBase) -> NidanaResult<()> {
    println!("Conditions");
    println!("==========");
    for condition in kb.conditions().iter() {
        let severity = condition
            .severity
            .map(|s| format!("severity {}", s))
            .unwrap_or_else(|| "severity n/a".to_string());
        let remedies = if kb.remedies().lookup(&condition.id).is_some() {
            "remedies"
        } else {
            "no remedies"
        };
        println!(
            "  {:<18} {:<30} {}, {}",
            condition.id, condition.display_name, severity, remedies
        );
        println!("  {:<18} {}", "", condition.symptoms.join(", "));
    }

    println!();
    println!("Preset symptoms");
    println!("===============");
    println!("  {}", kb.presets().join(", "));

    let issues = kb.validate();
    if !issues.is_empty() {
        println!();
        println!("Knowledge base issues");
        println!("=====================");
        for issue in issues {
            println!("  - {}", issue);
        }
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("No related symptoms to suggest.");
        return;
    }
    println!("You may also be experiencing:");
    for suggestion in suggestions {
        println!("  + {}", suggestion);
    }
}

fn print_prediction(prediction: &Prediction) {
    println!();
    println!("Analyzed symptoms: {}", prediction.symptoms.join(", "));
    println!();

    if prediction.is_empty() {
        println!("No conditions matched these symptoms.");
        println!("Try adding more symptoms, or consult a healthcare professional.");
        return;
    }

    for (rank, result) in prediction.matches.iter().enumerate() {
        print_match(rank + 1, result);
    }
    println!();
    println!("This is not a medical diagnosis. Consult a healthcare professional.");
}

fn print_match(rank: usize, result: &MatchResult) {
    println!(
        "  {}. {:<28} {:>3}%  [{}]",
        rank,
        result.display_name,
        result.score,
        result.band().label()
    );
    if let Some(scientific) = &result.scientific_name {
        println!("     {}", scientific);
    }
    if let Some(description) = &result.description {
        println!("     {}", description);
    }
    if let Some(severity) = result.severity {
        println!("     severity {}/5, id: {}", severity, result.condition_id);
    } else {
        println!("     id: {}", result.condition_id);
    }
}

fn print_best_remedies(consultation: &Consultation, prediction: &Prediction) -> NidanaResult<()> {
    let Some(best) = prediction.best() else {
        return Ok(());
    };

    match consultation.remedies(&best.condition_id) {
        Ok(sheet) => {
            println!();
            print_remedy_sheet(sheet);
            Ok(())
        }
        Err(NidanaError::UnknownCondition { id }) => {
            println!();
            println!("No home remedies are listed for '{}'.", id);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn print_remedy_sheet(sheet: &RemedySheet) {
    println!("Home remedies: {}", sheet.name);
    println!("{}", "=".repeat(15 + sheet.name.len()));
    println!("{}", sheet.description);

    for remedy in &sheet.remedies {
        println!();
        println!("  {} ({})", remedy.title, remedy.category.label());
        println!("    {}", remedy.description);
    }

    if !sheet.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &sheet.warnings {
            println!("  ! {}", warning);
        }
    }

    if !sheet.when_to_see_doctor.is_empty() {
        println!();
        println!("See a doctor if:");
        for sign in &sheet.when_to_see_doctor {
            println!("  - {}", sign);
        }
    }
}
