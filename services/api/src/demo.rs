use crate::infra::{load_catalog, ConfiguredStore};
use chrono::Weekday;
use clap::Args;
use job_swipe::config::AppConfig;
use job_swipe::error::AppError;
use job_swipe::triage::{
    DragSample, FilterConfiguration, JobCategory, JobPosting, LanguageLevel, SortKey, StackView,
    SwipeResult, TriageOutcome, TriageSession, WageRange,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Restrict to a job category (repeatable)
    #[arg(long)]
    pub(crate) category: Vec<JobCategory>,
    /// Restrict to a required language level such as N3 (repeatable)
    #[arg(long)]
    pub(crate) level: Vec<LanguageLevel>,
    /// Restrict to jobs working on this weekday (repeatable)
    #[arg(long)]
    pub(crate) day: Vec<Weekday>,
    /// Lowest acceptable hourly-equivalent wage
    #[arg(long)]
    pub(crate) wage_min: Option<u32>,
    /// Highest acceptable hourly-equivalent wage
    #[arg(long)]
    pub(crate) wage_max: Option<u32>,
    /// Queue order: wage, commute-home, commute-school, or date
    #[arg(long, default_value = "date")]
    pub(crate) sort: SortKey,
}

impl FilterArgs {
    fn configuration(&self) -> FilterConfiguration {
        let unbounded = WageRange::unbounded();
        FilterConfiguration {
            categories: self.category.iter().copied().collect(),
            wage_range: WageRange::new(
                self.wage_min.unwrap_or(unbounded.min),
                self.wage_max.unwrap_or(unbounded.max),
            ),
            language_levels: self.level.iter().copied().collect(),
            weekdays: self.day.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QueueArgs {
    /// Job catalog (CSV or JSON). Defaults to APP_CATALOG_PATH or the bundled sample.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Ledger file. Defaults to APP_LEDGER_PATH or an in-memory ledger.
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
}

#[derive(Args, Debug)]
pub(crate) struct TriageArgs {
    /// Job catalog (CSV or JSON). Defaults to APP_CATALOG_PATH or the bundled sample.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Ledger file. Defaults to APP_LEDGER_PATH or an in-memory ledger.
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Comma separated swipes applied to the front card in turn: r/right accepts, l/left rejects
    #[arg(long, value_delimiter = ',')]
    pub(crate) swipes: Vec<TriageOutcome>,
}

pub(crate) fn run_queue(args: QueueArgs) -> Result<(), AppError> {
    let QueueArgs {
        catalog,
        ledger,
        filters,
    } = args;

    let session = open_session(catalog, ledger, &filters)?;
    println!(
        "Triage queue ({} pending, sorted by {:?})",
        session.pending_count(),
        session.sort_key()
    );
    for (position, job) in session.queue().iter().enumerate() {
        println!("{:>3}. {}", position + 1, describe_job(job));
    }

    render_stack(&session.stack());
    render_progress(&session);
    Ok(())
}

pub(crate) fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let TriageArgs {
        catalog,
        ledger,
        filters,
        swipes,
    } = args;

    let mut session = open_session(catalog, ledger, &filters)?;
    let distance = session.thresholds().distance();

    println!("Replaying {} swipe(s)", swipes.len());
    for outcome in swipes {
        let Some(job_id) = session.begin_drag() else {
            println!("- queue exhausted; remaining swipes ignored");
            break;
        };

        let dx = match outcome {
            TriageOutcome::Accepted => distance * 2.0,
            TriageOutcome::Rejected => -distance * 2.0,
        };
        let sample = DragSample::horizontal(dx, 0.0);
        if let Some(feedback) = session.drag(sample) {
            println!(
                "- {job_id}: preview {:?}, rotation {:.1} deg",
                feedback.preview, feedback.transform.rotation_degrees
            );
        }

        match session.release(sample) {
            SwipeResult::Committed(result) => {
                let decision = result.decision();
                let note = if result.is_applied() {
                    "recorded"
                } else {
                    "already decided"
                };
                println!(
                    "  {} -> {} ({note})",
                    decision.job_id,
                    decision.outcome.label()
                );
            }
            SwipeResult::SnapBack { job_id } => println!("  {job_id} snapped back"),
            SwipeResult::Ignored => println!("  no active drag"),
        }
    }

    if session.is_dirty() {
        println!("Ledger could not be saved; retrying once");
        session.flush()?;
    }

    render_list("Accepted", &session.accepted());
    render_list("Rejected", &session.rejected());
    render_stack(&session.stack());
    render_progress(&session);
    Ok(())
}

fn open_session(
    catalog: Option<PathBuf>,
    ledger: Option<PathBuf>,
    filters: &FilterArgs,
) -> Result<TriageSession<ConfiguredStore>, AppError> {
    let config = AppConfig::load()?;
    let catalog_path = catalog.or(config.triage.catalog_path);
    let ledger_path = ledger.or(config.triage.ledger_path);

    let catalog = load_catalog(catalog_path.as_deref())?;
    let store = ConfiguredStore::from_path(ledger_path.as_deref());
    println!(
        "Catalog: {} job(s) | ledger: {}",
        catalog.len(),
        store.describe()
    );

    let mut session = TriageSession::new(catalog, store, &config.triage.settings)?;
    session.configure(filters.configuration(), filters.sort);
    Ok(session)
}

fn describe_job(job: &JobPosting) -> String {
    format!(
        "{} | {} | {} | {}/h | {} | home {} min, school {} min | posted {}",
        job.id,
        job.title,
        job.category.label(),
        job.wage.hourly_equivalent(),
        job.language_level.label(),
        job.commute.home_minutes,
        job.commute.school_minutes,
        job.posted_on
    )
}

fn render_stack(stack: &StackView<'_>) {
    match stack {
        StackView::Empty => println!("\nStack: empty, nothing left to triage"),
        StackView::Cards(cards) => {
            println!("\nStack (front first)");
            for card in cards {
                println!(
                    "- depth {} | z {} | scale {:.2} | offset {:.0} | {}{}",
                    card.depth,
                    card.z_index,
                    card.scale,
                    card.offset_y,
                    card.job.title,
                    if card.interactive { " (swipeable)" } else { "" }
                );
            }
        }
    }
}

fn render_list(heading: &str, jobs: &[&JobPosting]) {
    if jobs.is_empty() {
        println!("\n{heading}: none");
        return;
    }
    println!("\n{heading}");
    for job in jobs {
        println!("- {}", describe_job(job));
    }
}

fn render_progress<S>(session: &TriageSession<S>)
where
    S: job_swipe::triage::LedgerStore,
{
    let progress = session.progress();
    println!(
        "\nProgress: {} accepted, {} rejected, {} pending of {} total",
        progress.accepted, progress.rejected, progress.pending, progress.total
    );
}
