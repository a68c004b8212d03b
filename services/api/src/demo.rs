use crate::infra::{InMemoryJobAnalysisRepository, StaticCatalog};
use chrono::Utc;
use clap::Args;
use portfolio_ai::config::load_relevance_config;
use portfolio_ai::error::AppError;
use portfolio_ai::workflows::feedback::FeedbackInsight;
use portfolio_ai::workflows::job_mode::{
    JobAnalysisRecord, JobModeService, JobOptimization, JobSubmission, RelevanceConfig,
    RelevanceResult,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_POSTING: &str = "Senior machine learning engineer for a fintech startup. \
    You will ship NLP models in Python, own SQL pipelines, and deploy services with Docker. \
    Strong communication skills and experience with data science teams required.";

const SAMPLE_FEEDBACK: &str = "Love the project write-ups. The chatbot demo was great. \
    Navigation on mobile felt a bit poor.";

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Plain-text job description to analyze
    #[arg(long)]
    pub(crate) job_file: PathBuf,
    /// Job title recorded with the analysis
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Company recorded with the analysis
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// JSON catalog export with `skills` and `projects` (defaults to the sample portfolio)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// JSON file overriding relevance weights and thresholds
    #[arg(long)]
    pub(crate) relevance_config: Option<PathBuf>,
    /// Print the stored record as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also print per-factor score breakdowns
    #[arg(long)]
    pub(crate) explain: bool,
    /// Skip the feedback insight portion of the demo
    #[arg(long)]
    pub(crate) skip_feedback: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        job_file,
        title,
        company,
        catalog,
        relevance_config,
        json,
    } = args;

    let description = fs::read_to_string(&job_file)?;
    let config = match relevance_config {
        Some(path) => load_relevance_config(&path)?,
        None => RelevanceConfig::default(),
    };

    let now = Utc::now();
    let catalog = StaticCatalog::load(catalog.as_deref(), now)?;
    let (record, optimization) = analyze_posting(
        catalog,
        config,
        JobSubmission {
            job_title: title,
            company,
            description,
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        render_analysis(&record, &optimization, false);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        explain,
        skip_feedback,
    } = args;

    println!("Portfolio job mode demo");
    let (record, optimization) = analyze_posting(
        StaticCatalog::sample(Utc::now()),
        RelevanceConfig::default(),
        JobSubmission {
            job_title: Some("Senior ML Engineer".to_string()),
            company: Some("Ledgerline".to_string()),
            description: SAMPLE_POSTING.to_string(),
        },
    )?;
    render_analysis(&record, &optimization, explain);

    if !skip_feedback {
        let insight = FeedbackInsight::from_feedback(SAMPLE_FEEDBACK);
        println!("\nVisitor feedback");
        println!("- Summary: {}", insight.summary);
        println!("- Sentiment: {}", insight.sentiment.label());
    }

    Ok(())
}

fn analyze_posting(
    catalog: StaticCatalog,
    config: RelevanceConfig,
    submission: JobSubmission,
) -> Result<(JobAnalysisRecord, JobOptimization), AppError> {
    let service = JobModeService::new(
        Arc::new(catalog),
        Arc::new(InMemoryJobAnalysisRepository::default()),
        config,
    );
    let record = service.analyze(submission, Utc::now())?;
    let optimization = service.optimize(record.job.id)?;
    Ok((record, optimization))
}

pub(crate) fn render_analysis(
    record: &JobAnalysisRecord,
    optimization: &JobOptimization,
    explain: bool,
) {
    let job = &record.job;
    let analysis = &record.analysis;
    let report = &record.report;

    println!("{} at {} (analysis #{})", job.job_title, job.company, job.id.0);
    println!(
        "Experience level: {} | Industry: {}",
        analysis.experience_level.label(),
        analysis.industry.label()
    );
    if report.extracted_skills.is_empty() {
        println!("Skills mentioned: none recognised");
    } else {
        println!("Skills mentioned: {}", report.extracted_skills.join(", "));
    }

    if report.skill_highlights.is_empty() {
        println!("\nSkill highlights: none");
    } else {
        println!("\nSkill highlights");
        for highlight in &report.skill_highlights {
            render_result(highlight, explain);
        }
    }

    if report.project_rankings.is_empty() {
        println!("\nProject rankings: none");
    } else {
        println!("\nProject rankings");
        for ranking in &report.project_rankings {
            render_result(ranking, explain);
        }
    }

    println!(
        "\nTop skills: {} | Recommended projects: {}",
        report.top_skills.len(),
        report.recommended_projects.len()
    );

    if !report.rejected.is_empty() {
        println!("\nSkipped catalog entries");
        for rejected in &report.rejected {
            println!("- {:?}: {}", rejected.subject, rejected.error);
        }
    }

    println!("\nPortfolio optimization");
    for line in optimization
        .skill_updates
        .iter()
        .chain(&optimization.project_highlights)
        .chain(&optimization.profile_updates)
    {
        println!("- {line}");
    }
}

fn render_result<I>(result: &RelevanceResult<I>, explain: bool) {
    println!("- {} [{}]: {}", result.label, result.score, result.reason);
    if explain {
        for component in &result.components {
            println!(
                "    +{} {:?} ({})",
                component.points, component.factor, component.notes
            );
        }
    }
}
