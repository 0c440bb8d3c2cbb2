//! mockview CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "mockview",
    version,
    about = "Mock interview practice with answer scoring"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a generated interview question
    Ask {
        /// Domain (software-development, data-science, marketing)
        #[arg(long, default_value = "software-development")]
        domain: String,

        /// Difficulty (beginner, intermediate, advanced)
        #[arg(long, default_value = "intermediate")]
        difficulty: String,

        /// Number of distinct questions to print
        #[arg(long, default_value = "1")]
        count: usize,

        /// Seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score a single answer
    Evaluate {
        /// The interview question
        #[arg(long)]
        question: String,

        /// The answer to score
        #[arg(long)]
        answer: String,

        #[arg(long, default_value = "software-development")]
        domain: String,

        /// Embedding provider name from config
        #[arg(long)]
        provider: Option<String>,

        /// Embedding model
        #[arg(long)]
        model: Option<String>,

        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an interactive interview on stdin
    Interview {
        #[arg(long, default_value = "software-development")]
        domain: String,

        /// Specialization within the domain
        #[arg(long)]
        specialization: Option<String>,

        #[arg(long, default_value = "intermediate")]
        difficulty: String,

        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// Write the transcript here when the session ends (.html, .md, or .json)
        #[arg(long)]
        transcript: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Grade an answer sheet
    Grade {
        /// Path to .toml answer sheet or directory
        #[arg(long)]
        sheet: PathBuf,

        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// Max concurrent evaluations (defaults to config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output directory (defaults to config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Only grade answers with one of these tags (comma-separated)
        #[arg(long)]
        filter: Option<String>,

        /// Seed for reproducible feedback wording
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compare two grade reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Score change (out of 10) that counts as a regression
        #[arg(long, default_value = "0.5")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Ask the interview assistant about a question
    Chat {
        /// What to ask
        message: String,

        /// The interview question under discussion
        #[arg(long, default_value = "")]
        question: String,

        #[arg(long, default_value = "software-development")]
        domain: String,
    },

    /// List study references for a domain
    References {
        #[arg(long, default_value = "software-development")]
        domain: String,

        /// Narrow to references matching a topic
        #[arg(long)]
        topic: Option<String>,

        /// Add study suggestions pitched at this score
        #[arg(long)]
        score: Option<f64>,
    },

    /// List domains and their specializations
    Domains,

    /// Validate answer sheet TOML files
    Validate {
        /// Path to answer sheet file or directory
        #[arg(long)]
        sheet: PathBuf,
    },

    /// List available embedding models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// Create starter config and example answer sheet
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "warn,mockview=debug,mockview_core=debug,mockview_providers=debug"
    } else {
        "warn,mockview=info,mockview_core=info,mockview_providers=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = cli.config;

    let result = match cli.command {
        Commands::Ask {
            domain,
            difficulty,
            count,
            seed,
        } => commands::ask::execute(&domain, &difficulty, count, seed),
        Commands::Evaluate {
            question,
            answer,
            domain,
            provider,
            model,
            json,
        } => {
            commands::evaluate::execute(
                &question,
                &answer,
                &domain,
                provider.as_deref(),
                model.as_deref(),
                json,
                config.as_deref(),
            )
            .await
        }
        Commands::Interview {
            domain,
            specialization,
            difficulty,
            provider,
            model,
            transcript,
            seed,
        } => {
            commands::interview::execute(
                commands::interview::InterviewArgs {
                    domain,
                    specialization,
                    difficulty,
                    provider,
                    model,
                    transcript,
                    seed,
                },
                config.as_deref(),
            )
            .await
        }
        Commands::Grade {
            sheet,
            provider,
            model,
            parallelism,
            output,
            format,
            filter,
            seed,
        } => {
            commands::grade::execute(
                commands::grade::GradeArgs {
                    sheet,
                    provider,
                    model,
                    parallelism,
                    output,
                    format,
                    filter,
                    seed,
                },
                config.as_deref(),
            )
            .await
        }
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Chat {
            message,
            question,
            domain,
        } => commands::chat::execute(&message, &question, &domain),
        Commands::References {
            domain,
            topic,
            score,
        } => commands::references::execute(&domain, topic.as_deref(), score),
        Commands::Domains => commands::domains::execute(),
        Commands::Validate { sheet } => commands::validate::execute(sheet),
        Commands::ListModels { provider } => {
            commands::list_models::execute(provider.as_deref(), config.as_deref())
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
