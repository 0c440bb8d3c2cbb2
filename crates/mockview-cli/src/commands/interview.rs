//! The `mockview interview` command: a line-oriented practice session.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use mockview_core::agents::{create_interview_agents, AgentRole};
use mockview_core::chat::chat_response;
use mockview_core::evaluator::ResponseEvaluator;
use mockview_core::generator::QuestionGenerator;
use mockview_core::model::{Difficulty, Domain};
use mockview_core::references::{study_suggestions, topic_references};
use mockview_core::session::InterviewSession;
use mockview_report::{write_transcript_html, write_transcript_markdown};

use super::build_evaluator;
use super::references::print_references;

pub struct InterviewArgs {
    pub domain: String,
    pub specialization: Option<String>,
    pub difficulty: String,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub transcript: Option<PathBuf>,
    pub seed: Option<u64>,
}

const HELP: &str = "\
Type your answer and press Enter. Commands:
  /chat <message>   ask the assistant about the current question
  /skip             skip to another question
  /progress         show your scores so far
  /refs [topic]     list study references
  /new              start a new session
  /quit             end the interview";

/// A parsed line of input.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Answer(&'a str),
    Chat(&'a str),
    Skip,
    Progress,
    Refs(Option<&'a str>),
    New,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Input::Answer(line);
    };
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .unwrap_or((command, ""));
    let rest = (!rest.is_empty()).then_some(rest);

    match name {
        "chat" => Input::Chat(rest.unwrap_or("")),
        "skip" => Input::Skip,
        "progress" => Input::Progress,
        "refs" | "references" => Input::Refs(rest),
        "new" | "reset" => Input::New,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => Input::Unknown(other),
    }
}

pub async fn execute(args: InterviewArgs, config_path: Option<&Path>) -> Result<()> {
    let domain = Domain::resolve(&args.domain);
    let difficulty = Difficulty::resolve(&args.difficulty);

    let (_, evaluator) =
        build_evaluator(config_path, args.provider.as_deref(), args.model.as_deref())?;
    let (evaluator, mut generator) = match args.seed {
        Some(seed) => (evaluator.with_seed(seed), QuestionGenerator::with_seed(seed)),
        None => (evaluator, QuestionGenerator::new()),
    };

    let mut session = InterviewSession::new(domain, difficulty);
    if let Some(specialization) = args.specialization {
        session = session.with_specialization(specialization);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(stdin, &mut session, &evaluator, &mut generator).await?;

    print_progress(&session);

    if let Some(path) = &args.transcript {
        write_transcript(&session, path)?;
        println!("Transcript saved to: {}", path.display());
    }

    Ok(())
}

async fn run_session<R: AsyncBufRead + Unpin>(
    reader: R,
    session: &mut InterviewSession,
    evaluator: &ResponseEvaluator,
    generator: &mut QuestionGenerator,
) -> Result<()> {
    let domain = session.domain;
    let mut agents = create_interview_agents(domain);

    println!("mockview interview: {domain} ({})", session.difficulty);
    println!("{HELP}\n");
    let first = session.start(generator);
    ask(&first.text)?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let current = session
            .current_question
            .as_ref()
            .map(|q| q.text.clone())
            .unwrap_or_default();

        match parse_input(&line) {
            Input::Answer("") => {}
            Input::Answer(answer) => {
                let turn = session.submit(answer, evaluator, generator).await?;
                let e = &turn.evaluation;
                println!("\nScore: {}", e.display_score());
                println!("{}", e.feedback);

                let role = AgentRole::for_score(e.score);
                if let Some(agent) = agents.get_mut(&role) {
                    if let Some(follow_up) = agent.generate_follow_up(answer, e.score) {
                        println!("\n{role}: {follow_up}");
                    }
                    for tip in agent.improvement_suggestions(e.score) {
                        println!("  - {tip}");
                    }
                }

                if let Some(next) = &session.current_question {
                    ask(&next.text)?;
                }
            }
            Input::Chat("") => println!("Usage: /chat <message>\n"),
            Input::Chat(message) => {
                println!("\n{}\n", chat_response(message, &current, domain));
            }
            Input::Skip => {
                let next = session.skip(generator)?;
                ask(&next.text)?;
            }
            Input::Progress => {
                print_progress(session);
                println!();
            }
            Input::Refs(topic) => {
                let topic = topic.or_else(|| {
                    session
                        .current_question
                        .as_ref()
                        .map(|q| q.concept.as_str())
                });
                print_references(&topic_references(domain, topic));
                let average = session.progress().average_score;
                for s in study_suggestions(domain, topic, average) {
                    println!("  {s}");
                }
                println!();
            }
            Input::New => {
                agents = create_interview_agents(domain);
                println!("Starting a new session.");
                let first = session.start(generator);
                ask(&first.text)?;
            }
            Input::Help => println!("{HELP}\n"),
            Input::Quit => break,
            Input::Unknown(name) => println!("Unknown command '/{name}'. Type /help for commands.\n"),
        }
    }

    Ok(())
}

fn ask(question: &str) -> Result<()> {
    println!("\nQuestion: {question}");
    print!("> ");
    std::io::stdout().flush().context("failed to flush stdout")
}

fn print_progress(session: &InterviewSession) {
    let progress = session.progress();
    println!(
        "\nAnswered {} question(s), skipped {}.",
        progress.answered, progress.skipped
    );
    if let (Some(avg), Some(best)) = (progress.average_score, progress.best_score) {
        println!("Average score {avg:.1}/10, best {best:.1}/10.");
    }
}

fn write_transcript(session: &InterviewSession, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => write_transcript_html(session, path),
        Some("md") | Some("markdown") => write_transcript_markdown(session, path),
        Some("json") => session.save_json(path),
        _ => anyhow::bail!(
            "unsupported transcript format for {} (use .html, .md, or .json)",
            path.display()
        ),
    }
}
