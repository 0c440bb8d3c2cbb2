//! Markdown transcripts of interview sessions.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use mockview_core::references::study_suggestions;
use mockview_core::session::InterviewSession;

use crate::html::write_file;

/// Render an interview session as Markdown.
///
/// Ends with study suggestions pitched at the session's average score.
pub fn transcript_markdown(session: &InterviewSession) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# Mock interview: {}\n", session.domain);
    if let Some(specialization) = &session.specialization {
        let _ = writeln!(md, "- **Specialization:** {specialization}");
    }
    let _ = writeln!(md, "- **Difficulty:** {}", session.difficulty);
    let _ = writeln!(
        md,
        "- **Started:** {}",
        session.started_at.format("%Y-%m-%d %H:%M UTC")
    );

    let progress = session.progress();
    let _ = writeln!(
        md,
        "- **Answered:** {} ({} skipped)",
        progress.answered, progress.skipped
    );
    if let (Some(avg), Some(best)) = (progress.average_score, progress.best_score) {
        let _ = writeln!(md, "- **Average score:** {avg:.1}/10 (best {best:.1})");
    }

    for (i, turn) in session.turns.iter().enumerate() {
        let _ = writeln!(md, "\n## Question {}\n", i + 1);
        let _ = writeln!(md, "{}\n", turn.question.text);
        for line in turn.response.lines() {
            let _ = writeln!(md, "> {line}");
        }
        let e = &turn.evaluation;
        let _ = writeln!(md, "\n**Score:** {:.1}/10 ({})\n", e.score, e.band);
        if !e.found_concepts.is_empty() {
            let _ = writeln!(md, "**Concepts covered:** {}\n", e.found_concepts.join(", "));
        }
        let _ = writeln!(md, "{}", e.feedback);
    }

    let suggestions = study_suggestions(session.domain, None, progress.average_score);
    if !suggestions.is_empty() {
        md.push_str("\n## Study suggestions\n\n");
        for s in suggestions {
            let _ = writeln!(md, "- {s}");
        }
    }

    md
}

/// Write a Markdown transcript to a file.
pub fn write_transcript_markdown(session: &InterviewSession, path: &Path) -> Result<()> {
    write_file(path, &transcript_markdown(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::tests::make_test_session;
    use mockview_core::model::{Difficulty, Domain};

    #[test]
    fn transcript_has_turns_and_suggestions() {
        let md = transcript_markdown(&make_test_session());
        assert!(md.starts_with("# Mock interview: Software Development"));
        assert!(md.contains("**Specialization:** System Design"));
        assert!(md.contains("## Question 1"));
        assert!(md.contains("> Tests check <small> units of code."));
        assert!(md.contains("**Score:** 8.1/10 (high)"));
        assert!(md.contains("**Concepts covered:** testing, security"));
        assert!(md.contains("## Study suggestions"));
        assert!(md.contains("advanced materials"));
    }

    #[test]
    fn empty_session_has_no_suggestions() {
        let session = InterviewSession::new(Domain::DataScience, Difficulty::Beginner);
        let md = transcript_markdown(&session);
        assert!(md.contains("**Answered:** 0 (0 skipped)"));
        assert!(!md.contains("Average score"));
        assert!(!md.contains("Study suggestions"));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.md");
        write_transcript_markdown(&make_test_session(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Question 1"));
    }
}
