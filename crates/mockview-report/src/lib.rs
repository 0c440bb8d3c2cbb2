//! mockview-report — HTML and Markdown output for grade reports and interview transcripts.

pub mod html;
pub mod markdown;

pub use html::{generate_html, transcript_html, write_html_report, write_transcript_html};
pub use markdown::{transcript_markdown, write_transcript_markdown};
