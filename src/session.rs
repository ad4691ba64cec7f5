//! Interactive review session
//!
//! The session alternates between awaiting a submission and rendering its
//! result. A typed review ends with an empty line; `:file <path>` submits a
//! TXT, PDF or DOCX file; `:quit` or end of input closes the session.
//! Recoverable problems are shown as warnings and the session keeps going.

use crate::config::OutputFormat;
use crate::controller::{ReviewController, Submission};
use crate::error::{Result, SentimentError};
use crate::output::formatter::ReportGenerator;
use crate::output::report::PredictionReport;
use colored::Colorize;
use log::debug;
use std::io::{BufRead, Write};

/// Counts reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub submissions: usize,
    pub predictions: usize,
    pub rejections: usize,
}

enum SessionCommand {
    Submit(Submission),
    Quit,
}

pub struct Session<'a, R, W> {
    controller: ReviewController<'a>,
    generator: ReportGenerator,
    format: OutputFormat,
    input: R,
    output: W,
    use_colors: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        controller: ReviewController<'a>,
        generator: ReportGenerator,
        format: OutputFormat,
        input: R,
        output: W,
    ) -> Self {
        Self {
            controller,
            generator,
            format,
            input,
            output,
            use_colors: false,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub async fn run(&mut self) -> Result<SessionStats> {
        self.print_instructions()?;
        let mut stats = SessionStats::default();

        while let Some(command) = self.read_command()? {
            let submission = match command {
                SessionCommand::Quit => break,
                SessionCommand::Submit(submission) => submission,
            };

            stats.submissions += 1;
            match self.controller.submit(&submission).await {
                Ok(assessment) => {
                    stats.predictions += 1;
                    let report = PredictionReport::from_assessment(&assessment);
                    let rendered = self.generator.generate_report(&report, &self.format)?;
                    writeln!(self.output, "{}", rendered)?;
                }
                Err(e) if e.is_recoverable() => {
                    stats.rejections += 1;
                    self.warn(&e)?;
                }
                Err(e) => return Err(e),
            }
        }

        debug!("Session ended: {:?}", stats);
        Ok(stats)
    }

    fn print_instructions(&mut self) -> Result<()> {
        writeln!(self.output, "🏨 Hotel Review Analyzer")?;
        writeln!(self.output, "Type or paste a review and finish it with an empty line.")?;
        writeln!(self.output, "Use :file <path> to analyze a TXT, PDF or DOCX file, :quit to leave.")?;
        writeln!(
            self.output,
            "Make sure your review has at least {} words to get a meaningful prediction.\n",
            self.controller.min_tokens()
        )?;
        Ok(())
    }

    fn warn(&mut self, error: &SentimentError) -> Result<()> {
        let message = format!("⚠️  {}", error);
        if self.use_colors {
            writeln!(self.output, "{}\n", message.yellow())?;
        } else {
            writeln!(self.output, "{}\n", message)?;
        }
        Ok(())
    }

    fn read_command(&mut self) -> Result<Option<SessionCommand>> {
        write!(self.output, "✍️  review> ")?;
        self.output.flush()?;

        let mut lines: Vec<String> = Vec::new();
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                if lines.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(SessionCommand::Submit(Submission::typed(lines.join("\n")))));
            }

            let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
            if lines.is_empty() {
                let command = line.trim();
                if command == ":quit" || command == ":q" {
                    return Ok(Some(SessionCommand::Quit));
                }
                if let Some(path) = command.strip_prefix(":file") {
                    let path = path.trim();
                    if path.is_empty() {
                        self.warn(&SentimentError::InvalidInput("usage: :file <path>".to_string()))?;
                        write!(self.output, "✍️  review> ")?;
                        self.output.flush()?;
                        continue;
                    }
                    return Ok(Some(SessionCommand::Submit(Submission::file(path))));
                }
                // leading blank lines are not a submission
                if command.is_empty() {
                    continue;
                }
            } else if line.trim().is_empty() {
                return Ok(Some(SessionCommand::Submit(Submission::typed(lines.join("\n")))));
            }

            lines.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bundle::ClassifierBundle;
    use std::io::Cursor;
    use std::path::Path;

    fn fixture_bundle() -> ClassifierBundle {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/models");
        ClassifierBundle::load_from_paths(
            &dir.join("tfidf_vectorizer.json"),
            &dir.join("logistic_model.json"),
            &dir.join("label_encoder.json"),
        )
        .unwrap()
    }

    async fn run_session(bundle: &ClassifierBundle, script: &str) -> (SessionStats, String) {
        let controller = ReviewController::new(bundle, 3);
        let generator = ReportGenerator::new();
        let mut output = Vec::new();

        let stats = {
            let mut session = Session::new(
                controller,
                generator,
                OutputFormat::Json,
                Cursor::new(script.as_bytes().to_vec()),
                &mut output,
            );
            session.run().await.unwrap()
        };

        (stats, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_multiline_review_ends_at_blank_line() {
        let bundle = fixture_bundle();
        let script = "The room was dirty\nand the staff were rude.\n\n:quit\n";

        let (stats, output) = run_session(&bundle, script).await;
        assert_eq!(stats, SessionStats { submissions: 1, predictions: 1, rejections: 0 });
        assert!(output.contains("\"label\": \"Negative Review\""));
    }

    #[tokio::test]
    async fn test_session_survives_rejections() {
        let bundle = fixture_bundle();
        let script = "ok\n\n:file notes.rtf\nGreat stay, loved it!\n\n";

        let (stats, output) = run_session(&bundle, script).await;
        assert_eq!(stats, SessionStats { submissions: 3, predictions: 1, rejections: 2 });
        assert!(output.contains("at least 3 words"));
        assert!(output.contains("Unsupported file format"));
        assert!(output.contains("\"label\": \"Positive Review\""));
    }

    #[tokio::test]
    async fn test_review_at_end_of_input_is_submitted() {
        let bundle = fixture_bundle();
        let (stats, output) = run_session(&bundle, "\n\nIt was okay, an average stay").await;
        assert_eq!(stats.predictions, 1);
        assert!(output.contains("\"label\": \"Neutral Review\""));
    }

    #[tokio::test]
    async fn test_file_command_without_path() {
        let bundle = fixture_bundle();
        let (stats, output) = run_session(&bundle, ":file\n:q\n").await;
        assert_eq!(stats.submissions, 0);
        assert!(output.contains("usage: :file <path>"));
    }
}
