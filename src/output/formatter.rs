//! Output formatters for prediction results

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, SentimentError};
use crate::output::report::PredictionReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const BALLOONS: &str = "🎈 🎈 🎈  🎉";

/// Trait for formatting prediction reports
pub trait OutputFormatter {
    fn format_report(&self, report: &PredictionReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored labels
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    show_confidence: bool,
    celebrate: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// HTML fragment formatter
pub struct HtmlFormatter {
    show_confidence: bool,
    celebrate: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<div class="prediction">
<h2>Prediction Result:</h2>
<span style='color: {{ color }}; font-size: 24px;'>{{ glyph }} {{ label }}</span>
{% if show_confidence %}<p class="confidence">Confidence: {{ confidence }}</p>
{% endif %}{% if celebrate %}<div class="balloons" role="img" aria-label="celebration">🎈🎈🎈</div>
{% endif %}</div>"#,
    ext = "html"
)]
struct HtmlTemplate {
    color: String,
    glyph: String,
    label: String,
    show_confidence: bool,
    confidence: String,
    celebrate: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            show_confidence: true,
            celebrate: true,
        }
    }

    pub fn with_confidence(mut self, show: bool) -> Self {
        self.show_confidence = show;
        self
    }

    pub fn with_celebration(mut self, celebrate: bool) -> Self {
        self.celebrate = celebrate;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &PredictionReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("Prediction Result:"));

        let label = format!("{} {}", report.glyph, report.label);
        let label = if self.use_colors {
            label.color(report.color.terminal_color()).bold().to_string()
        } else {
            label
        };
        output.push_str(&format!("{}\n", label));

        if self.show_confidence {
            output.push_str(&format!("Confidence: {:.1}%\n", report.confidence * 100.0));
        }

        if self.detailed {
            output.push_str(&format!("\nSource: {}\n", report.source_description()));
            output.push_str(&format!("Words: {}\n", report.token_count));
            output.push_str(&format!("Review: {}\n", self.colorize(&report.excerpt, Color::Cyan)));
            output.push_str(&format!("Normalized: {}\n", report.normalized_text));
            output.push_str(&format!("Model class: {} ({})\n", report.class_value, report.class_name));
            for p in &report.probabilities {
                output.push_str(&format!(
                    "  • {} {}: {:.1}%\n",
                    p.sentiment.glyph(),
                    p.sentiment.display_name(),
                    p.probability * 100.0
                ));
            }
        }

        if report.celebrate && self.celebrate {
            output.push_str(&format!("\n{}\n", BALLOONS));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &PredictionReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(show_confidence: bool, celebrate: bool) -> Self {
        Self {
            show_confidence,
            celebrate,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &PredictionReport) -> Result<String> {
        let template = HtmlTemplate {
            color: report.color.css_name().to_string(),
            glyph: report.glyph.clone(),
            label: report.label.clone(),
            show_confidence: self.show_confidence,
            confidence: format!("{:.1}%", report.confidence * 100.0),
            celebrate: report.celebrate && self.celebrate,
        };

        template
            .render()
            .map_err(|e| SentimentError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::from_config(&crate::config::Config::default().output, false)
    }

    pub fn from_config(config: &OutputConfig, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, detailed)
                .with_confidence(config.show_confidence)
                .with_celebration(config.celebrate_positive),
            json_formatter: JsonFormatter::new(true),
            html_formatter: HtmlFormatter::new(config.show_confidence, config.celebrate_positive),
        }
    }

    pub fn generate_report(&self, report: &PredictionReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ReviewSource;
    use crate::processing::sentiment::Sentiment;
    use chrono::Utc;

    fn report(sentiment: Sentiment) -> PredictionReport {
        PredictionReport {
            label: sentiment.display_name().to_string(),
            sentiment,
            glyph: sentiment.glyph().to_string(),
            color: sentiment.color(),
            celebrate: sentiment.celebrates(),
            class_value: sentiment.class_value(),
            class_name: "whatever".to_string(),
            confidence: 0.875,
            probabilities: Vec::new(),
            source: ReviewSource::Typed,
            token_count: 4,
            excerpt: "Great stay, loved it!".to_string(),
            normalized_text: "great stay loved it".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_console_output_without_colors() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&report(Sentiment::Positive)).unwrap();
        assert!(output.contains("✅ Positive Review"));
        assert!(output.contains("Confidence: 87.5%"));
        assert!(output.contains(BALLOONS));

        let output = formatter.format_report(&report(Sentiment::Neutral)).unwrap();
        assert!(output.contains("😐 Neutral Review"));
        assert!(!output.contains(BALLOONS));
    }

    #[test]
    fn test_console_celebration_can_be_disabled() {
        let formatter = ConsoleFormatter::new(false, false).with_celebration(false);
        let output = formatter.format_report(&report(Sentiment::Positive)).unwrap();
        assert!(!output.contains(BALLOONS));
    }

    #[test]
    fn test_detailed_console_output() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&report(Sentiment::Negative)).unwrap();
        assert!(output.contains("Source: typed review"));
        assert!(output.contains("Normalized: great stay loved it"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(false).format_report(&report(Sentiment::Positive)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["label"], "Positive Review");
        assert_eq!(value["color"], "green");
        assert_eq!(value["celebrate"], true);
        assert_eq!(value["source"]["kind"], "typed");
    }

    #[test]
    fn test_html_output() {
        let formatter = HtmlFormatter::new(true, true);
        let output = formatter.format_report(&report(Sentiment::Negative)).unwrap();
        assert!(output.contains("<span style='color: red; font-size: 24px;'>❌ Negative Review</span>"));
        assert!(output.contains("Confidence: 87.5%"));
        assert!(!output.contains("balloons"));

        let output = formatter.format_report(&report(Sentiment::Positive)).unwrap();
        assert!(output.contains("class=\"balloons\""));
    }

    #[test]
    fn test_generator_routes_by_format() {
        let generator = ReportGenerator::new();
        let json = generator.generate_report(&report(Sentiment::Neutral), &OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let html = generator.generate_report(&report(Sentiment::Neutral), &OutputFormat::Html).unwrap();
        assert!(html.contains("color: orange"));
    }
}
