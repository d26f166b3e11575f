//! Output formatters: console, JSON, and HTML renderings of ranked results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{ComparisonReport, RankOutcome, RankedReport};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format(&self, report: &RankedReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct HtmlFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn verdict_color(combined: f32) -> Color {
        use crate::processing::scoring::{INTERVIEW_THRESHOLD, RECOMMEND_THRESHOLD};
        match combined {
            s if s >= RECOMMEND_THRESHOLD => Color::Green,
            s if s >= INTERVIEW_THRESHOLD => Color::Yellow,
            _ => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &RankedReport) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!(
            "📄 Resume Ranking ({} documents, model: {})\n",
            report.entries.len(),
            report.embedding_model
        ));
        out.push_str(&"=".repeat(50));
        out.push('\n');

        for (position, entry) in report.entries.iter().enumerate() {
            match entry {
                RankOutcome::Ranked(r) => {
                    let score_text = format!("{:.2}", r.score.combined);
                    let score = self
                        .colorize(&score_text, Self::verdict_color(r.score.combined));
                    out.push_str(&format!(
                        "{:>2}. {}  score {}  {}\n",
                        position + 1,
                        r.filename,
                        score,
                        r.verdict.headline()
                    ));
                    out.push_str(&format!(
                        "    👤 {}  📧 {}\n",
                        r.profile.name, r.profile.email
                    ));
                    out.push_str(&format!(
                        "    ✅ matched: {}  ❌ missing: {}\n",
                        r.skill_match.matched.len(),
                        r.skill_match.missing.len()
                    ));
                    if r.score.semantic_degraded {
                        out.push_str("    ⚠️ semantic scoring unavailable, lexical-only score\n");
                    }
                }
                RankOutcome::Failed { filename, error } => {
                    let line = format!("    {} failed: {}\n", filename, error);
                    out.push_str(&self.colorize(&line, Color::Red));
                }
            }
        }

        Ok(out)
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
    /// Emits the ordered entries array, the canonical machine-readable shape.
    fn format(&self, report: &RankedReport) -> Result<String> {
        let serialized = if self.pretty {
            serde_json::to_string_pretty(&report.entries)?
        } else {
            serde_json::to_string(&report.entries)?
        };
        Ok(serialized)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Resume Ranking Report</title>
</head>
<body style="font-family:Arial, sans-serif; max-width:900px; margin:0 auto; padding:20px; background:#fff;">
  <h1>📄 Resume Ranking Report</h1>
  <p><strong>Model:</strong> {{ embedding_model }} | <strong>Generated:</strong> {{ generated_at }}</p>
  {{ entries_html|safe }}
</body>
</html>"#,
    ext = "html"
)]
struct RankingPageTemplate {
    embedding_model: String,
    generated_at: String,
    entries_html: String,
}

impl OutputFormatter for HtmlFormatter {
    fn format(&self, report: &RankedReport) -> Result<String> {
        let mut entries_html = String::new();
        for entry in &report.entries {
            match entry {
                RankOutcome::Ranked(r) => {
                    // feedback blocks are pre-rendered and already escaped
                    entries_html.push_str(&r.feedback_html);
                    entries_html.push('\n');
                }
                RankOutcome::Failed { filename, error } => {
                    entries_html.push_str(&format!(
                        "<div style=\"border:1px solid #F44336; border-radius:10px; padding:15px;\">\
                         <h3 style=\"color:#F44336;\">❌ {}</h3><p>{}</p></div>\n",
                        escape_html(filename),
                        escape_html(error),
                    ));
                }
            }
        }

        let page = RankingPageTemplate {
            embedding_model: report.embedding_model.clone(),
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            entries_html,
        };
        page.render().map_err(|e| {
            crate::error::ResumeRankerError::OutputFormatting(format!(
                "failed to render HTML report: {}",
                e
            ))
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

/// Coordinates the individual formatters.
pub struct ReportGenerator {
    console: ConsoleFormatter,
    json: JsonFormatter,
    html: HtmlFormatter,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console: ConsoleFormatter::new(use_colors),
            json: JsonFormatter::new(pretty_json),
            html: HtmlFormatter,
        }
    }

    pub fn generate(&self, report: &RankedReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format(report),
            OutputFormat::Json => self.json.format(report),
            OutputFormat::Html => self.html.format(report),
        }
    }

    pub fn generate_comparison(
        &self,
        report: &ComparisonReport,
        format: &OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Json | OutputFormat::Html => {
                Ok(serde_json::to_string_pretty(report)?)
            }
            OutputFormat::Console => {
                let mut out = String::new();
                for candidate in &report.candidates {
                    out.push_str(&format!("👤 {} ({})\n", candidate.name, candidate.filename));
                    out.push_str(&format!("   📧 {}  📱 {}\n", candidate.email, candidate.phone));
                    out.push_str(&format!(
                        "   🛠 skills: {}\n",
                        if candidate.skills.is_empty() {
                            "none detected".to_string()
                        } else {
                            candidate.skills.join(", ")
                        }
                    ));
                    out.push_str(&format!("   {}\n\n", candidate.summary));
                }
                out.push_str(&format!(
                    "Semantic Similarity Score between resumes: {:.2}\n",
                    report.similarity
                ));
                Ok(out)
            }
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
