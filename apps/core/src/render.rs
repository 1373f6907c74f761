//! Result Renderer - turns an [`AnalysisResult`] into something displayable.
//!
//! [`render`] derives a [`ResultView`] with no side effects. The view has two
//! presentations: [`ResultView::to_html`] for a web surface and `Display` for the
//! terminal. Service-provided strings are untrusted and are escaped (HTML) or
//! stripped of control characters (terminal) on the way out.

use crate::models::{AnalysisResult, BiasFinding};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{self, Write};

/// Three-level intensity bucket derived from a bias score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityTier {
    /// score <= 5
    Low,
    /// 5 < score <= 10
    Moderate,
    /// score > 10
    High,
}

impl IntensityTier {
    pub fn from_score(score: f64) -> Self {
        if score > 10.0 {
            IntensityTier::High
        } else if score > 5.0 {
            IntensityTier::Moderate
        } else {
            IntensityTier::Low
        }
    }

    /// Badge background color.
    pub fn color(&self) -> &'static str {
        match self {
            IntensityTier::Low => "#5E6623",
            IntensityTier::Moderate => "#CB7885",
            IntensityTier::High => "#893941",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntensityTier::Low => "low",
            IntensityTier::Moderate => "moderate",
            IntensityTier::High => "high",
        }
    }
}

/// One rendered bias category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasCard {
    pub title: String,
    pub score: f64,
    pub tier: IntensityTier,
    pub explanation: String,
    /// Unique keywords in first-occurrence order.
    pub keywords: Vec<String>,
    /// Match count as reported by the service, duplicates included.
    pub match_count: u64,
}

impl BiasCard {
    fn from_finding(finding: &BiasFinding) -> Self {
        Self {
            title: finding.bias_type.clone(),
            score: finding.score,
            tier: IntensityTier::from_score(finding.score),
            explanation: finding.explanation.clone(),
            keywords: unique_in_order(&finding.matches),
            match_count: finding.count,
        }
    }
}

/// The renderable document for one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultView {
    Neutral {
        word_count: u64,
    },
    Scored {
        overall_score: f64,
        word_count: u64,
        cards: Vec<BiasCard>,
    },
}

/// Derives the view for `result`. Neutral results ignore `biases` entirely.
pub fn render(result: &AnalysisResult) -> ResultView {
    if result.is_neutral {
        return ResultView::Neutral {
            word_count: result.word_count,
        };
    }
    ResultView::Scored {
        overall_score: result.overall_score,
        word_count: result.word_count,
        cards: result.biases.iter().map(BiasCard::from_finding).collect(),
    }
}

fn unique_in_order(matches: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    matches
        .iter()
        .filter(|m| seen.insert(m.as_str()))
        .cloned()
        .collect()
}

impl ResultView {
    /// HTML fragment for the results panel. All service text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            ResultView::Neutral { word_count } => {
                html.push_str("<div class=\"neutral-result\">");
                html.push_str("<div class=\"neutral-icon\">✅</div>");
                html.push_str("<h3>No Strong Bias Detected!</h3>");
                html.push_str("<p>The text appears relatively neutral or objective.</p>");
                let _ = write!(html, "<p>Word count: {}</p>", word_count);
                html.push_str("</div>");
            }
            ResultView::Scored {
                overall_score,
                word_count,
                cards,
            } => {
                html.push_str("<div class=\"score-display\">");
                let _ = write!(html, "<div class=\"score-number\">{}%</div>", overall_score);
                html.push_str("<div class=\"score-label\">Overall Bias Score</div>");
                let _ = write!(
                    html,
                    "<p>Word count: {} | Found {} type(s) of bias</p>",
                    word_count,
                    cards.len()
                );
                html.push_str("</div>");
                html.push_str("<div class=\"bias-list-container\"><h3>Detected Biases:</h3>");
                for card in cards {
                    card.write_html(&mut html);
                }
                html.push_str("</div>");
            }
        }
        html
    }
}

impl BiasCard {
    fn write_html(&self, html: &mut String) {
        html.push_str("<div class=\"bias-item\"><div class=\"bias-header\">");
        let _ = write!(
            html,
            "<span class=\"bias-name\">{}</span>",
            escape_html(&self.title)
        );
        let _ = write!(
            html,
            "<span class=\"bias-score\" style=\"background: {};\">{}% intensity</span>",
            self.tier.color(),
            self.score
        );
        html.push_str("</div>");
        let _ = write!(
            html,
            "<p class=\"bias-explanation\">{}</p>",
            escape_html(&self.explanation)
        );
        let _ = write!(
            html,
            "<div class=\"bias-matches\"><strong>Found ({}):</strong>",
            self.match_count
        );
        for keyword in &self.keywords {
            let _ = write!(
                html,
                "<span class=\"keyword-tag\">{}</span>",
                escape_html(keyword)
            );
        }
        html.push_str("</div></div>");
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultView::Neutral { word_count } => {
                writeln!(f, "✅ No Strong Bias Detected!")?;
                writeln!(f, "The text appears relatively neutral or objective.")?;
                write!(f, "Word count: {}", word_count)
            }
            ResultView::Scored {
                overall_score,
                word_count,
                cards,
            } => {
                writeln!(f, "Overall Bias Score: {}%", overall_score)?;
                write!(
                    f,
                    "Word count: {} | Found {} type(s) of bias",
                    word_count,
                    cards.len()
                )?;
                for card in cards {
                    writeln!(f)?;
                    writeln!(f)?;
                    write!(f, "{}", card)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for BiasCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}] {} - {}% intensity",
            self.tier.label(),
            strip_control(&self.title),
            self.score
        )?;
        writeln!(f, "  {}", strip_control(&self.explanation))?;
        let keywords: Vec<String> = self.keywords.iter().map(|k| strip_control(k)).collect();
        write!(f, "  Found ({}): {}", self.match_count, keywords.join(", "))
    }
}

/// Escapes text for insertion into HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Drops control characters so service text cannot drive the terminal.
pub fn strip_control(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}
