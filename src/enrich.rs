//! Section enrichment through an external text service.
//!
//! The engine never produces summaries or classifications itself. An
//! [`Enricher`] is handed a section's heading and body and returns an
//! [`Enrichment`]; [`enrich_outline`] fans requests out over a bounded
//! thread pool and writes the results back into the outline.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Outline, Section};

/// Summary length requested from the service and enforced on the reply.
pub const DEFAULT_SUMMARY_WORDS: usize = 30;

/// Closed set of section classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionClass {
    /// Eligibility criteria, enrollment requirements, membership conditions
    #[serde(rename = "Plan Membership Rules")]
    PlanMembershipRules,
    /// Coverage details, benefit amounts, conditions, exclusions and limitations
    #[serde(rename = "Benefit Provisions")]
    BenefitProvisions,
    /// Claim processes, enrollment procedures, how to access benefits
    #[serde(rename = "Procedural Information")]
    ProceduralInformation,
    /// Change notifications, coordination of benefits, legal responsibilities
    #[serde(rename = "Contractual Obligations")]
    ContractualObligations,
    /// Key terms, qualifying persons, earnings or service, dependent definitions
    Definitions,
    /// Premiums, cost sharing, deductibles and co-pays
    #[serde(rename = "Financial Information")]
    FinancialInformation,
    /// Important dates, deadlines, waiting periods
    #[serde(rename = "Timeline Information")]
    TimelineInformation,
    /// Where to ask questions and get support
    #[serde(rename = "Contact Information")]
    ContactInformation,
    /// Anything that fits none of the above
    Other,
}

impl SectionClass {
    /// Every class, in prompt order.
    pub const ALL: [SectionClass; 9] = [
        SectionClass::PlanMembershipRules,
        SectionClass::BenefitProvisions,
        SectionClass::ProceduralInformation,
        SectionClass::ContractualObligations,
        SectionClass::Definitions,
        SectionClass::FinancialInformation,
        SectionClass::TimelineInformation,
        SectionClass::ContactInformation,
        SectionClass::Other,
    ];

    /// Display label, as used in prompts and stored on sections.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionClass::PlanMembershipRules => "Plan Membership Rules",
            SectionClass::BenefitProvisions => "Benefit Provisions",
            SectionClass::ProceduralInformation => "Procedural Information",
            SectionClass::ContractualObligations => "Contractual Obligations",
            SectionClass::Definitions => "Definitions",
            SectionClass::FinancialInformation => "Financial Information",
            SectionClass::TimelineInformation => "Timeline Information",
            SectionClass::ContactInformation => "Contact Information",
            SectionClass::Other => "Other",
        }
    }
}

impl fmt::Display for SectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a label ignoring case, spacing and punctuation, so
/// `"benefit_provisions"` and `"Benefit Provisions"` agree.
impl FromStr for SectionClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let label = squash(s);
        SectionClass::ALL
            .into_iter()
            .find(|c| squash(c.as_str()) == label)
            .ok_or_else(|| Error::Enrichment(format!("unknown classification: {}", s)))
    }
}

fn squash(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Raw reply shape; the classification is parsed leniently afterwards.
#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default, alias = "heading")]
    corrected_heading: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    classification: Option<String>,
    #[serde(default)]
    key_entities: Vec<String>,
}

/// Fields returned by the enrichment service for one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrichment {
    /// Heading with spelling fixed, if the service changed it
    pub corrected_heading: Option<String>,
    /// Short summary
    pub summary: Option<String>,
    /// Classification; unknown labels map to [`SectionClass::Other`]
    pub classification: SectionClass,
    /// Named entities mentioned in the section
    pub key_entities: Vec<String>,
}

impl Enrichment {
    /// Parse the service's JSON reply. Markdown code fences around the
    /// object are tolerated.
    pub fn from_json(reply: &str) -> Result<Self> {
        let raw: Reply = serde_json::from_str(strip_fences(reply))
            .map_err(|e| Error::Enrichment(format!("malformed reply: {}", e)))?;

        let classification = match raw.classification.as_deref() {
            Some(label) => label.parse().unwrap_or_else(|_| {
                log::debug!("unrecognized classification {:?}, using other", label);
                SectionClass::Other
            }),
            None => SectionClass::Other,
        };

        Ok(Self {
            corrected_heading: raw.corrected_heading.filter(|h| !h.trim().is_empty()),
            summary: raw.summary.filter(|s| !s.trim().is_empty()),
            classification,
            key_entities: raw.key_entities,
        })
    }

    /// Write the fields into `section`, leaving everything else alone.
    ///
    /// The summary is cut to `max_summary_words` words.
    pub fn apply(self, section: &mut Section, max_summary_words: usize) {
        if let Some(heading) = self.corrected_heading {
            if heading != section.heading {
                section.corrected_heading = Some(heading);
            }
        }
        section.summary = self.summary.map(|s| truncate_words(&s, max_summary_words));
        section.classification = Some(self.classification.to_string());
        section.key_entities = Some(self.key_entities);
    }
}

fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn truncate_words(text: &str, max: usize) -> String {
    if text.split_whitespace().count() <= max {
        return text.trim().to_string();
    }
    text.split_whitespace().take(max).collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// An external service that enriches one section at a time.
pub trait Enricher: Send + Sync {
    /// Enrich the section with this heading and body.
    fn enrich(&self, heading: &str, body: &str) -> Result<Enrichment>;
}

/// Adapts a text-in, text-out completion function into an [`Enricher`].
///
/// The function receives a prompt asking for a JSON object and must return
/// the service's raw reply.
pub struct JsonEnricher<F> {
    complete: F,
    max_body_chars: usize,
    summary_words: usize,
}

impl<F> JsonEnricher<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    /// Wrap a completion function.
    pub fn new(complete: F) -> Self {
        Self {
            complete,
            max_body_chars: 4000,
            summary_words: DEFAULT_SUMMARY_WORDS,
        }
    }

    /// Limit how much of the body is sent.
    pub fn with_max_body_chars(mut self, chars: usize) -> Self {
        self.max_body_chars = chars;
        self
    }

    /// Set the summary length asked for in the prompt.
    pub fn with_summary_words(mut self, words: usize) -> Self {
        self.summary_words = words;
        self
    }

    /// Build the prompt for one section.
    pub fn prompt(&self, heading: &str, body: &str) -> String {
        let labels: Vec<&str> = SectionClass::ALL.iter().map(|c| c.as_str()).collect();
        format!(
            "The following is a section of an employee benefits booklet.\n\
             Reply with a single JSON object with the keys \"corrected_heading\", \
             \"summary\", \"classification\" and \"key_entities\".\n\
             corrected_heading: the heading with spelling fixed.\n\
             summary: the text in {} words or less, keeping proper nouns.\n\
             classification: exactly one of {}; use Other when unsure.\n\
             key_entities: benefits, dates, amounts, roles and departments named in the text.\n\n\
             Heading: {}\n\nBody:\n{}",
            self.summary_words,
            labels.join(", "),
            heading,
            truncate_chars(body, self.max_body_chars)
        )
    }
}

impl<F> Enricher for JsonEnricher<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn enrich(&self, heading: &str, body: &str) -> Result<Enrichment> {
        let reply = (self.complete)(&self.prompt(heading, body))?;
        Enrichment::from_json(&reply)
    }
}

/// Options for [`enrich_outline`].
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Maximum concurrent requests
    pub parallelism: usize,

    /// Summaries longer than this are cut, in words
    pub max_summary_words: usize,

    /// Re-enrich sections that already carry enrichment fields
    pub overwrite: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            parallelism: 4,
            max_summary_words: DEFAULT_SUMMARY_WORDS,
            overwrite: false,
        }
    }
}

impl EnrichOptions {
    /// Create new enrich options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of concurrent requests (at least 1).
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// Set the summary length limit in words.
    pub fn with_max_summary_words(mut self, words: usize) -> Self {
        self.max_summary_words = words;
        self
    }

    /// Re-enrich sections that were enriched before.
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}

/// Outcome of an enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Sections that received enrichment
    pub enriched: usize,
    /// Sections whose request failed; their fields are left unset
    pub failed: usize,
    /// Sections skipped because they were already enriched
    pub skipped: usize,
}

/// Enrich every section of `outline`.
///
/// Requests run concurrently on a dedicated pool. A failed request is
/// logged and counted; it never aborts the pass.
pub fn enrich_outline(
    outline: &mut Outline,
    enricher: &dyn Enricher,
    options: &EnrichOptions,
) -> Result<EnrichReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.parallelism.max(1))
        .build()
        .map_err(|e| Error::Enrichment(format!("failed to build thread pool: {}", e)))?;

    let outcomes: Vec<Outcome> = pool.install(|| {
        outline
            .sections
            .par_iter_mut()
            .map(|section| {
                if section.is_enriched() && !options.overwrite {
                    return Outcome::Skipped;
                }
                match enricher.enrich(&section.heading, &section.body) {
                    Ok(enrichment) => {
                        enrichment.apply(section, options.max_summary_words);
                        Outcome::Enriched
                    }
                    Err(e) => {
                        log::warn!("Failed to enrich section {}: {}", section.sequence, e);
                        Outcome::Failed
                    }
                }
            })
            .collect()
    });

    let mut report = EnrichReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Enriched => report.enriched += 1,
            Outcome::Failed => report.failed += 1,
            Outcome::Skipped => report.skipped += 1,
        }
    }

    log::info!(
        "enriched {} sections ({} failed, {} skipped)",
        report.enriched,
        report.failed,
        report.skipped
    );
    Ok(report)
}

enum Outcome {
    Enriched,
    Failed,
    Skipped,
}
