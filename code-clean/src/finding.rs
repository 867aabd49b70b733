use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One rule violation as reported by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub resource: String,         // file path, possibly with a leading separator
    pub message: String,
    pub code: String,             // "language:RuleId", e.g. "go:S1192"
    pub start_line_number: usize, // 1-based, as originally reported
}

impl Finding {
    /// The resource with a single leading path separator removed.
    pub fn relative_path(&self) -> &str {
        self.resource
            .strip_prefix('/')
            .or_else(|| self.resource.strip_prefix('\\'))
            .unwrap_or(&self.resource)
    }

    /// The rule id half of the code ("S1192" for "go:S1192").
    pub fn rule_id(&self) -> &str {
        self.code
            .split_once(':')
            .map(|(_, id)| id)
            .unwrap_or(&self.code)
    }

    pub fn rule(&self) -> Option<Rule> {
        Rule::from_code(&self.code)
    }
}

/// Rules the patcher knows how to sidestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// go:S1192, a string literal is duplicated
    DuplicatedLiteral,
    /// go:S3776, cognitive complexity too high
    CognitiveComplexity,
    /// go:S1186, function has an empty body
    EmptyFunction,
    /// java:S112, generic exception thrown
    GenericException,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Rule::DuplicatedLiteral,
        Rule::CognitiveComplexity,
        Rule::EmptyFunction,
        Rule::GenericException,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Rule::DuplicatedLiteral => "go:S1192",
            Rule::CognitiveComplexity => "go:S3776",
            Rule::EmptyFunction => "go:S1186",
            Rule::GenericException => "java:S112",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rule::DuplicatedLiteral => "extract the duplicated literal into a trailing const",
            Rule::CognitiveComplexity => "comment out nested if blocks, or extract nested func literals",
            Rule::EmptyFunction => "insert a placeholder comment into the empty body",
            Rule::GenericException => "rename RuntimeException( and add a wrapper class",
        }
    }

    /// Exact match on the full analyzer code.
    pub fn from_code(code: &str) -> Option<Self> {
        Rule::ALL.into_iter().find(|rule| rule.code() == code)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Rule {
    type Err = String;

    /// Accepts the full code or the bare rule id, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let found = Rule::ALL.into_iter().find(|rule| {
            let code = rule.code().to_lowercase();
            code == wanted || code.split_once(':').map(|(_, id)| id) == Some(wanted.as_str())
        });
        if let Some(rule) = found {
            return Ok(rule);
        }

        let closest = Rule::ALL
            .into_iter()
            .map(|rule| (rule, strsim::jaro_winkler(&wanted, &rule.code().to_lowercase())))
            .max_by(|a, b| a.1.total_cmp(&b.1));
        match closest {
            Some((rule, score)) if score > 0.7 => {
                Err(format!("Unknown rule: {}. Did you mean '{}'?", s, rule.code()))
            }
            _ => Err(format!(
                "Unknown rule: {}. Known rules: {}",
                s,
                Rule::ALL.map(|r| r.code()).join(", ")
            )),
        }
    }
}

/// Parse a findings document: a JSON array of finding objects.
pub fn parse_findings(json: &str) -> Result<Vec<Finding>> {
    let findings: Vec<Finding> =
        serde_json::from_str(json).context("Failed to parse findings")?;
    Ok(findings)
}

pub fn load_findings(path: &Path) -> Result<Vec<Finding>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read findings file: {}", path.display()))?;
    parse_findings(&content).with_context(|| format!("Invalid findings file: {}", path.display()))
}
