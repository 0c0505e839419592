use regex::Regex;

use crate::config::ConventionalCommitsConfig;
use crate::version::VersionBump;

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits format.
    ///
    /// Supports `type(scope)!: description`, `type(scope): description`,
    /// `type!: description` and `type: description`. Anything else is
    /// treated as a `chore` carrying the whole first line as description.
    pub fn parse(message: &str) -> Self {
        let subject = message.lines().next().unwrap_or_default();

        let captures = Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!)?:\s*(.*)$")
            .ok()
            .and_then(|re| re.captures(subject));

        match captures {
            Some(captures) => ParsedCommit {
                r#type: captures
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                scope: captures.get(2).map(|m| m.as_str().to_string()),
                description: captures
                    .get(4)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                is_breaking_change: captures.get(3).is_some(),
            },
            None => ParsedCommit {
                r#type: "chore".to_string(),
                scope: None,
                description: subject.to_string(),
                is_breaking_change: false,
            },
        }
    }
}

/// Determines the version bump implied by a set of commit messages.
///
/// Breaking changes (a `!` marker, a configured breaking change indicator or a
/// major keyword) win outright. Features or minor keywords give a minor bump.
/// Everything else, including no commits at all, is a patch.
pub fn determine_version_bump(
    commit_messages: &[String],
    config: &ConventionalCommitsConfig,
) -> VersionBump {
    let mut has_features = false;

    for message in commit_messages {
        let parsed = ParsedCommit::parse(message);

        let is_breaking = parsed.is_breaking_change
            || config
                .breaking_change_indicators
                .iter()
                .any(|indicator| message.contains(indicator.as_str()))
            || config
                .major_keywords
                .iter()
                .any(|keyword| contains_keyword(message, keyword));

        if is_breaking {
            return VersionBump::Major;
        }

        let known_type = config.types.iter().any(|t| *t == parsed.r#type);
        if known_type && matches!(parsed.r#type.as_str(), "feat" | "feature") {
            has_features = true;
        }

        if config
            .minor_keywords
            .iter()
            .any(|keyword| contains_keyword(message, keyword))
        {
            has_features = true;
        }
    }

    if has_features {
        VersionBump::Minor
    } else {
        VersionBump::Patch
    }
}

/// Case-insensitive whole-word match. Hyphens and underscores join words, so
/// `breaking` does not match `non-breaking` and `feature` does not match
/// `feature-flag`.
fn contains_keyword(message: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return false;
    }

    let pattern = format!(r"(?i)(?:^|[^\w-]){}(?:$|[^\w-])", regex::escape(keyword));
    Regex::new(&pattern)
        .map(|re| re.is_match(message))
        .unwrap_or(false)
}
