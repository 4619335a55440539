//! Knowledge item types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a batch of raw text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Speech-to-text transcript of an internal meeting
    MeetingStt,
    /// Slack / Discord chat export
    SlackDiscord,
    /// Speech-to-text transcript of a client meeting
    ClientStt,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::MeetingStt => "meeting_stt",
            SourceType::SlackDiscord => "slack_discord",
            SourceType::ClientStt => "client_stt",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "meeting_stt" | "meeting" => Ok(SourceType::MeetingStt),
            "slack_discord" | "slack" | "discord" => Ok(SourceType::SlackDiscord),
            "client_stt" | "client" => Ok(SourceType::ClientStt),
            _ => Err(format!(
                "Unknown source type '{}'. Valid: meeting_stt, slack_discord, client_stt",
                s
            )),
        }
    }
}

/// Category assigned to every knowledge item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Failures, bugs and mistakes to avoid
    Pitfall,
    /// Definitions and terminology
    Glossary,
    /// Obligations, prohibitions and principles
    Rule,
    /// Everything else
    Process,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Pitfall => "pitfall",
            Tag::Glossary => "glossary",
            Tag::Rule => "rule",
            Tag::Process => "process",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tagged snippet extracted from ingested text. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// `<source>-<millis>-<index>`
    pub id: String,

    pub source: SourceType,

    pub tag: Tag,

    /// The original line, trimmed
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_from_str() {
        assert_eq!("meeting_stt".parse::<SourceType>().unwrap(), SourceType::MeetingStt);
        assert_eq!("slack-discord".parse::<SourceType>().unwrap(), SourceType::SlackDiscord);
        assert_eq!("CLIENT_STT".parse::<SourceType>().unwrap(), SourceType::ClientStt);
        assert!("email".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_item_json_shape() {
        let item = KnowledgeItem {
            id: "client_stt-1700000000000-0".into(),
            source: SourceType::ClientStt,
            tag: Tag::Rule,
            text: "배포 전 리뷰는 해야 한다".into(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["source"], "client_stt");
        assert_eq!(value["tag"], "rule");
        assert_eq!(value["text"], "배포 전 리뷰는 해야 한다");
    }
}
