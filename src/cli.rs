//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for AgentCamp.

use clap::{Args, Parser, Subcommand};

use crate::knowledge::SourceType;

/// AgentCamp - onboarding assistant for new hires
///
/// Ingests company conversations into tagged knowledge, routes trainee
/// questions to mentor personas, and reviews daily mission submissions.
#[derive(Parser, Debug)]
#[command(name = "agentcamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "AGENTCAMP_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Text given inline or read from a file
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TextInput {
    /// Read the text from a file
    #[arg(short, long)]
    pub file: Option<String>,

    /// Pass the text directly
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest raw text (transcripts, chat logs) into the knowledge base
    Ingest {
        /// Where the text came from: meeting_stt, slack_discord, client_stt
        #[arg(short, long, value_parser = parse_source)]
        source: SourceType,

        #[command(flatten)]
        input: TextInput,
    },

    /// Show the most recent knowledge items
    Knowledge {
        /// Number of items to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show which persona a question would be routed to
    Route {
        /// The question
        question: String,
    },

    /// Ask a question and get an answer from the routed persona
    Ask {
        /// Trainee user id
        #[arg(short, long, default_value = "minsu")]
        user: String,

        /// Answer with this provider instead of the configured one (mock, openai, claude)
        #[arg(short, long)]
        provider: Option<String>,

        /// The question
        question: String,
    },

    /// Show (or renew) the trainee's daily mission
    Task {
        /// Trainee user id
        #[arg(short, long, default_value = "minsu")]
        user: String,

        /// Assign a fresh mission even if one exists
        #[arg(long)]
        new: bool,
    },

    /// Submit work for the daily mission and get a review
    Submit {
        /// Trainee user id
        #[arg(short, long, default_value = "minsu")]
        user: String,

        #[command(flatten)]
        input: TextInput,
    },

    /// Show OJT progress across all trainees
    Dashboard,

    /// Organization settings
    Org {
        #[command(subcommand)]
        subcommand: OrgSubcommand,
    },

    /// Mentor personas
    Persona {
        #[command(subcommand)]
        subcommand: PersonaSubcommand,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn parse_source(s: &str) -> Result<SourceType, String> {
    s.parse()
}

/// Organization subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum OrgSubcommand {
    /// Display the organization settings
    Show,

    /// Update organization settings
    Set {
        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// Role new hires are onboarded into
        #[arg(long)]
        role: Option<String>,

        /// Comma separated tool list, e.g. "Slack,GitHub"
        #[arg(long)]
        tools: Option<String>,

        /// Comma separated acceptance keywords for mission reviews
        #[arg(long)]
        keywords: Option<String>,
    },
}

/// Persona subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PersonaSubcommand {
    /// List the mentor personas
    List,

    /// Show one persona in full
    Show {
        /// Persona name or slug, e.g. "JH Kim" or jh-kim
        persona: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration
    Validate,
}
