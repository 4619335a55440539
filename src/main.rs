//! AgentCamp - onboarding assistant for new hires
//!
//! Entry point for the `agentcamp` binary. Commands load the JSON documents,
//! call into the core (tagging, routing, response generation, scoring) and
//! write the updated documents back.

mod cli;
mod config;
mod error;
mod knowledge;
mod logging;
mod persona;
mod provider;
mod responder;
mod review;
mod router;
mod session;
mod storage;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error, info};

use crate::cli::{Cli, Commands, ConfigSubcommand, OrgSubcommand, PersonaSubcommand, TextInput};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::knowledge::{SourceType, Tag};
use crate::persona::{Persona, PersonaRegistry};
use crate::provider::{ProviderContext, ProviderKind};
use crate::review::Review;
use crate::session::Dashboard;
use crate::storage::{split_list, DocumentStoreExt, JsonFileStore};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e.format_for_log());
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Config commands manage the file itself and run before logging is set up
    if let Commands::Config { subcommand } = &cli.command {
        return handle_config_command(subcommand.clone(), cli.config.as_deref());
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let store = JsonFileStore::new(config.data_dir());
    debug!(data_dir = %store.data_dir().display(), "Using data directory");
    let personas = PersonaRegistry::bundled()?;

    match cli.command {
        Commands::Ingest { source, input } => {
            let raw = read_input(&input, "ingest text")?;
            ingest(&store, source, &raw)
        }
        Commands::Knowledge { limit } => show_knowledge(&store, limit),
        Commands::Route { question } => {
            let question = require_text(question, "question")?;
            let persona = lookup(&personas, router::route(&question))?;
            println!("{} ({})", persona.name(), persona.role);
            Ok(())
        }
        Commands::Ask {
            user,
            provider,
            question,
        } => {
            let question = require_text(question, "question")?;
            let providers = match provider {
                Some(name) => {
                    let kind = ProviderKind::from_str(&name)
                        .ok_or(Error::ProviderUnknown { name })?;
                    let providers = ProviderContext::templated();
                    providers.switch(kind, &config)?;
                    providers
                }
                None => ProviderContext::from_config(&config)?,
            };
            ask(&store, &personas, &providers, &user, &question)
        }
        Commands::Task { user, new } => show_task(&store, &user, new),
        Commands::Submit { user, input } => {
            let submission = read_input(&input, "submission")?;
            submit(&store, &user, &submission)
        }
        Commands::Dashboard => show_dashboard(&store),
        Commands::Org { subcommand } => handle_org_command(&store, subcommand),
        Commands::Persona { subcommand } => handle_persona_command(&personas, subcommand),
        Commands::Config { .. } => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────
// Input
// ─────────────────────────────────────────────────────────────────

/// Text from `--text` or `--file`, rejected when blank.
fn read_input(input: &TextInput, what: &str) -> Result<String> {
    let raw = match (&input.text, &input.file) {
        (Some(text), _) => text.clone(),
        (None, Some(file)) => {
            let path = PathBuf::from(file);
            let bytes = fs::read(&path).map_err(|e| Error::IoRead { path, source: e })?;
            decode_lossy(&bytes)
        }
        (None, None) => String::new(),
    };
    require_text(raw, what)
}

/// Decode UTF-8, silently dropping invalid byte sequences.
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn require_text(text: String, what: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::input_empty(what));
    }
    Ok(text)
}

fn lookup(personas: &PersonaRegistry, id: persona::PersonaId) -> Result<&Persona> {
    personas.get(id).ok_or_else(|| Error::PersonaNotFound {
        name: id.name().to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────
// Knowledge
// ─────────────────────────────────────────────────────────────────

fn ingest(store: &JsonFileStore, source: SourceType, raw: &str) -> Result<()> {
    let items = knowledge::extract(source, raw);

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for item in &items {
        *counts.entry(item.tag.as_str()).or_default() += 1;
    }

    let added = items.len();
    let mut kb = store.knowledge()?;
    kb.append(items);
    store.set_knowledge(&kb)?;

    info!(source = %source, added, total = kb.items.len(), "Knowledge ingested");
    println!("Ingested {} items from {} (total {})", added, source, kb.items.len());
    for (tag, count) in counts {
        println!("  {:<9} {}", tag, count);
    }
    Ok(())
}

fn show_knowledge(store: &JsonFileStore, limit: usize) -> Result<()> {
    let kb = store.knowledge()?;
    if kb.items.is_empty() {
        println!("Knowledge base is empty. Add some with `agentcamp ingest`.");
        return Ok(());
    }

    for item in kb.recent(limit) {
        println!("[{}] {} | {}", tag_label(item.tag), item.source, item.text);
    }
    Ok(())
}

fn tag_label(tag: Tag) -> &'static str {
    match tag {
        Tag::Pitfall => "pitfall ",
        Tag::Glossary => "glossary",
        Tag::Rule => "rule    ",
        Tag::Process => "process ",
    }
}

// ─────────────────────────────────────────────────────────────────
// Trainee Flow
// ─────────────────────────────────────────────────────────────────

fn ask(
    store: &JsonFileStore,
    personas: &PersonaRegistry,
    providers: &ProviderContext,
    user: &str,
    question: &str,
) -> Result<()> {
    let org = store.org()?;
    let kb = store.knowledge()?;
    let mut sessions = store.sessions()?;

    sessions.ensure_user(user).record_question();

    let persona = lookup(personas, router::route(question))?;
    let snippet = kb.latest_snippet();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create runtime: {}", e)))?;
    let answer = runtime.block_on(responder::respond(persona, &org, snippet, question, providers));

    store.set_sessions(&sessions)?;

    println!("라우팅: {}", persona.name());
    println!();
    println!("{}", answer);
    Ok(())
}

fn show_task(store: &JsonFileStore, user: &str, renew: bool) -> Result<()> {
    let org = store.org()?;
    let mut sessions = store.sessions()?;
    let task = sessions.ensure_user(user).assign_task(&org, renew).clone();
    store.set_sessions(&sessions)?;

    println!("미션: {}", task.title);
    println!("- 상황: {}", task.context);
    println!("- 제출물: {}", task.deliverable);
    println!("완료 키워드: {}", task.acceptance_keywords.join(", "));
    Ok(())
}

fn submit(store: &JsonFileStore, user: &str, submission: &str) -> Result<()> {
    let org = store.org()?;
    let mut sessions = store.sessions()?;
    let session = sessions.ensure_user(user);

    let task = session.assign_task(&org, false).clone();
    let review = review::score(&task, submission);
    session.record_review(&review);
    store.set_sessions(&sessions)?;

    info!(user = %user, score = review.score, "Submission reviewed");
    print_review(&review);
    Ok(())
}

fn print_review(review: &Review) {
    println!("리뷰 점수: {}점", review.score);
    println!("강점");
    for s in &review.strengths {
        println!("- {}", s);
    }
    println!("개선점");
    for i in &review.improvements {
        println!("- {}", i);
    }
    println!("다음 스텝");
    println!("{}", review.next_step);
}

fn show_dashboard(store: &JsonFileStore) -> Result<()> {
    let dash = Dashboard::from_sessions(&store.sessions()?);

    println!("신입 수: {}", dash.user_count);
    println!("평균 적응도: {}", dash.avg_adapt);
    println!("평균 리스크: {}", dash.avg_risk);
    println!("총 완료 업무: {}", dash.total_tasks);
    for row in &dash.rows {
        println!(
            "{} | adapt={} risk={} tasks={} q={}",
            row.user_id, row.adapt_score, row.risk_score, row.tasks_done, row.questions
        );
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Admin Commands
// ─────────────────────────────────────────────────────────────────

fn handle_org_command(store: &JsonFileStore, subcommand: OrgSubcommand) -> Result<()> {
    match subcommand {
        OrgSubcommand::Show => {}
        OrgSubcommand::Set {
            company,
            role,
            tools,
            keywords,
        } => {
            let mut org = store.org()?;
            if let Some(company) = company {
                org.company = company.trim().to_string();
            }
            if let Some(role) = role {
                org.role = role.trim().to_string();
            }
            if let Some(tools) = tools {
                org.tools = split_list(&tools);
            }
            if let Some(keywords) = keywords {
                org.rubric.acceptance_keywords = Some(split_list(&keywords));
            }
            store.set_org(&org)?;
            info!(company = %org.company, "Organization settings saved");
        }
    }

    let org = store.org()?;
    let rendered = serde_json::to_string_pretty(&org).map_err(|e| Error::DocumentEncode {
        name: "org.json".to_string(),
        source: e,
    })?;
    println!("{}", rendered);
    Ok(())
}

fn handle_persona_command(personas: &PersonaRegistry, subcommand: PersonaSubcommand) -> Result<()> {
    match subcommand {
        PersonaSubcommand::List => {
            for persona in personas.iter() {
                println!("{:<10} {:<9} {}", persona.id.slug(), persona.name(), persona.role);
            }
        }
        PersonaSubcommand::Show { persona } => {
            let persona = personas.find(&persona)?;
            println!("{} | {}", persona.name(), persona.role);
            println!("스타일: {}", persona.style);
            println!("책임 영역:");
            for r in &persona.responsibilities {
                println!("- {}", r);
            }
            println!("의사결정 규칙:");
            for r in &persona.decision_rules {
                println!("- {}", r);
            }
        }
    }
    Ok(())
}

fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let mut cfg = AppConfig::load(config_path)?;
            cfg.redact_secrets();
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration written to {}", written.display());
        }
        ConfigSubcommand::Validate => {
            let cfg = AppConfig::load(config_path)?;
            println!("Configuration is valid (provider: {}).", cfg.provider_kind()?);
        }
    }

    Ok(())
}
