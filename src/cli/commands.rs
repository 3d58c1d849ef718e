use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use crate::config::EngineConfig;
use crate::engine::HistoryEngine;
use crate::models::{ConversationEntry, MessageRecord, MessageShape, SearchCriteria};
use crate::utils::{format_path_with_tilde, session_id_from_path, strip_ansi_codes, truncate_chars};

const SHORT_ID_CHARS: usize = 8;
const LIST_PROMPT_CHARS: usize = 80;

#[derive(Parser)]
#[command(name = "ai-history-search")]
#[command(version = "0.1.0")]
#[command(about = "Search through Claude Code conversation history", long_about = None)]
pub struct Cli {
    /// Claude data directory (defaults to $CLAUDE_CONFIG_DIR, then ~/.claude)
    #[arg(long, global = true, value_name = "DIR")]
    pub claude_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List conversations, newest first
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search conversations by topic and metadata
    Search {
        /// Text to find in the first prompt or summary
        topic: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Also scan the full content of every log for the topic
        #[arg(long, requires = "topic")]
        deep: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show the messages of one conversation
    Show {
        /// Session id or a unique prefix of one
        session: String,
        /// Maximum number of messages to print
        #[arg(short = 'n', long)]
        max_messages: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only conversations on or after this date (YYYY-MM-DD or ISO-8601)
    #[arg(long)]
    pub after: Option<String>,
    /// Only conversations on or before this date (YYYY-MM-DD or ISO-8601)
    #[arg(long)]
    pub before: Option<String>,
    /// Git branch substring
    #[arg(long)]
    pub branch: Option<String>,
    /// Project path substring (`~` is expanded)
    #[arg(long)]
    pub project: Option<String>,
    /// Maximum number of conversations to print
    #[arg(long)]
    pub limit: Option<usize>,
}

impl FilterArgs {
    pub fn into_criteria(self, topic: Option<String>) -> SearchCriteria {
        SearchCriteria {
            topic,
            after: self.after,
            before: self.before,
            branch: self.branch,
            project: self.project,
            limit: self.limit,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = match &cli.claude_dir {
        Some(dir) => EngineConfig::for_claude_dir(dir),
        None => EngineConfig::from_env()?,
    };
    let engine = HistoryEngine::new(config)?;

    match command {
        Commands::List { filters, json } => {
            let criteria = filters.into_criteria(None);
            let entries = engine.list_entries(Some(&criteria))?;
            print_entries(&entries, json)?;
        }
        Commands::Search { topic, filters, deep, json } => {
            let criteria = filters.into_criteria(topic);
            let entries = engine.search_entries(&criteria, deep)?;
            print_entries(&entries, json)?;
        }
        Commands::Show { session, max_messages, json } => {
            show_session(&engine, &session, max_messages, json)?;
        }
    }

    Ok(())
}

fn print_entries(entries: &[ConversationEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No conversations found");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry_line(entry));
    }
    println!();
    println!("{} conversation(s); * marks sessions missing from every index", entries.len());
    Ok(())
}

fn entry_line(entry: &ConversationEntry) -> String {
    let when = entry
        .recency()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "----------------".to_string());
    let marker = if entry.is_orphan { "*" } else { " " };
    let title = entry.summary.as_deref().unwrap_or(&entry.first_prompt);
    let title = strip_ansi_codes(title).replace(['\n', '\r', '\t'], " ");
    let branch =
        if entry.git_branch.is_empty() { String::new() } else { format!(" [{}]", entry.git_branch) };

    format!(
        "{} {}{} {}{}  {}",
        when,
        truncate_chars(&entry.session_id, SHORT_ID_CHARS),
        marker,
        format_path_with_tilde(&entry.project_path),
        branch,
        truncate_chars(title.trim(), LIST_PROMPT_CHARS)
    )
}

fn show_session(
    engine: &HistoryEngine,
    candidate: &str,
    max_messages: Option<usize>,
    json: bool,
) -> Result<()> {
    let path = engine.resolve_session(candidate)?;
    let session_id = session_id_from_path(&path)
        .with_context(|| format!("Unexpected log file name: {}", path.display()))?;
    let metadata = engine.lookup_metadata(&session_id);
    let max = max_messages.unwrap_or(engine.config().default_max_messages);
    let shape = if json { MessageShape::Structured } else { MessageShape::Display };
    let messages = engine.extract_messages(&path, max, shape)?;

    if json {
        let output = json!({
            "sessionId": session_id,
            "path": path,
            "metadata": metadata,
            "messages": messages,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Session: {}", session_id);
    if let Some(entry) = &metadata {
        println!("Project: {}", format_path_with_tilde(&entry.project_path));
        if !entry.git_branch.is_empty() {
            println!("Branch:  {}", entry.git_branch);
        }
        if let Some(summary) = &entry.summary {
            println!("Summary: {}", strip_ansi_codes(summary));
        }
    }
    println!("Log:     {}", path.display());

    for message in &messages {
        println!();
        println!("{}", message_header(message));
        println!("{}", message.content);
    }
    if messages.is_empty() {
        println!();
        println!("No messages");
    }
    Ok(())
}

fn message_header(message: &MessageRecord) -> String {
    match &message.timestamp {
        Some(ts) => format!("--- {} ({})", message.role.as_str(), ts),
        None => format!("--- {}", message.role.as_str()),
    }
}
