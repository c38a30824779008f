//! Courier - command-line access to the mailbox transcoding layer
//!
//! Lists mailbox views, opens messages, marks them read, and sends replies
//! through the Gmail API using a token from the external sign-in flow.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use mailbox::{
    ActionHandler, ClientConfig, Email, GmailClient, HttpTransport, MailboxView, MessageId, ReplyRequest,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "courier", version, about = "Read and answer Gmail from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of ~/.config/courier/courier.json
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List a mailbox view (inbox, unread, sent, drafts)
    List {
        #[arg(default_value = "inbox")]
        view: String,
        /// Maximum number of messages
        #[arg(short = 'n', long, default_value_t = 20)]
        max: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a message with its full body
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Mark a message as read
    MarkRead { id: String },
    /// Reply to a message
    Reply {
        id: String,
        /// Reply text
        #[arg(short, long)]
        body: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::load()?,
    };
    info!("Using mailbox API at {}", cfg.base_url);

    let transport = HttpTransport::new(&cfg, cfg.token_source()?);
    let client = GmailClient::new(Arc::new(transport));

    match cli.command {
        Commands::List { view, max, json } => {
            let view = MailboxView::parse(&view);
            let emails = mailbox::list_messages(&client, view, max)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&emails)?);
            } else {
                for email in &emails {
                    print_summary(email);
                }
                info!("{} messages in {}", emails.len(), view.as_str());
            }
        }
        Commands::Show { id, json } => {
            let email = open(&client, &id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&email)?);
            } else {
                print_full(&email);
            }
        }
        Commands::MarkRead { id } => {
            let actions = ActionHandler::new(Arc::new(client));
            actions.mark_read(&MessageId::new(id))?;
        }
        Commands::Reply { id, body } => {
            let original = open(&client, &id)?;
            let actions = ActionHandler::new(Arc::new(client));
            let sent = actions.send_reply(&ReplyRequest::to_email(&original, body))?;
            println!("Sent {} (thread {})", sent.id, sent.thread_id);
        }
    }

    Ok(())
}

fn open(client: &GmailClient, id: &str) -> Result<Email> {
    mailbox::get_message(client, &MessageId::new(id)).with_context(|| format!("Message {} not found", id))
}

fn print_summary(email: &Email) {
    let marker = if email.read { ' ' } else { '*' };
    println!(
        "{} {:<18} {:<24} {:<40} {}",
        marker,
        email.id.as_str(),
        truncate(&email.sender, 24),
        truncate(&email.subject, 40),
        email.received_time
    );
}

fn print_full(email: &Email) {
    println!("From:    {} <{}>", email.sender, email.sender_email);
    println!("Subject: {}", email.subject);
    println!("When:    {}", email.received_time);
    println!();
    println!("{}", email.body);
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
