//! `prospects` - CLI for the prospect tracker
//!
//! This binary stands in for the list UI: it opens the store, renders
//! filtered views, and forwards user actions to the store's mutators.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Read;

use anyhow::{anyhow, Context};
use clap::Parser;
use uuid::Uuid;

use prospects::cli::{Cli, Command, ConfigCommand, ListCommand, RemindCommand};
use prospects::view::{actions_for, visible, FilterType, ProspectAction, SortMethod};
use prospects::{
    handle_scan, init_logging, schedule_reminder, Config, LocalScheduler, Prospect, ProspectStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    let data_path = config.data_path();
    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
        Command::List(list_cmd) => handle_list(&ProspectStore::open(data_path), &list_cmd)?,
        Command::Scan(scan_cmd) => {
            let text = match scan_cmd.text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let mut store = ProspectStore::open(data_path);
            match handle_scan(&mut store, Ok(text)) {
                Some(id) => println!("Added {id}"),
                None => println!("Nothing added: expected \"<name>\\n<email>\""),
            }
        }
        Command::Add(add_cmd) => {
            let prospect = Prospect::new(add_cmd.name, add_cmd.email);
            let id = prospect.id();
            ProspectStore::open(data_path).add(prospect);
            println!("Added {id}");
        }
        Command::Toggle(target) => {
            let mut store = ProspectStore::open(data_path);
            let prospect = find(&store, target.id)?;
            if let Some(is_contacted) = store.toggle(&prospect) {
                let state = if is_contacted { "contacted" } else { "uncontacted" };
                println!("{} is now {state}", prospect.name);
            }
        }
        Command::Delete(target) => {
            let mut store = ProspectStore::open(data_path);
            let prospect = find(&store, target.id)?;
            if store.delete(&prospect) {
                println!("Deleted {}", prospect.name);
            }
        }
        Command::Remind(remind_cmd) => {
            handle_remind(&config, &ProspectStore::open(data_path), &remind_cmd).await?;
        }
    }
    Ok(())
}

fn handle_list(store: &ProspectStore, cmd: &ListCommand) -> anyhow::Result<()> {
    let filter = FilterType::from(cmd.filter);
    let shown = visible(store.people(), filter, SortMethod::from(cmd.sort));

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    println!("{}", filter.title());
    println!("{}", "-".repeat(filter.title().len()));
    if shown.is_empty() {
        println!("(nobody yet)");
    }
    for prospect in shown {
        let badge = match (filter.shows_status_badge(), prospect.is_contacted()) {
            (false, _) => "",
            (true, true) => "[x] ",
            (true, false) => "[ ] ",
        };
        let actions: Vec<&str> = actions_for(prospect)
            .into_iter()
            .map(ProspectAction::label)
            .collect();
        println!("{badge}{}  <{}>", prospect.name, prospect.email_address);
        println!("    {}  ({})", prospect.id(), actions.join(", "));
    }
    Ok(())
}

async fn handle_remind(
    config: &Config,
    store: &ProspectStore,
    cmd: &RemindCommand,
) -> anyhow::Result<()> {
    let prospect = find(store, cmd.id)?;
    let delay = config.reminder_delay();
    let (scheduler, mut delivered) = LocalScheduler::new(config.reminders.allow_notifications);

    if !schedule_reminder(&scheduler, &prospect, delay).await {
        println!("Reminder not scheduled: notifications are not allowed");
        return Ok(());
    }

    // Timers live on this runtime, so the process stays up until delivery.
    println!("Reminder for {} in {}s", prospect.name, delay.as_secs());
    match delivered.recv().await {
        Some(reminder) => {
            println!("{}", reminder.title);
            println!("{}", reminder.subtitle);
        }
        None => println!("Reminder for {} was not delivered", prospect.name),
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data path:           {}", config.data_path().display());
                println!();
                println!("[Reminders]");
                println!("  Delay (secs):        {}", config.reminders.delay_secs);
                println!(
                    "  Allow notifications: {}",
                    config.reminders.allow_notifications
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn find(store: &ProspectStore, id: Uuid) -> anyhow::Result<Prospect> {
    store
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("no prospect with id {id}"))
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read scan payload from stdin")?;
    // Shells and pipes add one; the payload itself has exactly one separator.
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
