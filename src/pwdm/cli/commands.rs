//! # CLI Layer
//!
//! The CLI layer is the only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Handles argument parsing
//! - Formats output for human consumption
//! - Installs the log subscriber
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API, configuration and clipboard
//! - `handle_*()`: Per-command handlers that call the API and print results
//!
//! Handlers are generic over the store so they can be driven with an
//! in-memory database and a scripted prompt.

use super::menu;
use super::prompt::{Prompt, TermPrompt};
use super::render::{
    print_messages, render_added, render_candidate, render_closing_frame, render_config,
    render_found, render_view,
};
use super::setup::{Cli, Commands};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use pwdm::api::{CmdMessage, ConfigAction, PwdmApi};
use pwdm::clipboard::{ClipboardSink, SystemClipboard};
use pwdm::config::PwdmConfig;
use pwdm::error::{PwdmError, Result};
use pwdm::generator;
use pwdm::init::initialize;
use pwdm::model::normalize_account;
use pwdm::store::fs::FileStore;
use pwdm::store::RecordStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "PWDM_LOG";

pub(super) struct AppContext<S: RecordStore = FileStore> {
    pub(super) api: PwdmApi<S>,
    pub(super) config: PwdmConfig,
    pub(super) clipboard: Box<dyn ClipboardSink>,
}

/// Inputs of the add flow.
#[derive(Debug, Default)]
pub(super) struct AddOptions {
    pub(super) account: Option<String>,
    pub(super) length: Option<String>,
    pub(super) password: Option<String>,
    pub(super) yes: bool,
    pub(super) force: bool,
    /// Prompt for the length instead of falling back to the configured one.
    pub(super) ask_length: bool,
}

impl AddOptions {
    pub(super) fn interactive() -> Self {
        Self {
            ask_length: true,
            ..Self::default()
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.command.is_some() && cli.quick.any() {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "the -a, -g, -d and -v flags cannot be combined with a subcommand",
            )
            .exit();
    }

    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;
    let mut prompt = TermPrompt::new();

    match cli.command {
        Some(Commands::Add {
            account,
            length,
            password,
            yes,
            force,
        }) => handle_add(
            &mut ctx,
            &mut prompt,
            AddOptions {
                account,
                length,
                password,
                yes,
                force,
                ask_length: false,
            },
        ),
        Some(Commands::Get { account, no_clip }) => {
            handle_get(&mut ctx, &mut prompt, Some(account), no_clip)
        }
        Some(Commands::Delete { account, yes }) => {
            handle_delete(&mut ctx, &mut prompt, Some(account), yes)
        }
        Some(Commands::View) => handle_view(&ctx),
        Some(Commands::Generate { length, clip }) => handle_generate(&ctx, length, clip),
        Some(Commands::Doctor { fix }) => handle_doctor(&mut ctx, fix),
        Some(Commands::Init) => handle_init(&mut ctx),
        Some(Commands::Path) => handle_path(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None if cli.quick.add => handle_add(&mut ctx, &mut prompt, AddOptions::interactive()),
        None if cli.quick.get => handle_get(&mut ctx, &mut prompt, None, false),
        None if cli.quick.delete => handle_delete(&mut ctx, &mut prompt, None, false),
        None if cli.quick.view => handle_view(&ctx),
        None => menu::run(&mut ctx, &mut prompt),
    }
}

/// Logs go to stderr. `PWDM_LOG` takes a full filter directive and wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.db.as_deref())?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        clipboard: Box::new(SystemClipboard),
    })
}

pub(super) fn handle_add<S: RecordStore>(
    ctx: &mut AppContext<S>,
    prompt: &mut dyn Prompt,
    opts: AddOptions,
) -> Result<()> {
    let account = match opts.account {
        Some(account) => account,
        None => prompt.ask("Account: ")?,
    };

    // Refuse before the user spends time choosing a password
    if !opts.force && ctx.api.account_exists(&account)? {
        return Err(PwdmError::DuplicateAccount(normalize_account(&account)));
    }

    let password = match opts.password {
        Some(password) => {
            generator::validate_password(&password)?;
            password
        }
        None => {
            let length = resolve_length(
                prompt,
                opts.length.as_deref(),
                opts.ask_length,
                ctx.config.length,
            )?;
            match choose_password(&ctx.api, prompt, length, opts.yes)? {
                Some(password) => password,
                None => {
                    print_messages(&[CmdMessage::warning("Invalid answer. Nothing stored.")]);
                    return Ok(());
                }
            }
        }
    };

    let result = ctx.api.add_record(&account, &password, opts.force)?;
    for record in &result.affected_records {
        print!("{}", render_added(record));
    }
    print_messages(&result.messages);
    print!("{}", render_closing_frame());
    Ok(())
}

fn resolve_length(
    prompt: &mut dyn Prompt,
    given: Option<&str>,
    ask: bool,
    default: usize,
) -> Result<usize> {
    match given {
        Some(text) => generator::parse_length(text),
        None if ask => {
            let answer = prompt.ask(&format!("Length of the password [{}]: ", default))?;
            if answer.trim().is_empty() {
                Ok(default)
            } else {
                generator::parse_length(&answer)
            }
        }
        None => Ok(default),
    }
}

/// Generates candidates until one is accepted. `None` means the user gave an
/// answer other than y or n.
fn choose_password<S: RecordStore>(
    api: &PwdmApi<S>,
    prompt: &mut dyn Prompt,
    length: usize,
    yes: bool,
) -> Result<Option<String>> {
    loop {
        let candidate = api.generate(length)?.generated.unwrap_or_default();
        println!("{}", render_candidate(&candidate));
        if yes {
            return Ok(Some(candidate));
        }

        let answer = prompt.ask("Password satisfied (y/n)?: ")?;
        match answer.trim().to_lowercase().as_str() {
            "y" => return Ok(Some(candidate)),
            "n" => continue,
            _ => return Ok(None),
        }
    }
}

pub(super) fn handle_get<S: RecordStore>(
    ctx: &mut AppContext<S>,
    prompt: &mut dyn Prompt,
    account: Option<String>,
    no_clip: bool,
) -> Result<()> {
    let account = match account {
        Some(account) => account,
        None => prompt.ask("Account to get its password: ")?,
    };

    let result = ctx.api.get_record(&account)?;
    let use_clipboard = ctx.config.clipboard && !no_clip;

    for record in &result.affected_records {
        let copied = if use_clipboard {
            match ctx.clipboard.copy(&record.password) {
                Ok(()) => true,
                Err(e) => {
                    print_messages(&[CmdMessage::warning(format!("Warning: {}", e))]);
                    false
                }
            }
        } else {
            false
        };
        print!("{}", render_found(record, copied));
    }
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn handle_delete<S: RecordStore>(
    ctx: &mut AppContext<S>,
    prompt: &mut dyn Prompt,
    account: Option<String>,
    yes: bool,
) -> Result<()> {
    let account = match account {
        Some(account) => account,
        None => prompt.ask("Account to delete: ")?,
    };

    if !yes {
        // Look it up first so a missing account fails before the question
        let found = ctx.api.get_record(&account)?;
        let name = found
            .affected_records
            .first()
            .map(|r| r.account.clone())
            .unwrap_or_else(|| account.clone());
        let answer = prompt.ask(&format!("Delete `{}` (y/n)?: ", name))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            print_messages(&[CmdMessage::info("Nothing deleted.")]);
            return Ok(());
        }
    }

    let result = ctx.api.delete_record(&account)?;
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn handle_view<S: RecordStore>(ctx: &AppContext<S>) -> Result<()> {
    let result = ctx.api.view_records()?;
    print!("{}", render_view(&result.listed_records));
    print_messages(&result.messages);
    Ok(())
}

fn handle_generate<S: RecordStore>(
    ctx: &AppContext<S>,
    length: Option<String>,
    clip: bool,
) -> Result<()> {
    let length = match length {
        Some(text) => generator::parse_length(&text)?,
        None => ctx.config.length,
    };

    let result = ctx.api.generate(length)?;
    if let Some(password) = &result.generated {
        println!("{}", password);
        if clip {
            if let Err(e) = ctx.clipboard.copy(password) {
                eprintln!("Warning: {}", e);
            }
        }
    }
    Ok(())
}

fn handle_doctor<S: RecordStore>(ctx: &mut AppContext<S>, fix: bool) -> Result<()> {
    let result = ctx.api.doctor(fix)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init<S: RecordStore>(ctx: &mut AppContext<S>) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_path<S: RecordStore>(ctx: &AppContext<S>) -> Result<()> {
    let result = ctx.api.database_path()?;
    for path in &result.paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_config<S: RecordStore>(
    ctx: &AppContext<S>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(&config.list_all()));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
