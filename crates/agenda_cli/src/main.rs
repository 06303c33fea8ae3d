//! Terminal front end for the contact book.
//!
//! # Responsibility
//! - Map subcommands onto contact book intents against a SQLite file.
//! - Keep output deterministic for scripting and smoke checks.

use agenda_core::{
    AgendaConfig, BookError, ContactBook, ContactForm, FormIntent,
    KvContactRepository, LetterFilter, SqliteKeyValueStore, SubmitOutcome,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

type CliBook = ContactBook<KvContactRepository<SqliteKeyValueStore>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "agenda: local contact manager", long_about = None)]
struct Cli {
    /// SQLite file holding the contacts (overrides AGENDA_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (overrides AGENDA_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new contact.
    Add(ContactArgs),
    /// Edit the contact currently stored under EMAIL.
    Edit(EditArgs),
    /// Delete the contact stored under EMAIL.
    Delete { email: String },
    /// List contacts sorted by name.
    List(ListArgs),
    /// Print core linkage probe.
    Ping,
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Email of the contact to edit.
    email: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "new-email")]
    new_email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive substring of the name.
    #[arg(long, default_value = "")]
    search: String,
    /// `all` or a single letter the name must start with.
    #[arg(long, default_value = "all")]
    letter: LetterFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AgendaConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }
    agenda_core::logging::init_logging_from_config(&config)
        .context("failed to initialize logging")?;

    match cli.command {
        Commands::Ping => {
            println!("agenda_core ping={}", agenda_core::ping());
            println!("agenda_core version={}", agenda_core::core_version());
            Ok(())
        }
        command => run(&config, command),
    }
}

fn run(config: &AgendaConfig, command: Commands) -> Result<()> {
    let store = SqliteKeyValueStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let mut book = ContactBook::load(KvContactRepository::new(store))
        .context("failed to load contacts")?;

    match command {
        Commands::Add(args) => {
            book.start_creating();
            let mut form = ContactForm::new();
            fill_form(&mut form, args.name, args.email, &args.phone)?;
            submit(&mut book, form)?;
        }
        Commands::Edit(args) => {
            let Some(target) = book.find_by_email(&args.email).cloned() else {
                bail!("no contact with email {}", args.email);
            };
            book.start_editing(target);
            let mut form = book.open_form();
            let name = args.name.unwrap_or_else(|| form.name().to_string());
            let email = args.new_email.unwrap_or_else(|| form.email().to_string());
            let phone = args.phone.unwrap_or_else(|| form.phone().to_string());
            fill_form(&mut form, name, email, &phone)?;
            submit(&mut book, form)?;
        }
        Commands::Delete { email } => {
            if book.delete_contact(&email)? {
                println!("deleted {email}");
            } else {
                println!("no contact with email {email}");
            }
        }
        Commands::List(args) => {
            book.set_search_term(args.search);
            book.set_letter_filter(args.letter);
            for row in book.list_rows() {
                println!("{}\t{}\t{}", row.name, row.email, row.phone);
            }
        }
        Commands::Ping => {}
    }

    Ok(())
}

fn fill_form(form: &mut ContactForm, name: String, email: String, phone: &str) -> Result<()> {
    form.set_name(name);
    form.set_email(email);
    if !form.set_phone(phone) {
        bail!("phone must contain digits only");
    }
    Ok(())
}

fn submit(book: &mut CliBook, mut form: ContactForm) -> Result<()> {
    let FormIntent::Submit(contact) = form.submit()? else {
        return Ok(());
    };
    let email = contact.email.clone();
    match book.submit_contact(contact) {
        Ok(SubmitOutcome::Added) => println!("added {email}"),
        Ok(SubmitOutcome::Updated { previous_email }) => {
            println!("updated {previous_email} -> {email}");
        }
        Err(BookError::Duplicate { .. }) => {
            bail!("{}", agenda_core::DUPLICATE_CONTACT_MESSAGE)
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
