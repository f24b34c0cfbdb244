//! Command-line front end for the birthday agenda.
//!
//! # Responsibility
//! - Parse commands and map each one to the surface that owns it.
//! - Enforce the login gate for agenda commands before touching records.
//! - Render core snapshots as pt-BR text.
//!
//! # Invariants
//! - Every command opens one SQLite connection and shares it between the
//!   account, session, theme and record stores.
//! - Output goes to the writer passed to [`run_cli`], never straight to stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use birthdaybook_core::db::open_db;
use birthdaybook_core::display::{
    avatar_initial, badge_label, day_detail_line, list_meta_line, month_title, today_alert,
    upcoming_line,
};
use birthdaybook_core::{
    build_calendar, day_detail, next_upcoming, todays_birthdays, AccountService, BirthdayRecord,
    Capability, CoreConfig, ListQuery, MonthFilter, RecordDraft, RecordId, RecordPatch,
    RecordStore, SessionGate, SqliteKvStore, Surface, Theme, ThemePreference, YearMonth,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

const WEEKDAY_HEADER: &str = " D  S  T  Q  Q  S  S";

#[derive(Debug, Parser)]
#[command(name = "birthdaybook")]
#[command(about = "Birthday agenda CLI")]
pub struct Cli {
    /// SQLite database file; defaults to `BIRTHDAYBOOK_DB_PATH` or the temp dir.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Overrides the local date used for countdowns (`YYYY-MM-DD`).
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Creates a local account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Prints the logged-in email.
    Whoami,
    /// Adds a birthday record.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// `YYYY-MM-DD`.
        #[arg(long)]
        birthdate: String,
    },
    /// Changes the given fields of a record.
    Edit {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        birthdate: Option<String>,
    },
    Remove {
        id: RecordId,
    },
    /// Lists records sorted by month/day.
    List {
        /// `all` or a month number `1..=12`.
        #[arg(long, default_value = "all")]
        month: MonthFilter,
        /// Case-insensitive name substring.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Shows the next upcoming birthday.
    Next,
    /// Shows today's birthdays.
    Today,
    /// Renders a month grid; defaults to the current month.
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Lists who has a birthday on one calendar day.
    Day {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
    },
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Light,
    Dark,
    Toggle,
}

impl Command {
    /// Surface owning the command and the capability it uses, or `None` for
    /// commands that only read the session marker.
    fn entry_point(&self) -> Option<(Surface, Capability)> {
        let entry = match self {
            Self::Register { .. } => (Surface::Register, Capability::RegisterAccount),
            Self::Login { .. } => (Surface::Login, Capability::Authenticate),
            Self::Whoami => return None,
            Self::Logout => (Surface::Agenda, Capability::Logout),
            Self::Add { .. } | Self::Edit { .. } | Self::Remove { .. } => {
                (Surface::Agenda, Capability::ManageRecords)
            }
            Self::List { .. } | Self::Next => (Surface::Agenda, Capability::QueryRecords),
            Self::Today => (Surface::Agenda, Capability::TodayAlert),
            Self::Calendar { .. } | Self::Day { .. } => (Surface::Agenda, Capability::Calendar),
            Self::Theme { .. } => (Surface::Agenda, Capability::Theme),
        };
        Some(entry)
    }
}

/// Runs a parsed command, writing its output to `out`.
///
/// # Errors
/// Returns an error when the database cannot be opened, the session gate
/// rejects an agenda command, or the core operation fails.
pub fn run_cli(cli: Cli, config: &CoreConfig, out: &mut impl Write) -> Result<()> {
    let db_path = cli.db.unwrap_or_else(|| config.db_path.clone());
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    if let Some((surface, capability)) = cli.command.entry_point() {
        surface.assert_capability(capability)?;
        if surface.requires_session() {
            SessionGate::new(SqliteKvStore::new(&conn)).require_user()?;
        }
        info!(
            "event=cli_command module=cli status=start surface={} capability={}",
            surface.as_str(),
            capability.as_str()
        );
    }

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let mut accounts = AccountService::new(SqliteKvStore::new(&conn));
            let account = accounts.register(&name, &email, &password)?;
            writeln!(out, "Conta criada para {}.", account.email)?;
        }
        Command::Login { email, password } => {
            let accounts = AccountService::new(SqliteKvStore::new(&conn));
            let mut gate = SessionGate::new(SqliteKvStore::new(&conn));
            let email = gate.login(&accounts, &email, &password)?;
            writeln!(out, "Logado como {email}.")?;
        }
        Command::Logout => {
            SessionGate::new(SqliteKvStore::new(&conn)).logout()?;
            writeln!(out, "Sessão encerrada.")?;
        }
        Command::Whoami => match SessionGate::new(SqliteKvStore::new(&conn)).current_user()? {
            Some(email) => writeln!(out, "{email}")?,
            None => writeln!(out, "Nenhum usuário logado.")?,
        },
        Command::Add {
            name,
            email,
            password,
            birthdate,
        } => {
            let mut store = RecordStore::open(SqliteKvStore::new(&conn))?;
            let record = store.create(&RecordDraft::new(name, email, password, birthdate))?;
            writeln!(out, "Adicionado: {} ({})", record.name, record.id)?;
        }
        Command::Edit {
            id,
            name,
            email,
            password,
            birthdate,
        } => {
            let patch = RecordPatch {
                name,
                email,
                password,
                birthdate,
            };
            let mut store = RecordStore::open(SqliteKvStore::new(&conn))?;
            let record = store.update(id, &patch)?;
            writeln!(out, "Atualizado: {} ({})", record.name, record.id)?;
        }
        Command::Remove { id } => {
            let mut store = RecordStore::open(SqliteKvStore::new(&conn))?;
            let removed = store.delete(id)?;
            writeln!(out, "Removido: {}", removed.name)?;
        }
        Command::List { month, search } => {
            let store = RecordStore::open(SqliteKvStore::new(&conn))?;
            let records = ListQuery { month, search }.apply(&store.list());
            if records.is_empty() {
                writeln!(out, "Nenhum aniversariante encontrado.")?;
            }
            for record in &records {
                writeln!(
                    out,
                    "{}  [{}] {} | {}",
                    record.id,
                    avatar_initial(&record.name),
                    record.name,
                    list_meta_line(record, today)
                )?;
            }
        }
        Command::Next => {
            let store = RecordStore::open(SqliteKvStore::new(&conn))?;
            match next_upcoming(&store.list(), today) {
                Some(upcoming) => writeln!(out, "{}", upcoming_line(&upcoming))?,
                None => writeln!(out, "Nenhum aniversariante cadastrado.")?,
            }
        }
        Command::Today => {
            let store = RecordStore::open(SqliteKvStore::new(&conn))?;
            match today_alert(&todays_birthdays(&store.list(), today)) {
                Some(alert) => writeln!(out, "{alert}")?,
                None => writeln!(out, "Nenhum aniversário hoje.")?,
            }
        }
        Command::Calendar { year, month } => {
            let current = YearMonth::of(today);
            let store = RecordStore::open(SqliteKvStore::new(&conn))?;
            render_calendar(
                out,
                year.unwrap_or(current.year()),
                month.unwrap_or(current.month()),
                &store.list(),
            )?;
        }
        Command::Day { year, month, day } => {
            let store = RecordStore::open(SqliteKvStore::new(&conn))?;
            let entries = day_detail(year, month, day, &store.list())?;
            writeln!(out, "{}", day_detail_line(year, month, day, &entries))?;
        }
        Command::Theme { action } => {
            let mut prefs = ThemePreference::new(SqliteKvStore::new(&conn));
            let theme = match action {
                ThemeAction::Show => prefs.load()?,
                ThemeAction::Toggle => prefs.toggle()?,
                ThemeAction::Light => {
                    prefs.save(Theme::Light)?;
                    Theme::Light
                }
                ThemeAction::Dark => {
                    prefs.save(Theme::Dark)?;
                    Theme::Dark
                }
            };
            writeln!(out, "Tema: {theme}")?;
        }
    }

    Ok(())
}

/// Prints the month grid with `*` on days that have birthdays, followed by
/// the first names celebrating on each of those days.
fn render_calendar(
    out: &mut impl Write,
    year: i32,
    month: u32,
    records: &[BirthdayRecord],
) -> Result<()> {
    let grid = build_calendar(year, month, records)?;
    writeln!(out, "{}", month_title(year, month))?;
    writeln!(out, "{WEEKDAY_HEADER}")?;
    for week in grid.weeks() {
        let row = week
            .iter()
            .map(|cell| match cell {
                Some(day) if day.has_birthdays() => format!("{:>2}*", day.day),
                Some(day) => format!("{:>2} ", day.day),
                None => "   ".to_string(),
            })
            .collect::<String>();
        writeln!(out, "{}", row.trim_end())?;
    }

    for cell in grid.days.iter().filter(|cell| cell.has_birthdays()) {
        let badges = cell
            .records
            .iter()
            .map(|record| badge_label(&record.name))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "{:>2}: {badges}", cell.day)?;
    }
    Ok(())
}
