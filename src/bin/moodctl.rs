use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use moodtrack_api::client::api::build_time_api_url;
use moodtrack_api::client::dashboard::{mood_face, trend_points, trend_window, DashboardStats};
use moodtrack_api::client::{ApiClient, ClientError, Session};
use moodtrack_api::dto::{CreateMoodRequest, LoginRequest, RegisterRequest, UpdateMoodRequest};
use moodtrack_api::models::mood::{calendar_date, DateRange, MoodEntry};

#[derive(Parser, Debug)]
#[command(name = "moodctl", version, about = "Track your mood from the terminal")]
struct Cli {
    /// API base URL. Defaults to the URL this binary was built with.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file holding the signed-in user's token.
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Average mood, entry count, streak and the 7-day trend
    Dashboard,
    /// Log how you feel (1 = very sad .. 5 = great)
    Log {
        #[arg(value_parser = clap::value_parser!(i32).range(1..=5))]
        mood: i32,
        /// Journal text
        #[arg(long)]
        note: Option<String>,
        /// Day the entry is for (YYYY-MM-DD), today by default
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List journal entries, newest first
    Journal {
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Show a single entry
    Show { id: String },
    /// Change the journal text and/or mood of an entry
    Edit {
        id: String,
        /// New journal text; an empty string clears it
        #[arg(long)]
        note: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
        mood: Option<i32>,
    },
    /// Delete an entry
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    calendar_date::parse(raw).ok_or_else(|| format!("`{}` is not a date (YYYY-MM-DD)", raw))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(cli.api_url.as_deref().unwrap_or(build_time_api_url()));
    let session_path = cli.session.unwrap_or_else(Session::default_path);

    let mut session = match Session::init(session_path).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &api, &mut session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, api: &ApiClient, session: &mut Session) -> Result<(), ClientError> {
    match command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let auth = api
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                })
                .await?;
            println!("Welcome, {}!", auth.user.username);
            session.sign_in(auth).await
        }
        Command::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let auth = api.login(&LoginRequest { email, password }).await?;
            println!("Signed in as {}", auth.user.username);
            session.sign_in(auth).await
        }
        Command::Logout => {
            session.teardown().await?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            let user = api.me(session.require_token()?).await?;
            println!("{} <{}>", user.username, user.email);
            println!("member since {}", user.created_at.format("%B %-d, %Y"));
            Ok(())
        }
        Command::Dashboard => show_dashboard(api, session).await,
        Command::Log { mood, note, date } => {
            let token = session.require_token()?;
            let entry = api
                .create_mood(
                    token,
                    &CreateMoodRequest {
                        mood: Some(mood),
                        journal_entry: note,
                        date: Some(date.unwrap_or_else(|| Local::now().date_naive())),
                    },
                )
                .await?;
            let (emoji, label) = mood_face(entry.mood).unwrap_or(("", ""));
            println!("Logged {} {} for {} ({})", emoji, label, entry.date, entry.id);
            Ok(())
        }
        Command::Journal { from, to } => {
            let token = session.require_token()?;
            let range = DateRange { start: from, end: to };
            let entries = api.list_moods(token, range).await?;
            if entries.is_empty() {
                println!("No journal entries yet. Log your first mood with `moodctl log`.");
            }
            for entry in &entries {
                print_entry(entry);
            }
            Ok(())
        }
        Command::Show { id } => {
            let entry = api.get_mood(session.require_token()?, &id).await?;
            print_entry(&entry);
            Ok(())
        }
        Command::Edit { id, note, mood } => {
            let token = session.require_token()?;
            let entry = api
                .update_mood(
                    token,
                    &id,
                    &UpdateMoodRequest {
                        mood,
                        journal_entry: note,
                    },
                )
                .await
                .map_err(|e| report("Failed to update entry", e))?;
            print_entry(&entry);
            Ok(())
        }
        Command::Delete { id, yes } => {
            let token = session.require_token()?;
            if !yes && !confirm("Are you sure you want to delete this entry?")? {
                println!("Kept entry {}", id);
                return Ok(());
            }
            let deleted = api
                .delete_mood(token, &id)
                .await
                .map_err(|e| report("Failed to delete entry", e))?;
            println!("{} ({})", deleted.message, deleted.id);
            Ok(())
        }
    }
}

async fn show_dashboard(api: &ApiClient, session: &Session) -> Result<(), ClientError> {
    let token = session.require_token()?;
    let today = Local::now().date_naive();
    let entries = api.list_moods(token, trend_window(today)).await?;
    let stats = DashboardStats::from_entries(&entries, today);

    if let Some(user) = session.user() {
        println!("Dashboard for {}", user.username);
    }
    match stats.average_mood {
        Some(avg) => println!("Average mood:   {} {:.1}", stats.average_face(), avg),
        None => println!("Average mood:   {} -", stats.average_face()),
    }
    println!("Total entries:  {}", stats.total_entries);
    println!("Current streak: {} days 🔥", stats.current_streak);
    println!();
    println!("7-Day Mood Trend");

    let points = trend_points(&entries);
    if points.is_empty() {
        println!("  No mood entries yet. Start tracking your mood!");
    }
    for point in points {
        let bar = "█".repeat(usize::try_from(point.mood).unwrap_or(0) * 4);
        let emoji = mood_face(point.mood).map_or("", |(e, _)| e);
        println!("  {:<7} {:<20} {} {}", point.label, bar, point.mood, emoji);
    }
    Ok(())
}

fn print_entry(entry: &MoodEntry) {
    let (emoji, label) = mood_face(entry.mood).unwrap_or(("?", "Unknown"));
    println!("{}  {} {}", entry.date.format("%A, %B %-d, %Y"), emoji, label);
    if !entry.journal_entry.is_empty() {
        for line in entry.journal_entry.lines() {
            println!("    {}", line);
        }
    }
    println!("    id: {}", entry.id);
    println!();
}

fn report(context: &str, err: ClientError) -> ClientError {
    tracing::debug!(error = %err, "{}", context);
    match err {
        ClientError::Api { status, message } => ClientError::Api {
            status,
            message: format!("{}: {}", context, message),
        },
        other => other,
    }
}

fn read_line(prompt: &str) -> Result<String, ClientError> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn password_or_prompt(password: Option<String>) -> Result<String, ClientError> {
    match password {
        Some(p) => Ok(p),
        None => read_line("Password: "),
    }
}

fn confirm(question: &str) -> Result<bool, ClientError> {
    let answer = read_line(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
