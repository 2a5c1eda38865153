//! `booking` command-line front end.
//!
//! Drives the page controllers from a terminal: confirmations are read from
//! stdin, alerts and listings are printed to stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use event_booking_client::models::NewEvent;
use event_booking_client::pages::{AdminPage, HomePage, LoadingLine, RegistrationForm, TicketsPage};
use event_booking_client::views::{AgendaCalendar, CalendarWidget};
use event_booking_client::{ApiClient, Config, FileStorage, PageHost};

#[derive(Parser, Debug)]
#[command(name = "booking", version, about = "Browse, book and manage events")]
struct Cli {
    /// API base URL (overrides BOOKING_API_BASE)
    #[arg(long, global = true)]
    api: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events with their remaining seats
    Events {
        /// Case-insensitive filter on title, date or location
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show events as a day-by-day agenda
    Calendar,
    /// Book a seat
    Book {
        event_id: i64,
        /// Book through the calendar (asks for confirmation)
        #[arg(long)]
        calendar: bool,
    },
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        password: String,
        /// Password confirmation; defaults to the password
        #[arg(long)]
        confirm: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
    },
    Logout,
    /// Show who the stored token says you are
    Whoami,
    /// List your bookings
    Tickets,
    /// Cancel one of your bookings
    CancelTicket { booking_id: i64 },
    /// Save a booking's QR code image
    Qr { booking_id: i64, output: PathBuf },
    /// Admin tables and actions
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    Events,
    Bookings,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        capacity: Option<i64>,
    },
    Delete { event_id: i64 },
    Cancel { booking_id: i64 },
}

/// Terminal stand-in for the browser's dialogs.
struct TerminalHost {
    assume_yes: bool,
}

impl PageHost for TerminalHost {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            println!("{} yes", prompt);
            return true;
        }
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn alert(&mut self, message: &str) {
        println!("{}", message);
    }

    fn redirect(&mut self, page: &str) {
        println!("Redirecting to {}", page);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env();
    if let Some(api) = cli.api.clone() {
        config = config.with_api_base(api);
    }

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!("API base: {}", config.api_base);
    tracing::debug!("Storage path: {:?}", config.storage_path);

    let store = Arc::new(FileStorage::open(&config.storage_path));
    let api = ApiClient::new(config.api_base.clone(), store);
    let mut host = TerminalHost {
        assume_yes: cli.yes,
    };

    match cli.command {
        Command::Events { query } => {
            let mut page = HomePage::open(api, AgendaCalendar::new(), config.search_debounce).await;
            if let Some(query) = query {
                page.search_input(&query);
                page.settle_search().await;
            }
            print_home(&page);
        }
        Command::Calendar => {
            let page = HomePage::open(api, AgendaCalendar::new(), config.search_debounce).await;
            print_status(&page);
            print!("{}", page.calendar());
        }
        Command::Book { event_id, calendar } => {
            let mut page = HomePage::open(api, AgendaCalendar::new(), config.search_debounce).await;
            if calendar {
                page.calendar_click(&mut host, event_id).await;
            } else {
                page.book(&mut host, event_id).await;
            }
            print_home(&page);
        }
        Command::Login { username, password } => {
            let mut page = HomePage::new(api, AgendaCalendar::new(), config.search_debounce);
            page.login(&username, &password).await;
            match page.login_message() {
                Some(message) => println!("{}", message),
                None => print_header(&page),
            }
        }
        Command::Register {
            username,
            password,
            confirm,
            mobile,
        } => {
            let mut page = HomePage::new(api, AgendaCalendar::new(), config.search_debounce);
            let form = RegistrationForm {
                username,
                password_confirm: confirm.unwrap_or_else(|| password.clone()),
                password,
                mobile: mobile.unwrap_or_default(),
            };
            page.register(form).await;
            match page.register_message() {
                Some(message) => println!("{}", message),
                None => print_header(&page),
            }
        }
        Command::Logout => {
            let mut page = HomePage::new(api, AgendaCalendar::new(), config.search_debounce);
            page.logout().await;
            println!("Logged out");
        }
        Command::Whoami => {
            let session = api.session();
            match session.claims() {
                Some(claims) => {
                    println!("{}", session.display_name());
                    println!("admin: {}", session.is_admin());
                    if let Some(expires) = claims.expires_at {
                        println!("token expires: {}", expires.to_rfc3339());
                    }
                }
                None if session.has_token() => println!("Stored token could not be read"),
                None => println!("Not logged in"),
            }
        }
        Command::Tickets => {
            let page = TicketsPage::open(api, config.login_page.clone(), &mut host).await;
            print_tickets(&page);
        }
        Command::CancelTicket { booking_id } => {
            let mut page = TicketsPage::open(api, config.login_page.clone(), &mut host).await;
            if !page.redirected() {
                page.cancel(&mut host, booking_id).await;
            }
            print_tickets(&page);
        }
        Command::Qr { booking_id, output } => match api.download_qr_code(booking_id).await {
            Ok(bytes) => {
                tokio::fs::write(&output, &bytes).await?;
                println!("Saved QR code to {}", output.display());
            }
            Err(err) => host.alert(&format!("QR download failed: {}", err)),
        },
        Command::Admin(command) => run_admin(api, &mut host, command).await,
    }

    Ok(())
}

async fn run_admin(api: ApiClient, host: &mut TerminalHost, command: AdminCommand) {
    let mut page = AdminPage::open(api).await;

    match command {
        AdminCommand::Events | AdminCommand::Bookings => {}
        AdminCommand::Create {
            title,
            description,
            date,
            capacity,
        } => {
            let form = NewEvent {
                title,
                description,
                date,
                capacity,
            };
            page.create_event(host, form).await;
            if let Some(message) = page.create_message() {
                println!("{}", message.text);
            }
        }
        AdminCommand::Delete { event_id } => {
            page.delete_event(host, event_id).await;
        }
        AdminCommand::Cancel { booking_id } => {
            page.cancel_booking(host, booking_id).await;
        }
    }

    if let Some(notice) = page.notice() {
        println!("{}", notice);
    }
    println!("Events");
    print!("{}", page.events());
    println!("Bookings");
    print!("{}", page.bookings());
}

fn print_header<W: CalendarWidget>(page: &HomePage<W>) {
    if let Some(welcome) = &page.header().welcome {
        let admin = if page.header().show_admin_nav { " (admin)" } else { "" };
        println!("{}{}", welcome, admin);
    }
}

fn print_status<W: CalendarWidget>(page: &HomePage<W>) {
    print_header(page);
    if let LoadingLine::Failed(text) = page.loading() {
        println!("{}", text);
    }
    if let Some(message) = page.message() {
        println!("{}", message);
    }
}

fn print_home<W: CalendarWidget>(page: &HomePage<W>) {
    print_status(page);
    print!("{}", page.available());
}

fn print_tickets(page: &TicketsPage) {
    if page.redirected() {
        return;
    }
    if page.no_tickets() {
        println!("You have no tickets yet.");
        return;
    }
    print!("{}", page.tickets());
}
