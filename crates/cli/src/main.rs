//! `opsdesk` -- command-line shell for the incident tracking API.
//!
//! Signs in against the REST API, keeps the session and per-view
//! preferences in a local redb database, and drives the same list
//! controllers the interactive views use.
//!
//! # Environment variables
//!
//! | Variable                       | Required | Default                     | Description                          |
//! |--------------------------------|----------|-----------------------------|--------------------------------------|
//! | `OPSDESK_API_URL`              | no       | `http://localhost:8080/api` | REST API base URL                    |
//! | `OPSDESK_REQUEST_TIMEOUT_SECS` | no       | `30`                        | HTTP request timeout in seconds      |
//! | `OPSDESK_DATA_DIR`             | no       | `~/.opsdesk`                | Local session/preferences directory  |

use anyhow::bail;

use opsdesk_cli::app::App;
use opsdesk_cli::{args, commands};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "opsdesk_cli=info,opsdesk_views=info,opsdesk_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = argv.first().map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    if let Err(error) = run(command, &argv[1..]).await {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

async fn run(command: &str, rest: &[String]) -> anyhow::Result<()> {
    let app = App::from_env()?;
    match command {
        "login" => {
            let [email, password] = rest else {
                bail!("usage: opsdesk login <email> <password>");
            };
            commands::login(&app, email, password).await
        }
        "logout" => commands::logout(&app),
        "whoami" => commands::whoami(&app),
        "incidents" => commands::incidents(&app, &args::parse_list_options(rest)?).await,
        "change-requests" => commands::change_requests(&app, &args::parse_list_options(rest)?).await,
        "users" => commands::users(&app, &args::parse_list_options(rest)?).await,
        other => {
            print_usage();
            bail!("unknown command '{other}'")
        }
    }
}

fn print_usage() {
    println!("opsdesk -- incident tracking client");
    println!();
    println!("Usage:");
    println!("  opsdesk login <email> <password>");
    println!("  opsdesk whoami");
    println!("  opsdesk logout");
    println!("  opsdesk incidents       [--tab TAB] [--search TERM] [--page N]");
    println!("  opsdesk change-requests [--tab TAB] [--search TERM] [--page N]");
    println!("  opsdesk users           [--tab TAB] [--search TERM] [--page N]");
}
