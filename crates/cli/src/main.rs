//! Streamline CLI - Database migrations and account provisioning.
//!
//! # Usage
//!
//! ```bash
//! # Run dashboard database migrations
//! sl-cli migrate
//!
//! # Create a staff account
//! sl-cli user create -e ops@streamlinelogistics.com -n "Ops Desk" -r staff -p '...'
//!
//! # Promote an existing account
//! sl-cli user set-role -e ops@streamlinelogistics.com -r admin
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create a user with its profile
//! - `user set-role` - Change a user's role

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use streamline_core::Role;

mod commands;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(author, version, about = "Streamline Logistics CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage dashboard users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user account and its profile
    Create {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Full name shown on the dashboard
        #[arg(short, long)]
        name: String,

        /// Role (`customer`, `staff`, `admin`)
        #[arg(short, long, default_value = "customer")]
        role: Role,

        /// Initial password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change the role of an existing user
    SetRole {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// New role (`customer`, `staff`, `admin`)
        #[arg(short, long)]
        role: Role,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                role,
                password,
                company,
                phone,
            } => {
                commands::user::create(&commands::user::CreateUser {
                    email: &email,
                    name: &name,
                    role,
                    password: &password,
                    company: company.as_deref(),
                    phone: phone.as_deref(),
                })
                .await?;
            }
            UserAction::SetRole { email, role } => {
                commands::user::set_role(&email, role).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from([
            "sl-cli", "user", "create", "-e", "ops@example.com", "-n", "Ops", "-r", "staff", "-p",
            "longpassword", "--company", "Acme",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::User {
            action: UserAction::Create { role, company, .. },
        } = cli.command
        else {
            panic!("expected user create");
        };
        assert_eq!(role, Role::Staff);
        assert_eq!(company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(
            Cli::try_parse_from(["sl-cli", "user", "set-role", "-e", "a@b.co", "-r", "owner"])
                .is_err()
        );
    }
}
