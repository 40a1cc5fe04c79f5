//! Auth CLI commands

use clap::Subcommand;

use crate::auth::{AuthGate, AuthProvider, LocalAuthProvider};
use crate::error::BudgetResult;

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with an email address
    Login {
        email: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in and whether they may see the budget
    Status,
}

/// Handle an auth command
pub fn handle_auth_command(provider: LocalAuthProvider, cmd: AuthCommands) -> BudgetResult<()> {
    match cmd {
        AuthCommands::Login { email } => {
            let session = provider.sign_in(&email)?;
            println!("Signed in as {}", session.email);
            if !provider.is_email_allowed(&session.email)? {
                println!("⚠ {} is not on the allow-list; budget data stays locked.", session.email);
            }
        }

        AuthCommands::Logout => {
            let mut gate = AuthGate::new(provider);
            gate.sign_out()?;
            println!("Signed out.");
        }

        AuthCommands::Status => {
            let gate = AuthGate::new(provider);
            match gate.session() {
                Some(session) => {
                    println!("Signed in as {}", session.email);
                    println!(
                        "Session expires {}",
                        session.expires_at.format("%Y-%m-%d %H:%M UTC")
                    );
                    println!(
                        "Access: {}",
                        if gate.is_authenticated() {
                            "allowed"
                        } else {
                            "not on the allow-list"
                        }
                    );
                }
                None => println!("Not signed in."),
            }
        }
    }

    Ok(())
}
