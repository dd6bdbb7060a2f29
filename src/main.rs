//! Custody wallet CLI application
//!
//! A command-line interface for driving a quorum-governed custody
//! wallet persisted as a JSON snapshot.

use clap::{Parser, Subcommand};
use custody_wallet::cli::commands::{self, AppState, CliResult};
use custody_wallet::multisig::{GovernanceAction, ProposalAction};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "custody")]
#[command(version = "0.1.0")]
#[command(about = "A quorum-governed multi-signature custody wallet", long_about = None)]
struct Cli {
    /// Data directory for custody state
    #[arg(short, long, default_value = ".custody_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new custody wallet
    Init {
        /// Owner identities (repeat for each owner)
        #[arg(short, long, required = true)]
        owner: Vec<String>,

        /// Confirmations required before a proposal executes
        #[arg(short, long)]
        required: usize,

        /// Admin of the peripheral vault and blacklist registries
        #[arg(short, long)]
        admin: String,
    },

    /// Credit funds to the wallet's vault account (admin only)
    Deposit {
        /// Calling identity (must be the vault admin)
        #[arg(short, long)]
        caller: String,

        /// Amount to credit
        #[arg(short, long)]
        value: u128,
    },

    /// Show a balance
    Balance {
        /// Identity to look up (defaults to the wallet itself)
        #[arg(short, long)]
        who: Option<String>,
    },

    /// Submit a transfer proposal
    Submit {
        /// Calling identity (must be an owner)
        #[arg(short, long)]
        caller: String,

        /// Destination identity
        #[arg(short, long)]
        to: String,

        /// Amount of native currency to transfer
        #[arg(short, long)]
        value: u128,

        /// Opaque call payload, hex-encoded
        #[arg(short, long)]
        payload: Option<String>,
    },

    /// Submit a governance proposal
    Govern {
        /// Calling identity (must be an owner)
        #[arg(short, long)]
        caller: String,

        #[command(subcommand)]
        action: GovernCommands,
    },

    /// Confirm a pending proposal
    Confirm {
        /// Calling identity (must be an owner)
        #[arg(short, long)]
        caller: String,

        /// Proposal id
        #[arg(short, long)]
        id: u64,
    },

    /// Revoke a confirmation
    Revoke {
        /// Calling identity (must be an owner)
        #[arg(short, long)]
        caller: String,

        /// Proposal id
        #[arg(short, long)]
        id: u64,
    },

    /// Retry execution of a pending proposal
    Execute {
        /// Proposal id
        #[arg(short, long)]
        id: u64,
    },

    /// Show one proposal in detail
    Show {
        /// Proposal id
        #[arg(short, long)]
        id: u64,
    },

    /// List proposals
    List {
        /// Include pending proposals
        #[arg(long)]
        pending: bool,

        /// Include executed proposals
        #[arg(long)]
        executed: bool,
    },

    /// Show the owner registry
    Owners,

    /// Dump the wallet's audit log
    Events,

    /// Blacklist operations
    Blacklist {
        #[command(subcommand)]
        action: BlacklistCommands,
    },
}

#[derive(Subcommand)]
enum GovernCommands {
    /// Propose adding an owner
    AddOwner { identity: String },
    /// Propose removing an owner
    RemoveOwner { identity: String },
    /// Propose swapping one owner for another
    ReplaceOwner { old: String, new: String },
    /// Propose a new confirmation threshold
    SetRequirement { required: usize },
}

#[derive(Subcommand)]
enum BlacklistCommands {
    /// Add an identity (admin only)
    Add {
        #[arg(short, long)]
        caller: String,
        identity: String,
    },
    /// Remove an identity (admin only)
    Remove {
        #[arg(short, long)]
        caller: String,
        identity: String,
    },
    /// Check an identity
    Check { identity: String },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Commands::Init {
        owner,
        required,
        admin,
    } = cli.command
    {
        return commands::cmd_init(&cli.data_dir, owner, required, &admin);
    }

    let mut app = AppState::load(&cli.data_dir)?;

    match cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Deposit { caller, value } => commands::cmd_deposit(&mut app, &caller, value)?,
        Commands::Balance { who } => commands::cmd_balance(&app, who.as_deref())?,
        Commands::Submit {
            caller,
            to,
            value,
            payload,
        } => {
            let payload = match payload {
                Some(p) => hex::decode(p)?,
                None => vec![],
            };
            let action = ProposalAction::Call {
                destination: to,
                value,
                payload,
            };
            commands::cmd_submit(&mut app, &caller, action)?;
        }
        Commands::Govern { caller, action } => {
            let governance = match action {
                GovernCommands::AddOwner { identity } => GovernanceAction::AddOwner { identity },
                GovernCommands::RemoveOwner { identity } => {
                    GovernanceAction::RemoveOwner { identity }
                }
                GovernCommands::ReplaceOwner { old, new } => {
                    GovernanceAction::ReplaceOwner { old, new }
                }
                GovernCommands::SetRequirement { required } => {
                    GovernanceAction::ChangeRequirement { required }
                }
            };
            commands::cmd_submit(&mut app, &caller, ProposalAction::Governance(governance))?;
        }
        Commands::Confirm { caller, id } => commands::cmd_confirm(&mut app, &caller, id)?,
        Commands::Revoke { caller, id } => commands::cmd_revoke(&mut app, &caller, id)?,
        Commands::Execute { id } => commands::cmd_execute(&mut app, id)?,
        Commands::Show { id } => commands::cmd_show(&app, id)?,
        Commands::List { pending, executed } => commands::cmd_list(&app, pending, executed)?,
        Commands::Owners => commands::cmd_owners(&app)?,
        Commands::Events => commands::cmd_events(&app)?,
        Commands::Blacklist { action } => match action {
            BlacklistCommands::Add { caller, identity } => {
                commands::cmd_blacklist_add(&mut app, &caller, &identity)?
            }
            BlacklistCommands::Remove { caller, identity } => {
                commands::cmd_blacklist_remove(&mut app, &caller, &identity)?
            }
            BlacklistCommands::Check { identity } => commands::cmd_blacklist_check(&app, &identity)?,
        },
    }

    app.save()?;
    Ok(())
}
