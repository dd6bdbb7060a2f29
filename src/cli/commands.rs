//! CLI command handlers
//!
//! Each handler operates on an [`AppState`] loaded from disk and saved
//! back after the command completes.

use crate::ledger::{BlacklistRegistry, LedgerTarget, Vault};
use crate::multisig::{MultisigWallet, ProposalAction, ProposalId};
use crate::storage::{CustodyState, Storage, StorageConfig};
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub state: CustodyState,
    pub storage: Storage,
}

impl AppState {
    /// Load the custody state from the data directory
    pub fn load(data_dir: &Path) -> CliResult<Self> {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        })?;

        if !storage.exists() {
            return Err("no custody state found; run `custody init` first".into());
        }

        Ok(Self {
            state: storage.load()?,
            storage,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.state)?;
        Ok(())
    }
}

/// Initialize a new custody wallet
pub fn cmd_init(
    data_dir: &Path,
    owners: Vec<String>,
    required: usize,
    admin: &str,
) -> CliResult<()> {
    let storage = Storage::new(StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?;

    if storage.exists() {
        println!("⚠️  Custody state already exists at {:?}", data_dir);
        return Ok(());
    }

    let wallet = MultisigWallet::new("wallet", owners, required)?;
    let state = CustodyState {
        vault: Vault::new(admin)?,
        blacklist: BlacklistRegistry::new(admin)?,
        wallet,
    };
    storage.save(&state)?;

    println!("✅ Custody wallet initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!(
        "   🔐 Quorum: {}-of-{}",
        state.wallet.required(),
        state.wallet.owners().len()
    );
    println!("   👥 Owners: {}", state.wallet.owners().join(", "));

    Ok(())
}

/// Credit funds to the wallet's vault account (admin only)
pub fn cmd_deposit(app: &mut AppState, caller: &str, value: u128) -> CliResult<()> {
    let wallet_address = app.state.wallet.address().to_string();
    app.state.vault.credit(caller, &wallet_address, value)?;
    println!(
        "💰 Deposited {}; wallet balance is now {}",
        value,
        app.state.vault.balance_of(&wallet_address)
    );
    Ok(())
}

/// Show the balance of an identity
pub fn cmd_balance(app: &AppState, who: Option<&str>) -> CliResult<()> {
    let who = who.unwrap_or_else(|| app.state.wallet.address());
    println!("💳 Balance of {}: {}", who, app.state.vault.balance_of(who));
    Ok(())
}

/// Submit a proposal and report its id and status
pub fn cmd_submit(app: &mut AppState, caller: &str, action: ProposalAction) -> CliResult<()> {
    let CustodyState {
        wallet,
        vault,
        blacklist,
    } = &mut app.state;
    let address = wallet.address().to_string();
    let mut target = LedgerTarget {
        vault,
        blacklist,
        wallet: &address,
    };

    let id = wallet.submit(caller, action, &mut target)?;
    println!("📨 Proposal {} submitted by {}", id, caller);
    print_status(wallet, id)?;
    Ok(())
}

/// Confirm a proposal on behalf of an owner
pub fn cmd_confirm(app: &mut AppState, caller: &str, id: ProposalId) -> CliResult<()> {
    let CustodyState {
        wallet,
        vault,
        blacklist,
    } = &mut app.state;
    let address = wallet.address().to_string();
    let mut target = LedgerTarget {
        vault,
        blacklist,
        wallet: &address,
    };

    wallet.confirm(caller, id, &mut target)?;
    println!("✍️  Proposal {} confirmed by {}", id, caller);
    print_status(wallet, id)?;
    Ok(())
}

/// Retract a confirmation
pub fn cmd_revoke(app: &mut AppState, caller: &str, id: ProposalId) -> CliResult<()> {
    app.state.wallet.revoke(caller, id)?;
    println!("↩️  Proposal {} confirmation revoked by {}", id, caller);
    print_status(&app.state.wallet, id)?;
    Ok(())
}

/// Retry execution of a pending proposal
pub fn cmd_execute(app: &mut AppState, id: ProposalId) -> CliResult<()> {
    let CustodyState {
        wallet,
        vault,
        blacklist,
    } = &mut app.state;
    let address = wallet.address().to_string();
    let mut target = LedgerTarget {
        vault,
        blacklist,
        wallet: &address,
    };

    wallet.execute(id, &mut target)?;
    print_status(wallet, id)?;
    Ok(())
}

/// Show one proposal in detail
pub fn cmd_show(app: &AppState, id: ProposalId) -> CliResult<()> {
    let wallet = &app.state.wallet;
    let proposal = wallet.proposal(id)?;

    println!("Proposal {}", id);
    match &proposal.action {
        ProposalAction::Call {
            destination,
            value,
            payload,
        } => {
            println!("   ├─ Kind: transfer");
            println!("   ├─ Destination: {}", destination);
            println!("   ├─ Value: {}", value);
            if !payload.is_empty() {
                println!("   ├─ Payload: {}", hex::encode(payload));
            }
        }
        ProposalAction::Governance(action) => {
            println!("   ├─ Kind: governance");
            println!("   ├─ Action: {:?}", action);
        }
    }
    println!("   ├─ Created: {}", proposal.created_at);
    println!(
        "   ├─ Confirmations: {}/{} ({})",
        wallet.confirmation_count(id)?,
        wallet.required(),
        wallet.confirmations(id)?.join(", ")
    );
    println!("   └─ Executed: {}", proposal.executed);
    Ok(())
}

/// List proposal ids by status
pub fn cmd_list(app: &AppState, pending: bool, executed: bool) -> CliResult<()> {
    // With no flags, list everything
    let (pending, executed) = if !pending && !executed {
        (true, true)
    } else {
        (pending, executed)
    };

    let wallet = &app.state.wallet;
    let total = wallet.transaction_count(pending, executed);
    let ids = wallet.transaction_ids(0, total, pending, executed);

    println!("📋 {} proposal(s)", ids.len());
    for id in ids {
        let proposal = wallet.proposal(id)?;
        let status = if proposal.executed {
            "executed"
        } else {
            "pending"
        };
        println!(
            "   {} [{}] {}/{} confirmations",
            id,
            status,
            wallet.confirmation_count(id)?,
            wallet.required()
        );
    }
    Ok(())
}

/// Show the owner registry
pub fn cmd_owners(app: &AppState) -> CliResult<()> {
    let wallet = &app.state.wallet;
    println!(
        "👥 {}-of-{} wallet",
        wallet.required(),
        wallet.owners().len()
    );
    for owner in wallet.owners() {
        println!("   - {}", owner);
    }
    Ok(())
}

/// Dump the wallet's audit log
pub fn cmd_events(app: &AppState) -> CliResult<()> {
    println!("🧾 {} event(s)", app.state.wallet.events().len());
    for event in app.state.wallet.events() {
        println!("   {:?}", event);
    }
    Ok(())
}

/// Add an identity to the blacklist (admin only)
pub fn cmd_blacklist_add(app: &mut AppState, caller: &str, identity: &str) -> CliResult<()> {
    app.state.blacklist.add(caller, identity)?;
    println!("🚫 Blacklisted {}", identity);
    Ok(())
}

/// Remove an identity from the blacklist (admin only)
pub fn cmd_blacklist_remove(app: &mut AppState, caller: &str, identity: &str) -> CliResult<()> {
    app.state.blacklist.remove(caller, identity)?;
    println!("✅ Un-blacklisted {}", identity);
    Ok(())
}

/// Check an identity against the blacklist
pub fn cmd_blacklist_check(app: &AppState, identity: &str) -> CliResult<()> {
    if app.state.blacklist.is_blacklisted(identity) {
        println!("🚫 {} is blacklisted", identity);
    } else {
        println!("✅ {} is not blacklisted", identity);
    }
    Ok(())
}

fn print_status(wallet: &MultisigWallet, id: ProposalId) -> CliResult<()> {
    let proposal = wallet.proposal(id)?;
    if proposal.executed {
        println!("   ✅ Executed");
    } else {
        println!(
            "   ⏳ Pending: {}/{} confirmations",
            wallet.confirmation_count(id)?,
            wallet.required()
        );
    }
    Ok(())
}
