//! `umint` - command-line client for the U-Mint marketplace.
//!
//! Every invocation restores the stored session first (`SessionManager::init`),
//! then runs one command against it.

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use shared::short_address;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use umint::app::{router, SessionManager};
use umint::core::{AuthService, ClientConfig};
use umint::debug::{self, LogConfig};
use umint::services::api::{collections, nfts, sales, ApiClient};
use umint::services::storage::FileStorage;
use umint::services::wallet::{KeyfileWallet, WalletKind, WalletRegistry};
use umint::utils::validation::{
    validate_email, validate_login_password, validate_password, validate_username, validate_verification_code,
};

/// U-Mint marketplace client
///
/// Configuration is read from the environment (and a `.env` file):
/// UMINT_API_URL, UMINT_ENV, UMINT_STORAGE_PATH, UMINT_KEYPAIR_PATH,
/// UMINT_WALLET_KIND, UMINT_WALLET_TRUSTED, UMINT_LOG_DIR, RUST_LOG.
#[derive(Parser, Debug)]
#[command(name = "umint", author, version, about = "U-Mint NFT marketplace client")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the restored session
    Status,

    /// Log in with email and password
    Login { email: String, password: String },

    /// Log out (the wallet connection is kept)
    Logout,

    /// Register with email verification
    ///
    /// Sends a code to `email`, then prompts for the code (or `resend`) and a
    /// password on stdin.
    Register { email: String, username: String },

    /// Wallet connection
    #[command(subcommand)]
    Wallet(WalletCommand),

    /// List collections
    Collections {
        /// Only collections created by this user id
        #[arg(long)]
        creator: Option<String>,
    },

    /// List NFTs
    Nfts {
        /// Only NFTs owned by this user id
        #[arg(long, conflicts_with = "collection")]
        owner: Option<String>,

        /// Only NFTs in this collection
        #[arg(long)]
        collection: Option<String>,
    },

    /// List sales
    Sales,

    /// Resolve a client route for the current session
    Route { path: String },
}

#[derive(Subcommand, Debug)]
enum WalletCommand {
    /// Connect a wallet and log in with it (or link it to the current account)
    Connect {
        /// phantom or solflare
        kind: WalletKind,
    },

    /// Disconnect the wallet
    Disconnect,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = ClientConfig::from_env().map_err(|e| anyhow!(e))?;
    config.validate().map_err(|e| anyhow!(e))?;

    let _log_guard = debug::init_logger(&LogConfig::from(&config)).map_err(|e| anyhow!(e))?;
    tracing::debug!(api = %config.api_base_url, production = config.production, "Configuration loaded");

    let api = Arc::new(ApiClient::new(&config)?);

    let mut wallets = WalletRegistry::new();
    if config.enable_wallet_connect {
        wallets.register(Arc::new(KeyfileWallet::new(
            config.wallet_kind,
            &config.keypair_path,
            config.wallet_trusted,
        )));
    }
    if wallets.is_empty() {
        tracing::info!("Wallet connect disabled, session restores from storage only");
    }

    let auth: Arc<dyn AuthService> = api.clone();
    let storage = Arc::new(FileStorage::new(&config.storage_path));
    let manager = SessionManager::new(auth, storage, wallets);

    manager.init().await.context("Failed to restore session")?;

    run(args.command, &manager, &api, &config).await
}

async fn run(command: Command, manager: &SessionManager, api: &ApiClient, config: &ClientConfig) -> anyhow::Result<()> {
    match command {
        Command::Status => print_status(manager),

        Command::Login { email, password } => {
            validate_email(&email).into_result().map_err(|e| anyhow!(e))?;
            validate_login_password(&password).into_result().map_err(|e| anyhow!(e))?;

            let user = manager.login_with_email(&email, &password).await?;
            println!("Logged in as {} ({})", user.display_name, user.email);
        }

        Command::Logout => {
            manager.clear_session()?;
            println!("Logged out");
        }

        Command::Register { email, username } => {
            validate_email(&email).into_result().map_err(|e| anyhow!(e))?;
            validate_username(&username).into_result().map_err(|e| anyhow!(e))?;
            register(manager, &email, &username).await?;
        }

        Command::Wallet(WalletCommand::Connect { kind }) => {
            if !config.enable_wallet_connect {
                return Err(anyhow!("Wallet connection is disabled (UMINT_ENABLE_WALLET_CONNECT=0)"));
            }
            let address = manager.connect_wallet(kind).await?;
            println!("{} wallet connected: {}", kind, short_address(&address));
            print_status(manager);
        }

        Command::Wallet(WalletCommand::Disconnect) => {
            manager.disconnect_wallet().await?;
            println!("Wallet disconnected");
        }

        Command::Collections { creator } => {
            let list = match creator {
                Some(creator) => collections::get_by_creator(api, &creator).await?,
                None => collections::get_all(api).await?,
            };
            for c in &list {
                println!(
                    "{}  {:<30} items={:<5} floor={:<8} created={}",
                    c.id,
                    c.name,
                    c.total_items,
                    c.floor_price,
                    c.created_at.format("%Y-%m-%d")
                );
            }
            println!("{} collection(s)", list.len());
        }

        Command::Nfts { owner, collection } => {
            let list = match (owner, collection) {
                (Some(owner), _) => nfts::get_by_owner(api, &owner).await?,
                (None, Some(collection)) => nfts::get_by_collection(api, &collection).await?,
                (None, None) => nfts::get_all(api).await?,
            };
            for n in &list {
                let price = n
                    .price
                    .map(|p| format!("{} {}", p, n.currency.as_deref().unwrap_or("")))
                    .unwrap_or_else(|| "-".to_string());
                println!("{}  {:<30} owner={} price={}", n.id, n.name, n.owner_id, price.trim_end());
            }
            println!("{} NFT(s)", list.len());
        }

        Command::Sales => {
            let list = sales::get_all(api).await?;
            for s in &list {
                println!(
                    "{}  nft={} {} {} status={:?}{}",
                    s.id,
                    s.nft_id,
                    s.price,
                    s.currency,
                    s.status,
                    if s.is_auction { " (auction)" } else { "" }
                );
            }
            println!("{} sale(s)", list.len());
        }

        Command::Route { path } => {
            let route = router::resolve(&path, &manager.snapshot());
            println!("{} -> {} ({})", path, route.path(), route.title());
        }
    }

    Ok(())
}

/// Interactive part of email registration.
async fn register(manager: &SessionManager, email: &str, username: &str) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    manager.start_registration(email).await?;
    println!("Verification code sent to {}", email);

    loop {
        let input = prompt(&mut lines, "Verification code (or 'resend'): ").await?;
        if input.eq_ignore_ascii_case("resend") {
            manager.resend_verification_code().await?;
            println!("Verification code resent to {}", email);
            continue;
        }

        if let Err(e) = validate_verification_code(&input).into_result() {
            eprintln!("{}", e);
            continue;
        }

        match manager.verify_email(&input).await {
            Ok(()) => break,
            Err(e) => eprintln!("{}", e),
        }
    }

    let password = loop {
        let password = prompt(&mut lines, "Password: ").await?;
        match validate_password(&password).into_result() {
            Ok(()) => break password,
            Err(e) => eprintln!("{}", e),
        }
    };

    let user = manager.complete_registration(username, &password).await?;
    println!("Registered and logged in as {}", user.display_name);
    Ok(())
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let line = lines
        .next_line()
        .await?
        .ok_or_else(|| anyhow!("Input closed before registration finished"))?;
    Ok(line.trim().to_string())
}

fn print_status(manager: &SessionManager) {
    let session = manager.snapshot();
    println!("Session: {}", session.phase());

    match session.user() {
        Some(user) => {
            println!("User:    {} <{}> (id {})", user.display_name, user.email, user.id);
            if let Some(address) = &user.wallet_address {
                println!("Linked:  {}", short_address(address));
            }
        }
        None => println!("User:    not logged in"),
    }

    match (session.wallet().kind(), session.wallet().address()) {
        (Some(kind), Some(address)) => println!("Wallet:  {} {}", kind, short_address(address)),
        _ => println!("Wallet:  not connected"),
    }
}
