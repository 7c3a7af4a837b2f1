use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

use metacow_client::chain::contracts::{find_token, Token, TOKEN_LIST};
use metacow_client::chain::provider::WalletProvider;
use metacow_client::chain::registry::OnChainRegistry;
use metacow_client::config::ClientConfig;
use metacow_client::logging;
use metacow_client::services::faucet::CLAIM_AMOUNT;
use metacow_client::services::feed::{paginate_swaps, FeedService};
use metacow_client::services::reputation::ReputationAggregator;
use metacow_client::services::session::WalletSessionManager;
use metacow_client::utils::format::{format_cooldown, lower_hex};
use metacow_client::utils::validation::{parse_address, validate_search_query};
use shared::utils::truncate_address;

#[derive(Parser)]
#[command(name = "metacow", version, about = "MetaCow wallet, reputation and alpha feed client")]
struct Cli {
    /// Social backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Wallet provider JSON-RPC endpoint
    #[arg(long, global = true)]
    rpc_url: Option<Url>,

    /// Pair ABI used for the reputation capability check
    #[arg(long, global = true)]
    pair_abi: Option<PathBuf>,

    /// Pairs read in parallel during a reputation scan
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect the wallet and show account, network and balance
    Connect,
    /// Aggregate a wallet's reputation across every factory pair
    Reputation { wallet: String },
    /// Show the alpha feed with each author's reputation
    Feed,
    /// Post to the feed from the connected wallet
    Post {
        content: String,
        /// Attach one of your recent swaps by transaction hash
        #[arg(long)]
        swap: Option<String>,
    },
    /// Like a post
    Like { post_id: String },
    /// Dislike a post
    Dislike { post_id: String },
    /// Follow a user by id
    Follow { user_id: String },
    /// Unfollow a user by id
    Unfollow { user_id: String },
    /// Search users by name or wallet
    Search { query: String },
    /// Recent swaps of a wallet, five per page
    Swaps {
        wallet: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Test-token faucet
    Faucet {
        #[command(subcommand)]
        action: FaucetAction,
    },
}

#[derive(Subcommand)]
enum FaucetAction {
    /// Cooldown for one token, or all of them
    Status { symbol: Option<String> },
    /// Claim a token with the connected wallet
    Claim { symbol: String },
    /// Ask the wallet to track a token
    Watch { symbol: String },
}

impl Cli {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.trim_end_matches('/').to_string();
        }
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url = Some(rpc_url.clone());
        }
        if let Some(path) = &self.pair_abi {
            config.pair_abi_path = Some(path.clone());
        }
        if let Some(concurrency) = self.concurrency {
            config.reputation_concurrency = concurrency;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    cli.apply(&mut config);
    config.validate()?;

    let _log_guard = logging::init(&config);

    let session = WalletSessionManager::new(Arc::new(config.provider_source()));
    let result = run(cli.command, &config, &session).await;
    session.disconnect();
    result
}

async fn run(command: Command, config: &ClientConfig, session: &WalletSessionManager) -> anyhow::Result<()> {
    match command {
        Command::Connect => {
            let info = session.connect().await?;
            println!("Address:  {}", lower_hex(&info.address));
            println!("Chain ID: {}", info.chain_id);
            println!("Balance:  {} ETH", info.balance);
        }

        Command::Reputation { wallet } => {
            let wallet = parse_address(&wallet)?;
            let aggregator = aggregator(config, session)?;
            let cancel = cancel_on_ctrl_c();

            let query = aggregator.scan(wallet, &cancel).await;
            match query.total_score {
                Some(total) => {
                    for pair in &query.pair_addresses {
                        match query.per_pair_score.get(pair) {
                            Some(score) => println!("  {}  {}", lower_hex(pair), score),
                            None => println!("  {}  -", lower_hex(pair)),
                        }
                    }
                    println!("Reputation of {}: {}", truncate_address(&lower_hex(&wallet)), total);
                }
                None => println!("Reputation unavailable"),
            }
        }

        Command::Feed => {
            let feed = feed_service(config, session)?;
            let entries = feed.load_feed(&cancel_on_ctrl_c()).await?;
            if entries.is_empty() {
                println!("No posts yet");
            }
            for entry in entries {
                let post = &entry.post;
                let author = post
                    .username
                    .clone()
                    .unwrap_or_else(|| truncate_address(&post.wallet));
                let reputation = entry
                    .author_reputation
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "?".to_string());
                let when = post
                    .created_at
                    .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();

                println!("[{}] {} (rep {}) {}", post.id, author, reputation, when);
                println!("    {}", post.content);
                if post.has_swap() {
                    println!(
                        "    swap: {} → {}",
                        post.token_in.as_deref().unwrap_or("?"),
                        post.token_out.as_deref().unwrap_or("?")
                    );
                }
                println!("    👍 {}  👎 {}", post.like_count(), post.dislike_count());
            }
        }

        Command::Post { content, swap } => {
            let feed = feed_service(config, session)?;
            let wallet = connect_for(session, "post").await?;

            let attached = match swap {
                Some(tx_hash) => {
                    let swaps = feed.recent_swaps(wallet).await?;
                    let found = swaps
                        .into_iter()
                        .find(|s| s.tx_hash.eq_ignore_ascii_case(tx_hash.trim()))
                        .ok_or_else(|| anyhow!("No recent swap with hash {}", tx_hash))?;
                    Some(found)
                }
                None => None,
            };

            feed.create_post(Some(wallet), &content, attached.as_ref()).await?;
            println!("Posted");
        }

        Command::Like { post_id } => {
            let feed = feed_service(config, session)?;
            let wallet = connect_for(session, "like posts").await?;
            feed.like(Some(wallet), &post_id).await?;
            println!("Liked {}", post_id);
        }

        Command::Dislike { post_id } => {
            let feed = feed_service(config, session)?;
            let wallet = connect_for(session, "dislike posts").await?;
            feed.dislike(Some(wallet), &post_id).await?;
            println!("Disliked {}", post_id);
        }

        Command::Follow { user_id } => {
            let feed = feed_service(config, session)?;
            let wallet = connect_for(session, "follow users").await?;
            let mut state = feed.load_profile(wallet).await?;
            if state.is_following(&user_id) {
                println!("Already following {}", user_id);
            } else {
                feed.follow(&mut state, &user_id).await?;
                println!("Following {} users", state.following.len());
            }
        }

        Command::Unfollow { user_id } => {
            let feed = feed_service(config, session)?;
            let wallet = connect_for(session, "unfollow users").await?;
            let mut state = feed.load_profile(wallet).await?;
            if !state.is_following(&user_id) {
                println!("Not following {}", user_id);
            } else {
                feed.unfollow(&mut state, &user_id).await?;
                println!("Following {} users", state.following.len());
            }
        }

        Command::Search { query } => {
            validate_search_query(&query).into_result()?;
            let users = config.api_client().search_users(query.trim()).await?;
            if users.is_empty() {
                println!("No users found");
            }
            for user in users {
                let wallet = user.wallet.as_deref().map(truncate_address).unwrap_or_default();
                println!("{}  {}  {}", user.id, user.display_name(), wallet);
            }
        }

        Command::Swaps { wallet, page } => {
            let wallet = parse_address(&wallet)?;
            let swaps = config.api_client().recent_swaps(&lower_hex(&wallet)).await?;
            let page = paginate_swaps(&swaps, page);
            for swap in page.swaps {
                println!("{}  {}", truncate_address(&swap.tx_hash), swap.summary());
            }
            println!("Page {} of {}", page.page, page.total_pages.max(1));
        }

        Command::Faucet { action } => faucet(action, config, session).await?,
    }

    Ok(())
}

async fn faucet(action: FaucetAction, config: &ClientConfig, session: &WalletSessionManager) -> anyhow::Result<()> {
    let faucet = config.faucet_client();

    match action {
        FaucetAction::Status { symbol } => {
            let tokens: Vec<&Token> = match symbol {
                Some(symbol) => vec![token(&symbol)?],
                None => TOKEN_LIST.iter().collect(),
            };
            let user = connect_for(session, "check the faucet").await?;
            let provider = require_provider(session)?;

            for token in tokens {
                let remaining = faucet.cooldown(provider.as_ref(), user, token).await?;
                if remaining == 0 {
                    println!("{:<5} ready to claim {} {}", token.symbol, CLAIM_AMOUNT, token.symbol);
                } else {
                    println!("{:<5} cooldown {}", token.symbol, format_cooldown(remaining));
                }
            }
        }

        FaucetAction::Claim { symbol } => {
            let token = token(&symbol)?;
            connect_for(session, "claim").await?;
            let signer = session
                .signer()
                .ok_or_else(|| anyhow!("Wallet session ended before claiming"))?;

            let receipt = faucet
                .claim(&signer, token)
                .await
                .context("Claim failed or already claimed")?;
            println!(
                "Claimed {} {} in {}",
                receipt.amount,
                receipt.symbol,
                truncate_address(&receipt.tx_hash.to_string())
            );
        }

        FaucetAction::Watch { symbol } => {
            let token = token(&symbol)?;
            let provider = require_provider(session)?;
            if faucet.watch_asset(provider.as_ref(), token).await? {
                println!("{} added to wallet", token.symbol);
            } else {
                println!("Token addition rejected");
            }
        }
    }

    Ok(())
}

fn token(symbol: &str) -> anyhow::Result<&'static Token> {
    find_token(symbol).ok_or_else(|| {
        let known: Vec<&str> = TOKEN_LIST.iter().map(|t| t.symbol).collect();
        anyhow!("Unknown token {}; expected one of {}", symbol, known.join(", "))
    })
}

fn require_provider(session: &WalletSessionManager) -> anyhow::Result<Arc<dyn WalletProvider>> {
    match session.provider() {
        Some(provider) => Ok(provider),
        None => bail!("No wallet provider configured; set METACOW_RPC_URL or pass --rpc-url"),
    }
}

async fn connect_for(session: &WalletSessionManager, action: &str) -> anyhow::Result<alloy_primitives::Address> {
    let info = session
        .connect()
        .await
        .with_context(|| format!("Connect a wallet to {}", action))?;
    Ok(info.address)
}

/// Aggregator over the session's provider; with none configured every scan
/// reports no reputation.
fn aggregator(config: &ClientConfig, session: &WalletSessionManager) -> anyhow::Result<ReputationAggregator> {
    let registry = OnChainRegistry::from_provider(session.provider(), config.factory_address);
    let pair_interface = config.pair_interface()?;

    Ok(ReputationAggregator::new(Arc::new(registry), &pair_interface)
        .with_concurrency(config.reputation_concurrency))
}

fn feed_service(config: &ClientConfig, session: &WalletSessionManager) -> anyhow::Result<FeedService> {
    Ok(FeedService::new(
        Arc::new(config.api_client()),
        Arc::new(aggregator(config, session)?),
    ))
}

/// Token cancelled by the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted; abandoning scan");
            trigger.cancel();
        }
    });
    cancel
}
