//! # Social Feed
//!
//! The alpha feed: posts with their authors' on-chain reputation, posting
//! (optionally about a recent swap), reactions, user search and the local
//! follow graph.
//!
//! Every feed load asks the aggregator once per post. Lookups are independent
//! and nothing is cached, so an author with several posts is scanned several
//! times.

use alloy_primitives::{Address, U256};
use futures::future::join_all;
use shared::dto::posts::{CreatePostRequest, Post, SwapPostRequest};
use shared::dto::swaps::RecentSwap;
use shared::dto::users::User;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::core::service::SocialApi;
use crate::services::reputation::ReputationAggregator;
use crate::utils::format::lower_hex;
use crate::utils::validation::{parse_address, validate_post_content};

/// Recent swaps shown per page in the composer
pub const SWAPS_PER_PAGE: usize = 5;

/// A post paired with its author's reputation at load time
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub post: Post,
    /// `None` when the author's wallet is malformed or the scan failed
    pub author_reputation: Option<U256>,
}

/// The connected user's profile and who they follow
#[derive(Debug, Clone)]
pub struct FollowState {
    pub me: User,
    pub following: HashSet<String>,
}

impl FollowState {
    pub fn is_following(&self, user_id: &str) -> bool {
        self.following.contains(user_id)
    }
}

/// One page of recent swaps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapPage<'a> {
    pub swaps: &'a [RecentSwap],
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
}

/// Slice `swaps` into pages of [`SWAPS_PER_PAGE`], clamping `page` into range.
pub fn paginate_swaps(swaps: &[RecentSwap], page: usize) -> SwapPage<'_> {
    let total_pages = swaps.len().div_ceil(SWAPS_PER_PAGE);
    let page = page.clamp(1, total_pages.max(1));
    let start = ((page - 1) * SWAPS_PER_PAGE).min(swaps.len());
    let end = (start + SWAPS_PER_PAGE).min(swaps.len());

    SwapPage {
        swaps: &swaps[start..end],
        page,
        total_pages,
    }
}

fn require_wallet(wallet: Option<Address>, action: &str) -> Result<String> {
    wallet
        .map(|w| lower_hex(&w))
        .ok_or_else(|| AppError::Wallet(format!("Connect a wallet to {}", action)))
}

pub struct FeedService {
    api: Arc<dyn SocialApi>,
    reputation: Arc<ReputationAggregator>,
}

impl FeedService {
    pub fn new(api: Arc<dyn SocialApi>, reputation: Arc<ReputationAggregator>) -> Self {
        Self { api, reputation }
    }

    /// Fetch every post and look up each author's reputation.
    ///
    /// Cancelling abandons the outstanding lookups; their entries carry `None`.
    pub async fn load_feed(&self, cancel: &CancellationToken) -> Result<Vec<FeedEntry>> {
        let posts = self.api.get_posts().await?;
        debug!(posts = posts.len(), "Loaded feed");

        let lookups = posts.iter().map(|post| async move {
            match parse_address(&post.wallet) {
                Ok(author) => {
                    self.reputation
                        .compute_reputation_with_cancel(author, cancel)
                        .await
                }
                Err(_) => {
                    debug!(post = %post.id, wallet = %post.wallet, "Post author is not an address");
                    None
                }
            }
        });
        let scores = join_all(lookups).await;

        Ok(posts
            .into_iter()
            .zip(scores)
            .map(|(post, author_reputation)| FeedEntry {
                post,
                author_reputation,
            })
            .collect())
    }

    /// Publish a post, attached to `swap` when given.
    ///
    /// Fails without calling the backend when no wallet is connected or the
    /// content is blank.
    pub async fn create_post(&self, wallet: Option<Address>, content: &str, swap: Option<&RecentSwap>) -> Result<()> {
        let wallet = require_wallet(wallet, "post")?;
        validate_post_content(content).into_result()?;

        match swap {
            Some(swap) => {
                let request = SwapPostRequest {
                    wallet,
                    content: content.to_string(),
                    tx_hash: swap.tx_hash.clone(),
                };
                self.api.create_post_from_swap(&request).await?;
                info!(tx = %swap.tx_hash, "Posted swap");
            }
            None => {
                let request = CreatePostRequest {
                    wallet,
                    content: content.to_string(),
                };
                self.api.create_post(&request).await?;
                info!("Posted to feed");
            }
        }
        Ok(())
    }

    pub async fn like(&self, wallet: Option<Address>, post_id: &str) -> Result<()> {
        let wallet = require_wallet(wallet, "like posts")?;
        self.api.like_post(post_id, &wallet).await
    }

    pub async fn dislike(&self, wallet: Option<Address>, post_id: &str) -> Result<()> {
        let wallet = require_wallet(wallet, "dislike posts")?;
        self.api.dislike_post(post_id, &wallet).await
    }

    /// Profile of `wallet` and the ids of the users it follows
    pub async fn load_profile(&self, wallet: Address) -> Result<FollowState> {
        let me = self.api.get_user_by_wallet(&lower_hex(&wallet)).await?;
        let following = self
            .api
            .get_following(&me.id)
            .await?
            .into_iter()
            .map(|user| user.id)
            .collect();

        Ok(FollowState { me, following })
    }

    /// Follow `target_id`, recording it locally once the backend accepts.
    pub async fn follow(&self, state: &mut FollowState, target_id: &str) -> Result<()> {
        self.api.follow_user(target_id, &state.me.id).await?;
        state.following.insert(target_id.to_string());
        Ok(())
    }

    pub async fn unfollow(&self, state: &mut FollowState, target_id: &str) -> Result<()> {
        self.api.unfollow_user(target_id, &state.me.id).await?;
        state.following.remove(target_id);
        Ok(())
    }

    /// Blank queries return nothing without calling the backend.
    pub async fn search(&self, query: &str) -> Result<Vec<User>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.api.search_users(query).await
    }

    pub async fn recent_swaps(&self, wallet: Address) -> Result<Vec<RecentSwap>> {
        self.api.recent_swaps(&lower_hex(&wallet)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::contracts::PairInterface;
    use crate::chain::mock::{fake_chain_provider, FakeChain};
    use crate::chain::registry::OnChainRegistry;
    use alloy_primitives::address;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    const FACTORY: Address = address!("0x524fec22546b087e91d198745cdd6ea94c057d79");
    const ALICE: Address = address!("0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be");

    /// In-memory backend recording every mutation
    #[derive(Default)]
    struct MockSocialApi {
        posts: Vec<Post>,
        following: Vec<User>,
        calls: Mutex<Vec<String>>,
        fail_follow: bool,
    }

    impl MockSocialApi {
        fn record(&self, call: String) {
            self.calls.lock().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            username: None,
            wallet: None,
            profile_image: None,
        }
    }

    fn post(id: &str, wallet: &str) -> Post {
        serde_json::from_value(json!({ "_id": id, "wallet": wallet, "content": "gm" })).unwrap()
    }

    #[async_trait]
    impl SocialApi for MockSocialApi {
        async fn get_user_by_wallet(&self, wallet: &str) -> Result<User> {
            self.record(format!("user {}", wallet));
            Ok(user("me"))
        }

        async fn get_posts(&self) -> Result<Vec<Post>> {
            Ok(self.posts.clone())
        }

        async fn create_post(&self, request: &CreatePostRequest) -> Result<()> {
            self.record(format!("post {} {}", request.wallet, request.content));
            Ok(())
        }

        async fn create_post_from_swap(&self, request: &SwapPostRequest) -> Result<()> {
            self.record(format!("swap-post {} {}", request.wallet, request.tx_hash));
            Ok(())
        }

        async fn like_post(&self, post_id: &str, wallet: &str) -> Result<()> {
            self.record(format!("like {} {}", post_id, wallet));
            Ok(())
        }

        async fn dislike_post(&self, post_id: &str, wallet: &str) -> Result<()> {
            self.record(format!("dislike {} {}", post_id, wallet));
            Ok(())
        }

        async fn get_following(&self, _user_id: &str) -> Result<Vec<User>> {
            Ok(self.following.clone())
        }

        async fn follow_user(&self, target_id: &str, follower_id: &str) -> Result<()> {
            if self.fail_follow {
                return Err(AppError::Api("Already following".to_string()));
            }
            self.record(format!("follow {} {}", target_id, follower_id));
            Ok(())
        }

        async fn unfollow_user(&self, target_id: &str, follower_id: &str) -> Result<()> {
            self.record(format!("unfollow {} {}", target_id, follower_id));
            Ok(())
        }

        async fn search_users(&self, query: &str) -> Result<Vec<User>> {
            self.record(format!("search {}", query));
            Ok(vec![user("found")])
        }

        async fn recent_swaps(&self, wallet: &str) -> Result<Vec<RecentSwap>> {
            self.record(format!("swaps {}", wallet));
            Ok(Vec::new())
        }
    }

    fn service(api: MockSocialApi) -> (FeedService, Arc<MockSocialApi>) {
        let chain = FakeChain::new(FACTORY)
            .with_pair(Address::with_last_byte(1), Some(U256::from(5)))
            .with_pair(Address::with_last_byte(2), Some(U256::from(7)));
        let registry = OnChainRegistry::new(fake_chain_provider(chain), FACTORY);
        let aggregator = ReputationAggregator::new(Arc::new(registry), &PairInterface::bundled().unwrap());

        let api = Arc::new(api);
        (FeedService::new(api.clone(), Arc::new(aggregator)), api)
    }

    fn swap(n: usize) -> RecentSwap {
        serde_json::from_value(json!({ "txHash": format!("0x{:02x}", n) })).unwrap()
    }

    #[tokio::test]
    async fn test_feed_attaches_reputation_per_post() {
        let (feed, _) = service(MockSocialApi {
            posts: vec![
                post("p1", "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be"),
                post("p2", "not-a-wallet"),
            ],
            ..Default::default()
        });

        let entries = feed.load_feed(&CancellationToken::new()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].author_reputation, Some(U256::from(12)));
        assert_eq!(entries[1].author_reputation, None);
    }

    #[tokio::test]
    async fn test_feed_lists_posts_without_a_provider() {
        let registry = OnChainRegistry::from_provider(None, FACTORY);
        let aggregator = ReputationAggregator::new(Arc::new(registry), &PairInterface::bundled().unwrap());
        let api = Arc::new(MockSocialApi {
            posts: vec![
                post("p1", "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be"),
                post("p2", "0x0000000000000000000000000000000000000abc"),
            ],
            ..Default::default()
        });
        let feed = FeedService::new(api, Arc::new(aggregator));

        let entries = feed.load_feed(&CancellationToken::new()).await.unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.post.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert!(entries.iter().all(|e| e.author_reputation.is_none()));
    }

    #[tokio::test]
    async fn test_cancelled_feed_has_no_scores() {
        let (feed, _) = service(MockSocialApi {
            posts: vec![post("p1", "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")],
            ..Default::default()
        });
        let cancel = CancellationToken::new();
        cancel.cancel();

        let entries = feed.load_feed(&cancel).await.unwrap();
        assert_eq!(entries[0].author_reputation, None);
    }

    #[tokio::test]
    async fn test_post_requires_wallet_and_content() {
        let (feed, api) = service(MockSocialApi::default());

        let err = feed.create_post(None, "gm", None).await.unwrap_err();
        assert!(matches!(err, AppError::Wallet(_)));

        let err = feed.create_post(Some(ALICE), "   ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_routes_by_swap() {
        let (feed, api) = service(MockSocialApi::default());

        feed.create_post(Some(ALICE), "gm", None).await.unwrap();
        feed.create_post(Some(ALICE), "aped", Some(&swap(7))).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                "post 0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be gm".to_string(),
                "swap-post 0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be 0x07".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_reactions_require_wallet() {
        let (feed, api) = service(MockSocialApi::default());

        assert!(feed.like(None, "p1").await.is_err());
        assert!(feed.dislike(None, "p1").await.is_err());
        assert!(api.calls().is_empty());

        feed.like(Some(ALICE), "p1").await.unwrap();
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_follow_state_tracks_backend() {
        let (feed, api) = service(MockSocialApi {
            following: vec![user("u2")],
            ..Default::default()
        });

        let mut state = feed.load_profile(ALICE).await.unwrap();
        assert_eq!(state.me.id, "me");
        assert!(state.is_following("u2"));

        feed.follow(&mut state, "u3").await.unwrap();
        assert!(state.is_following("u3"));

        feed.unfollow(&mut state, "u2").await.unwrap();
        assert!(!state.is_following("u2"));

        assert!(api.calls().contains(&"follow u3 me".to_string()));
        assert!(api.calls().contains(&"unfollow u2 me".to_string()));
    }

    #[tokio::test]
    async fn test_failed_follow_leaves_state() {
        let (feed, _) = service(MockSocialApi {
            fail_follow: true,
            ..Default::default()
        });
        let mut state = feed.load_profile(ALICE).await.unwrap();

        assert!(feed.follow(&mut state, "u3").await.is_err());
        assert!(!state.is_following("u3"));
    }

    #[tokio::test]
    async fn test_blank_search_skips_backend() {
        let (feed, api) = service(MockSocialApi::default());

        assert!(feed.search("  ").await.unwrap().is_empty());
        assert!(api.calls().is_empty());

        assert_eq!(feed.search(" moo ").await.unwrap().len(), 1);
        assert_eq!(api.calls(), vec!["search moo".to_string()]);
    }

    #[test]
    fn test_paginate_swaps() {
        let swaps: Vec<RecentSwap> = (0..12).map(swap).collect();

        let first = paginate_swaps(&swaps, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.swaps.len(), 5);

        let last = paginate_swaps(&swaps, 3);
        assert_eq!(last.swaps.len(), 2);
        assert_eq!(last.swaps[0].tx_hash, "0x0a");

        assert_eq!(paginate_swaps(&swaps, 0).page, 1);
        assert_eq!(paginate_swaps(&swaps, 9).page, 3);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate_swaps(&[], 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.swaps.is_empty());
    }
}
