//! # Users API Client

use super::client::ApiClient;
use crate::core::error::Result;
use shared::dto::users::User;

impl ApiClient {
    /// Profile registered for a wallet address
    pub async fn get_user_by_wallet(&self, wallet: &str) -> Result<User> {
        let url = self.segment_url(&["users", "wallet", wallet])?;
        let response = ApiClient::send(self.client.get(url)).await?;
        ApiClient::parse_json(response).await
    }

    /// Users whose name or wallet matches `query`
    pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let url = self.url("/users/search");
        let response = ApiClient::send(self.client.get(&url).query(&[("query", query)])).await?;
        let users: Option<Vec<User>> = ApiClient::parse_json(response).await?;
        Ok(users.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::client::DEFAULT_TIMEOUT;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_user_by_wallet() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/wallet/0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "u1",
                "username": "moo",
                "wallet": "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), DEFAULT_TIMEOUT);
        let user = client
            .get_user_by_wallet("0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")
            .await
            .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.display_name(), "moo");
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/search"))
            .and(query_param("query", "moo cow"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "_id": "u2", "username": "moo cow" }])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), DEFAULT_TIMEOUT);
        let users = client.search_users("moo cow").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u2");
    }

    #[tokio::test]
    async fn test_search_null_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), DEFAULT_TIMEOUT);
        assert!(client.search_users("x").await.unwrap().is_empty());
    }
}
