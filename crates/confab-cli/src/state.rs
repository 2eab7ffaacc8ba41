//! Application state wiring the backend clients together.
//!
//! The session controller is generic over the repository traits;
//! AppState pins it to the concrete GraphQL client and holds the auth
//! client alongside it.

use confab_core::session::SessionController;
use confab_infra::auth::HttpAuthClient;
use confab_infra::config::{load_config, resolve_data_dir};
use confab_infra::graphql::GraphqlClient;
use confab_infra::token::TokenStore;

/// Concrete controller type pinned to the GraphQL transport.
pub type Controller = SessionController<GraphqlClient, GraphqlClient>;

/// Shared application state for the interactive session.
pub struct AppState {
    pub auth: HttpAuthClient,
    pub controller: Controller,
}

impl AppState {
    /// Initialize the application state: load config, wire clients.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;

        let tokens = TokenStore::new();
        let auth = HttpAuthClient::new(config.auth_url(), tokens.clone());
        let graphql = GraphqlClient::new(config.graphql_url(), tokens);

        // One GraphQL client serves as both repositories.
        let controller = SessionController::new(graphql.clone(), graphql);

        Ok(Self { auth, controller })
    }
}
