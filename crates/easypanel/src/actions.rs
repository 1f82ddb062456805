//! `actions.*` calls.

use protocol::{
    routes::actions as route, Action, ActionDetail, GetActionParams, ListActionsParams,
    PanelError, TransportExt,
};

use crate::Client;

/// Deployment action history. Obtained from [`Client::actions`].
#[derive(Debug, Clone, Copy)]
pub struct Actions<'a> {
    client: &'a Client,
}

impl<'a> Actions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Actions of one service, newest first.
    pub async fn list(&self, params: &ListActionsParams) -> Result<Vec<Action>, PanelError> {
        self.client.transport().get(&route::LIST, params).await
    }

    /// One action with its log.
    pub async fn get(&self, params: &GetActionParams) -> Result<ActionDetail, PanelError> {
        self.client.transport().get(&route::GET, params).await
    }
}
