//! `domains.*` calls.

use protocol::{
    routes::domains as route, DeleteDomainParams, Domain, ListDomainsParams, PanelError,
    TransportExt,
};

use crate::Client;

/// Domain operations. Obtained from [`Client::domains`].
#[derive(Debug, Clone, Copy)]
pub struct Domains<'a> {
    client: &'a Client,
}

impl<'a> Domains<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Attaches a domain. The returned value carries the assigned id.
    pub async fn create(&self, domain: &Domain) -> Result<Domain, PanelError> {
        self.client.transport().post(&route::CREATE, Some(domain)).await
    }

    /// Replaces the domain with the same id.
    pub async fn update(&self, domain: &Domain) -> Result<(), PanelError> {
        self.client.transport().post_unit(&route::UPDATE, Some(domain)).await
    }

    pub async fn delete(&self, params: &DeleteDomainParams) -> Result<(), PanelError> {
        self.client.transport().post_unit(&route::DELETE, Some(params)).await
    }

    /// Domains routed to one service.
    pub async fn list(&self, params: &ListDomainsParams) -> Result<Vec<Domain>, PanelError> {
        self.client.transport().get(&route::LIST, params).await
    }
}
