//! `storctl node`.

use async_trait::async_trait;
use serde_json::Value;
use storctl_api::{Client, Reference};

use crate::error::Result;
use crate::inspect::{to_values, InspectSource};

/// Cluster nodes; addressed by bare name.
pub struct NodeSource<'a> {
    client: &'a Client,
}

impl<'a> NodeSource<'a> {
    /// Reads through `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> InspectSource for NodeSource<'a> {
    fn scoped(&self) -> bool {
        false
    }

    async fn fetch_one(&self, reference: &Reference) -> Result<Value> {
        Ok(serde_json::to_value(self.client.node(&reference.name).await?)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>> {
        to_values(self.client.node_list().await?)
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("NAME", "name"),
            ("ADDRESS", "address"),
            ("HEALTH", "health"),
            ("SCHEDULER", "scheduler"),
            ("VERSION", "version"),
        ]
    }
}
