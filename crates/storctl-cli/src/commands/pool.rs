//! `storctl pool`.

use async_trait::async_trait;
use serde_json::Value;
use storctl_api::{Client, Reference};

use crate::error::Result;
use crate::inspect::{to_values, InspectSource};

/// Capacity pools; addressed by bare name.
pub struct PoolSource<'a> {
    client: &'a Client,
}

impl<'a> PoolSource<'a> {
    /// Reads through `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> InspectSource for PoolSource<'a> {
    fn scoped(&self) -> bool {
        false
    }

    async fn fetch_one(&self, reference: &Reference) -> Result<Value> {
        Ok(serde_json::to_value(self.client.pool(&reference.name).await?)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>> {
        to_values(self.client.pool_list().await?)
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("NAME", "name"),
            ("DEFAULT", "default"),
            ("NODES", "nodeNames"),
            ("TOTAL", "capacityStats.totalCapacityBytes"),
            ("AVAILABLE", "capacityStats.availableCapacityBytes"),
        ]
    }
}
