//! `storctl rule`.

use async_trait::async_trait;
use serde_json::Value;
use storctl_api::{Client, Reference};

use crate::error::Result;
use crate::inspect::{to_values, InspectSource};

/// Rules; addressed as `namespace/name`.
pub struct RuleSource<'a> {
    client: &'a Client,
}

impl<'a> RuleSource<'a> {
    /// Reads through `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> InspectSource for RuleSource<'a> {
    fn scoped(&self) -> bool {
        true
    }

    async fn fetch_one(&self, reference: &Reference) -> Result<Value> {
        Ok(serde_json::to_value(self.client.rule(reference).await?)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>> {
        to_values(self.client.rule_list().await?)
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("NAMESPACE", "namespace"),
            ("NAME", "name"),
            ("SELECTOR", "selector"),
            ("ACTION", "ruleAction"),
            ("ACTIVE", "active"),
        ]
    }
}
