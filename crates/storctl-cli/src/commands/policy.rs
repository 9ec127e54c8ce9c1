//! `storctl policy`.

use async_trait::async_trait;
use serde_json::Value;
use storctl_api::types::PolicyWithId;
use storctl_api::{Client, Reference};

use crate::error::Result;
use crate::inspect::{to_values, InspectSource};

/// Access policies, addressed by id.
///
/// The server keys the collection by id and leaves it out of each body, so
/// both single and collection results are re-wrapped as [`PolicyWithId`].
pub struct PolicySource<'a> {
    client: &'a Client,
}

impl<'a> PolicySource<'a> {
    /// Reads through `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> InspectSource for PolicySource<'a> {
    fn scoped(&self) -> bool {
        false
    }

    async fn fetch_one(&self, reference: &Reference) -> Result<Value> {
        let policy = self.client.policy(&reference.name).await?;
        Ok(serde_json::to_value(PolicyWithId {
            id: reference.name.clone(),
            policy,
        })?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>> {
        let policies = self.client.policy_list().await?;
        to_values(
            policies
                .into_iter()
                .map(|(id, policy)| PolicyWithId { id, policy })
                .collect(),
        )
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("ID", "id"),
            ("USER", "spec.user"),
            ("GROUP", "spec.group"),
            ("NAMESPACE", "spec.namespace"),
            ("READONLY", "spec.readonly"),
        ]
    }

    fn display_ref(&self, item: &Value) -> String {
        item.get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}
