//! `storctl namespace`: inspect, list and create namespaces.

use std::io::Write;

use async_trait::async_trait;
use serde_json::Value;
use storctl_api::reference::validate_name;
use storctl_api::types::NamespaceCreateOptions;
use storctl_api::{Client, Reference};
use tracing::info;

use crate::cli::{NamespaceCmd, NamespaceCreateArgs};
use crate::error::Result;
use crate::inspect::{inspect, list, to_values, InspectSource};

/// Namespaces; addressed by bare name.
pub struct NamespaceSource<'a> {
    client: &'a Client,
}

impl<'a> NamespaceSource<'a> {
    /// Reads through `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> InspectSource for NamespaceSource<'a> {
    fn scoped(&self) -> bool {
        false
    }

    async fn fetch_one(&self, reference: &Reference) -> Result<Value> {
        Ok(serde_json::to_value(self.client.namespace(&reference.name).await?)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>> {
        to_values(self.client.namespace_list().await?)
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("NAME", "name"),
            ("DISPLAY NAME", "displayName"),
            ("DESCRIPTION", "description"),
        ]
    }
}

/// Runs a `namespace` subcommand.
pub async fn run(client: &Client, cmd: &NamespaceCmd, out: &mut dyn Write) -> Result<()> {
    let source = NamespaceSource::new(client);
    match cmd {
        NamespaceCmd::Create(args) => create(client, args, out).await,
        NamespaceCmd::Inspect(args) => inspect(&source, &args.targets, &args.format, out).await,
        NamespaceCmd::Ls(args) => list(&source, args.quiet, args.format.as_deref(), out).await,
    }
}

async fn create(client: &Client, args: &NamespaceCreateArgs, out: &mut dyn Write) -> Result<()> {
    validate_name(&args.name)?;

    let opts = NamespaceCreateOptions {
        name: args.name.clone(),
        display_name: args.display_name.clone().unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        labels: args.labels.iter().cloned().collect(),
    };
    let namespace = client.namespace_create(&opts).await?;
    info!(name = %namespace.name, "namespace created");
    writeln!(out, "{}", namespace.name)?;
    Ok(())
}
