//! `storctl volume`: inspect, list and create volumes.

use std::io::Write;

use async_trait::async_trait;
use serde_json::Value;
use storctl_api::types::VolumeCreateOptions;
use storctl_api::{Client, Reference};
use tracing::info;

use crate::cli::{VolumeCmd, VolumeCreateArgs};
use crate::error::Result;
use crate::inspect::{inspect, list, to_values, InspectSource};
use crate::reference::{parse_reference, DEFAULT_NAMESPACE};

/// Volumes are addressed as `namespace/name`; a bare name lands in the
/// default namespace.
pub struct VolumeSource<'a> {
    client: &'a Client,
}

impl<'a> VolumeSource<'a> {
    /// Reads through `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> InspectSource for VolumeSource<'a> {
    fn scoped(&self) -> bool {
        true
    }

    async fn fetch_one(&self, reference: &Reference) -> Result<Value> {
        Ok(serde_json::to_value(self.client.volume(reference).await?)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>> {
        to_values(self.client.volume_list().await?)
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("NAMESPACE", "namespace"),
            ("NAME", "name"),
            ("SIZE", "size"),
            ("STATUS", "status"),
            ("MOUNTED BY", "mountedBy"),
        ]
    }
}

/// Runs a `volume` subcommand.
pub async fn run(client: &Client, cmd: &VolumeCmd, out: &mut dyn Write) -> Result<()> {
    let source = VolumeSource::new(client);
    match cmd {
        VolumeCmd::Create(args) => create(client, args, out).await,
        VolumeCmd::Inspect(args) => inspect(&source, &args.targets, &args.format, out).await,
        VolumeCmd::Ls(args) => list(&source, args.quiet, args.format.as_deref(), out).await,
    }
}

async fn create(client: &Client, args: &VolumeCreateArgs, out: &mut dyn Write) -> Result<()> {
    let reference = parse_reference(&args.reference, true, DEFAULT_NAMESPACE)?;

    let opts = VolumeCreateOptions {
        name: reference.name,
        namespace: reference.namespace,
        size: args.size,
        pool: args.pool.clone().unwrap_or_default(),
        fs_type: args.fs_type.clone().unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        labels: args.labels.iter().cloned().collect(),
    };
    let volume = client.volume_create(&opts).await?;
    info!(namespace = %volume.namespace, name = %volume.name, size = volume.size, "volume created");
    writeln!(out, "{}/{}", volume.namespace, volume.name)?;
    Ok(())
}
