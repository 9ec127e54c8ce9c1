//! Resource shapes exchanged with the cluster control plane.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capacity counters reported for nodes and pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapacityStats {
    /// Raw capacity in bytes.
    pub total_capacity_bytes: u64,
    /// Free capacity in bytes.
    pub available_capacity_bytes: u64,
    /// Capacity promised to volumes, which may exceed the total.
    pub provisioned_capacity_bytes: u64,
}

/// A tenancy scope for volumes and rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Namespace {
    /// Server-assigned identifier.
    pub id: String,
    /// Unique name; the scope of volumes and rules.
    pub name: String,
    /// Human-friendly name.
    pub display_name: String,
    /// Free text.
    pub description: String,
    /// Arbitrary key/value labels.
    pub labels: HashMap<String, String>,
    /// Creation time, when the server reports it.
    pub created_at: Option<DateTime<Utc>>,
}

/// A cluster member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    /// Server-assigned identifier.
    pub id: String,
    /// Cluster-unique node name.
    pub name: String,
    /// Advertised address.
    pub address: String,
    /// Port serving the control-plane API.
    pub api_port: u16,
    /// Health as reported by the node.
    pub health: String,
    /// Software version running on the node.
    pub version: String,
    /// Whether the node runs the scheduler.
    pub scheduler: bool,
    /// Arbitrary key/value labels.
    pub labels: HashMap<String, String>,
    /// Storage capacity of the node.
    pub capacity_stats: CapacityStats,
}

/// A group of nodes that volumes are placed on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pool {
    /// Server-assigned identifier.
    pub id: String,
    /// Cluster-unique pool name.
    pub name: String,
    /// Free text.
    pub description: String,
    /// Used when a volume names no pool.
    pub default: bool,
    /// Label selector choosing member nodes.
    pub node_selector: String,
    /// Nodes currently in the pool.
    pub node_names: Vec<String>,
    /// Arbitrary key/value labels.
    pub labels: HashMap<String, String>,
    /// Aggregate capacity of the member nodes.
    pub capacity_stats: CapacityStats,
}

/// Who a policy grants access to, and on what.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicySpec {
    /// User the policy applies to.
    pub user: String,
    /// Group the policy applies to.
    pub group: String,
    /// Restricts access to reads.
    pub readonly: bool,
    /// API group matched; empty matches all.
    pub api_group: String,
    /// Resource kind matched; empty matches all.
    pub resource: String,
    /// Namespace matched; empty matches all.
    pub namespace: String,
    /// Non-resource URL path matched.
    pub non_resource_path: String,
}

/// An access policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Grant details.
    pub spec: PolicySpec,
}

/// A policy together with the id the server keys it by.
///
/// The list endpoint returns a map of id to policy; collection output
/// carries the id inline so it stays addressable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyWithId {
    /// Key of the policy on the server.
    pub id: String,
    /// The policy itself, flattened into the same object.
    #[serde(flatten)]
    pub policy: Policy,
}

/// Server response for the policy collection, keyed by policy id.
pub type PolicyList = BTreeMap<String, Policy>;

/// A label rule applied to matching volumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rule {
    /// Server-assigned identifier.
    pub id: String,
    /// Name, unique within the namespace.
    pub name: String,
    /// Owning namespace.
    pub namespace: String,
    /// Free text.
    pub description: String,
    /// Inactive rules are kept but not applied.
    pub active: bool,
    /// Relative priority among matching rules.
    pub weight: u32,
    /// Operator matching the selector.
    pub operator: String,
    /// Action applied to matching volumes.
    pub rule_action: String,
    /// Label selector picking volumes.
    pub selector: String,
    /// Labels the action applies.
    pub labels: HashMap<String, String>,
}

/// An account on the control plane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Server-assigned identifier, `id` on the wire.
    #[serde(rename = "id")]
    pub uuid: String,
    /// Login name.
    pub username: String,
    /// Group memberships.
    pub groups: Vec<String>,
    /// Either `user` or `admin`.
    pub role: String,
}

/// A provisioned block volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    /// Server-assigned identifier.
    pub id: String,
    /// Name, unique within the namespace.
    pub name: String,
    /// Owning namespace.
    pub namespace: String,
    /// Free text.
    pub description: String,
    /// Provisioned size in GiB.
    pub size: u64,
    /// Pool the volume was placed in.
    pub pool: String,
    /// Filesystem created on the volume.
    pub fs_type: String,
    /// Lifecycle status, e.g. `active`.
    pub status: String,
    /// Replication health.
    pub health: String,
    /// Node holding the primary copy.
    pub master_node: String,
    /// Nodes holding replicas.
    pub replica_nodes: Vec<String>,
    /// Whether the volume is mounted.
    pub mounted: bool,
    /// Consumer holding the mount.
    pub mounted_by: String,
    /// Arbitrary key/value labels.
    pub labels: HashMap<String, String>,
    /// Account that created the volume.
    pub created_by: String,
    /// Creation time, when the server reports it.
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating a namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceCreateOptions {
    /// Name of the new namespace.
    pub name: String,
    /// Omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    /// Omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Omitted when empty.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Request body for creating a volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeCreateOptions {
    /// Name of the new volume.
    pub name: String,
    /// Path component only; not part of the request body.
    #[serde(skip)]
    pub namespace: String,
    /// Size in GiB.
    pub size: u64,
    /// Target pool; the server default when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pool: String,
    /// Filesystem; the server default when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fs_type: String,
    /// Omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Omitted when empty.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Request body for creating a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateOptions {
    /// Login name.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Group memberships.
    pub groups: Vec<String>,
    /// Lowercase role name.
    pub role: String,
}

/// Successful login reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    /// Session token issued by the server.
    pub token: String,
    /// Token expiry, if any.
    pub expires: Option<DateTime<Utc>>,
}

/// Body of a failed API response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    /// Human-readable description.
    pub message: String,
    /// Error-kind tag, when the server sends one.
    pub kind: Option<String>,
}
