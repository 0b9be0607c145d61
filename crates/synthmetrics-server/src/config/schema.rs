use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_core::resource::GroupResource;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceTypeConfig>,

    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }
        if self.resources.is_empty() {
            return Err(MetricsError::BadRequest("resources must not be empty".into()));
        }

        self.server.validate()?;

        let mut seen = HashSet::new();
        for r in &self.resources {
            r.validate()?;
            if !seen.insert((r.group.as_str(), r.resource.as_str())) {
                return Err(MetricsError::BadRequest(format!(
                    "duplicate resource type: {}",
                    r.group_resource()
                )));
            }
        }

        // every name a type answers to must lead back to that type
        let mut aliases: HashMap<(&str, String), &str> = HashMap::new();
        for r in &self.resources {
            for alias in r.aliases() {
                if let Some(owner) = aliases.insert((r.group.as_str(), alias.clone()), r.resource.as_str()) {
                    if owner != r.resource {
                        return Err(MetricsError::BadRequest(format!(
                            "resource name {alias:?} is claimed by both {owner} and {}",
                            r.resource
                        )));
                    }
                }
            }
        }

        let mut identities = HashSet::new();
        for o in &self.objects {
            let gr = GroupResource::parse(&o.resource);
            let ty = self.resource_type_for(&gr).ok_or_else(|| {
                MetricsError::BadRequest(format!("object {} references unknown resource type: {}", o.name, o.resource))
            })?;
            if o.name.is_empty() {
                return Err(MetricsError::BadRequest(format!("{} object name must not be empty", o.resource)));
            }
            match (&o.namespace, ty.namespaced) {
                (None, true) => {
                    return Err(MetricsError::BadRequest(format!(
                        "object {} of namespaced type {} requires a namespace",
                        o.name, o.resource
                    )))
                }
                (Some(_), false) => {
                    return Err(MetricsError::BadRequest(format!(
                        "object {} of cluster-scoped type {} must not set a namespace",
                        o.name, o.resource
                    )))
                }
                (Some(ns), true) if ns.is_empty() => {
                    return Err(MetricsError::BadRequest(format!(
                        "object {} of namespaced type {} has an empty namespace",
                        o.name, o.resource
                    )))
                }
                _ => {}
            }
            if !identities.insert((ty.group_resource(), o.namespace.as_deref(), o.name.as_str())) {
                return Err(MetricsError::BadRequest(format!(
                    "duplicate object: {}/{}/{}",
                    ty.group_resource(),
                    o.namespace.as_deref().unwrap_or_default(),
                    o.name
                )));
            }
        }

        Ok(())
    }

    /// Find the configured type a (possibly aliased) group-resource refers to.
    pub fn resource_type_for(&self, gr: &GroupResource) -> Option<&ResourceTypeConfig> {
        self.resources.iter().find(|r| r.answers_to(gr))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_list_timeout_ms")]
    pub list_timeout_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            list_timeout_ms: default_list_timeout_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.list_timeout_ms) {
            return Err(MetricsError::BadRequest(
                "server.list_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:6443".into()
}
fn default_list_timeout_ms() -> u64 {
    5000
}

/// A resource type known to the static resolver.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceTypeConfig {
    #[serde(default)]
    pub group: String,
    /// Plural, lowercase name (canonical form).
    pub resource: String,
    pub singular: String,
    pub kind: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub namespaced: bool,
    #[serde(default)]
    pub short_names: Vec<String>,
}

impl ResourceTypeConfig {
    pub fn validate(&self) -> Result<()> {
        let ok = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !ok(&self.resource) || !ok(&self.singular) {
            return Err(MetricsError::BadRequest(format!(
                "resource type {}: resource and singular must be lowercase names",
                self.resource
            )));
        }
        if self.kind.is_empty() || self.version.is_empty() {
            return Err(MetricsError::BadRequest(format!(
                "resource type {}: kind and version must not be empty",
                self.resource
            )));
        }
        Ok(())
    }

    pub fn group_resource(&self) -> GroupResource {
        GroupResource::new(self.group.clone(), self.resource.clone())
    }

    /// Lowercase plural, singular, kind and short names, deduplicated.
    pub fn aliases(&self) -> Vec<String> {
        let mut out = vec![
            self.resource.clone(),
            self.singular.clone(),
            self.kind.to_ascii_lowercase(),
        ];
        out.extend(self.short_names.iter().map(|s| s.to_ascii_lowercase()));
        out.sort();
        out.dedup();
        out
    }

    /// Plural, singular, kind and short names all refer to this type (case-insensitive).
    pub fn answers_to(&self, gr: &GroupResource) -> bool {
        if gr.group != self.group {
            return false;
        }
        let name = gr.resource.to_ascii_lowercase();
        self.aliases().contains(&name)
    }
}

fn default_version() -> String {
    "v1".into()
}

fn core_type(resource: &str, singular: &str, kind: &str, namespaced: bool, short: &str) -> ResourceTypeConfig {
    ResourceTypeConfig {
        group: String::new(),
        resource: resource.into(),
        singular: singular.into(),
        kind: kind.into(),
        version: default_version(),
        namespaced,
        short_names: vec![short.into()],
    }
}

fn default_resources() -> Vec<ResourceTypeConfig> {
    vec![
        core_type("pods", "pod", "Pod", true, "po"),
        core_type("services", "service", "Service", true, "svc"),
        core_type("namespaces", "namespace", "Namespace", false, "ns"),
    ]
}

/// A resource instance served by the static lister.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectConfig {
    /// `resource[.group]`, aliases allowed.
    pub resource: String,
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}
