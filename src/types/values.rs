// Copyright 2025 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Chart values consumed by the SCC binding
//!
//! The model mirrors the keys of the Airflow chart `values.yaml` that the
//! binding depends on. Keys it does not know are ignored, so a complete chart
//! values file loads as is.

use crate::types::component::Component;
use crate::types::error::{Error, InvalidOverrideSnafu, InvalidValuesSnafu};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};
use snafu::{OptionExt, ResultExt, ensure};
use std::collections::BTreeMap;

pub const DEFAULT_AIRFLOW_VERSION: &str = "2.9.3";

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartValues {
    /// Replaces the generated release fullname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname_override: Option<String>,

    /// Replaces the chart name when the fullname is generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_override: Option<String>,

    /// Airflow version deployed by the chart, as a semantic version
    pub airflow_version: String,

    /// Airflow executor, e.g. CeleryExecutor or KubernetesExecutor
    pub executor: String,

    /// Bind cluster wide so Airflow can launch pods in other namespaces
    pub multi_namespace_mode: bool,

    /// Labels added to every object of the release
    pub labels: BTreeMap<String, String>,

    pub rbac: RbacValues,
    pub webserver: WebserverValues,
    pub workers: WorkersValues,
    pub scheduler: ComponentValues,
    pub statsd: OptionalComponentValues,
    pub flower: OptionalComponentValues,
    pub triggerer: ComponentValues,
    pub migrate_database_job: ComponentValues,
    pub create_user_job: ComponentValues,
    pub cleanup: OptionalComponentValues,
    pub dag_processor: OptionalComponentValues,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RbacValues {
    pub create: bool,

    /// Grant the `anyuid` SCC to the Airflow service accounts (OpenShift)
    #[serde(rename = "createSCCRoleBinding")]
    pub create_scc_role_binding: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceAccountValues {
    /// Whether the chart creates the service account
    pub create: bool,

    /// Name of the service account, generated from the fullname when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentValues {
    pub service_account: ServiceAccountValues,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionalComponentValues {
    pub enabled: bool,
    pub service_account: ServiceAccountValues,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WebserverValues {
    pub service_account: ServiceAccountValues,
    pub default_user: DefaultUserValues,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultUserValues {
    /// Create the initial admin user with a job
    pub enabled: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkersValues {
    /// Use separate service accounts for Celery workers and Kubernetes
    /// executor pods instead of the shared worker account
    pub use_worker_dedicated_service_accounts: bool,
    pub service_account: ServiceAccountValues,
    pub celery: ComponentValues,
    pub kubernetes: ComponentValues,
}

impl Default for ServiceAccountValues {
    fn default() -> Self {
        ServiceAccountValues {
            create: true,
            name: None,
        }
    }
}

impl Default for RbacValues {
    fn default() -> Self {
        RbacValues {
            create: true,
            create_scc_role_binding: false,
        }
    }
}

impl Default for DefaultUserValues {
    fn default() -> Self {
        DefaultUserValues { enabled: true }
    }
}

impl Default for ChartValues {
    fn default() -> Self {
        ChartValues {
            fullname_override: None,
            name_override: None,
            airflow_version: DEFAULT_AIRFLOW_VERSION.to_owned(),
            executor: "CeleryExecutor".to_owned(),
            multi_namespace_mode: false,
            labels: BTreeMap::new(),
            rbac: RbacValues::default(),
            webserver: WebserverValues::default(),
            workers: WorkersValues::default(),
            scheduler: ComponentValues::default(),
            statsd: OptionalComponentValues {
                enabled: true,
                ..Default::default()
            },
            flower: OptionalComponentValues::default(),
            triggerer: ComponentValues::default(),
            migrate_database_job: ComponentValues::default(),
            create_user_job: ComponentValues::default(),
            cleanup: OptionalComponentValues::default(),
            dag_processor: OptionalComponentValues::default(),
        }
    }
}

impl ChartValues {
    /// Layers the given documents over the chart defaults, later documents
    /// winning, then applies the `--set` style overrides.
    pub fn from_documents<I>(documents: I, overrides: &[Override]) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut merged =
            serde_yaml_ng::to_value(ChartValues::default()).context(InvalidValuesSnafu)?;
        for document in documents {
            merge(&mut merged, document);
        }
        for o in overrides {
            o.apply(&mut merged);
        }

        serde_yaml_ng::from_value(merged).context(InvalidValuesSnafu)
    }

    pub fn service_account(&self, component: Component) -> &ServiceAccountValues {
        match component {
            Component::Webserver => &self.webserver.service_account,
            Component::Worker => &self.workers.service_account,
            Component::CeleryWorker => &self.workers.celery.service_account,
            Component::KubernetesWorker => &self.workers.kubernetes.service_account,
            Component::Scheduler => &self.scheduler.service_account,
            Component::Statsd => &self.statsd.service_account,
            Component::Flower => &self.flower.service_account,
            Component::Triggerer => &self.triggerer.service_account,
            Component::MigrateDatabaseJob => &self.migrate_database_job.service_account,
            Component::CreateUserJob => &self.create_user_job.service_account,
            Component::Cleanup => &self.cleanup.service_account,
            Component::DagProcessor => &self.dag_processor.service_account,
        }
    }
}

/// Deep merges `overlay` into `base` the way Helm layers values files:
/// mappings merge key by key, any other value replaces, and `null` removes
/// the key from `base`.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                if value.is_null() {
                    base.remove(&key);
                    continue;
                }
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// A single `path.to.key=value` assignment given on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Override {
    path: Vec<String>,
    value: Value,
}

impl Override {
    /// Parses `a.b.c=value`, reading the value as a YAML scalar so `true`
    /// and `3` keep their types.
    pub fn parse(expr: &str) -> Result<Self, Error> {
        let (path, raw) = Self::split(expr)?;
        let value = serde_yaml_ng::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_owned()));
        let value = match value {
            // an empty right hand side is an empty string, not null
            Value::Null if raw.trim().is_empty() => Value::String(String::new()),
            Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => {
                Value::String(raw.to_owned())
            }
            v => v,
        };
        Ok(Override { path, value })
    }

    /// Parses `a.b.c=value` keeping the value as a string.
    pub fn parse_string(expr: &str) -> Result<Self, Error> {
        let (path, raw) = Self::split(expr)?;
        Ok(Override {
            path,
            value: Value::String(raw.to_owned()),
        })
    }

    fn split(expr: &str) -> Result<(Vec<String>, &str), Error> {
        let (path, raw) = expr
            .split_once('=')
            .context(InvalidOverrideSnafu { expr })?;
        let path: Vec<String> = path.trim().split('.').map(str::to_owned).collect();
        ensure!(
            path.iter().all(|segment| !segment.is_empty()),
            InvalidOverrideSnafu { expr }
        );
        Ok((path, raw))
    }

    fn apply(&self, root: &mut Value) {
        let mut node = root;
        for segment in &self.path {
            if !node.is_mapping() {
                *node = Value::Mapping(Mapping::new());
            }
            node = match node {
                Value::Mapping(map) => map
                    .entry(Value::String(segment.clone()))
                    .or_insert(Value::Null),
                other => other,
            };
        }
        *node = self.value.clone();
    }
}
