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

use crate::types::error::{Error, InvalidAirflowVersionSnafu};
use crate::types::executor::Executor;
use crate::types::release::{Chart, Release};
use crate::types::values::ChartValues;
use semver::{Comparator, Op, Prerelease, Version, VersionReq};
use snafu::ResultExt;
use std::collections::BTreeMap;

mod rbac;

pub use rbac::SCC_CLUSTER_ROLE;

/// Everything the SCC binding depends on, resolved from the chart values and
/// the release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub rbac_enabled: bool,
    pub create_binding_enabled: bool,
    pub executor: Executor,
    pub multi_namespace_mode: bool,
    pub use_worker_dedicated_service_accounts: bool,
    pub statsd_enabled: bool,
    pub flower_enabled: bool,
    pub default_user_enabled: bool,
    pub cleanup_enabled: bool,
    pub dag_processor_enabled: bool,
    pub airflow_version: String,
    pub release_name: String,
    pub release_namespace: String,
    pub chart_name: String,
    pub chart_version: String,
    pub release_service: String,
    pub extra_labels: BTreeMap<String, String>,
}

impl Snapshot {
    pub fn new(values: &ChartValues, release: &Release, chart: &Chart) -> Result<Self, Error> {
        Ok(Snapshot {
            rbac_enabled: values.rbac.create,
            create_binding_enabled: values.rbac.create_scc_role_binding,
            executor: Executor::parse(&values.executor)?,
            multi_namespace_mode: values.multi_namespace_mode,
            use_worker_dedicated_service_accounts: values
                .workers
                .use_worker_dedicated_service_accounts,
            statsd_enabled: values.statsd.enabled,
            flower_enabled: values.flower.enabled,
            default_user_enabled: values.webserver.default_user.enabled,
            cleanup_enabled: values.cleanup.enabled,
            dag_processor_enabled: values.dag_processor.enabled,
            airflow_version: values.airflow_version.clone(),
            release_name: release.name.clone(),
            release_namespace: release.namespace.clone(),
            chart_name: chart.name.clone(),
            chart_version: chart.version.clone(),
            release_service: release.service.clone(),
            extra_labels: values.labels.clone(),
        })
    }

    /// Both `rbac.create` and `rbac.createSCCRoleBinding` have to be set.
    pub fn binding_enabled(&self) -> bool {
        self.rbac_enabled && self.create_binding_enabled
    }

    pub fn airflow_version(&self) -> Result<Version, Error> {
        let version = self.airflow_version.trim();
        Version::parse(version.strip_prefix('v').unwrap_or(version)).context(
            InvalidAirflowVersionSnafu {
                version: &self.airflow_version,
            },
        )
    }

    /// The triggerer exists from Airflow 2.2.0 on. Pre-releases never match,
    /// as with Helm's `semverCompare ">=2.2.0"`.
    pub fn runs_triggerer(&self) -> Result<bool, Error> {
        Ok(at_least(2, 2, 0).matches(&self.airflow_version()?))
    }
}

fn at_least(major: u64, minor: u64, patch: u64) -> VersionReq {
    VersionReq {
        comparators: vec![Comparator {
            op: Op::GreaterEq,
            major,
            minor: Some(minor),
            patch: Some(patch),
            pre: Prerelease::EMPTY,
        }],
    }
}
