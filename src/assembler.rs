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

//! Assembly of the SCC binding document

use crate::names::NameResolver;
use crate::types::error::{Error, SerdeYamlSnafu};
use crate::types::snapshot::Snapshot;
use k8s_openapi::Resource as _;
use k8s_openapi::api::rbac::v1 as rbacv1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use serde::Serialize;
use snafu::ResultExt;
use tracing::debug;

/// The rendered binding: namespaced unless the chart runs in multi-namespace
/// mode. Serializes as the bare Kubernetes object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SccBinding {
    Namespaced(rbacv1::RoleBinding),
    Cluster(rbacv1::ClusterRoleBinding),
}

impl SccBinding {
    pub fn kind(&self) -> &'static str {
        match self {
            SccBinding::Namespaced(_) => rbacv1::RoleBinding::KIND,
            SccBinding::Cluster(_) => rbacv1::ClusterRoleBinding::KIND,
        }
    }

    pub fn metadata(&self) -> &metav1::ObjectMeta {
        match self {
            SccBinding::Namespaced(rb) => &rb.metadata,
            SccBinding::Cluster(crb) => &crb.metadata,
        }
    }

    pub fn role_ref(&self) -> &rbacv1::RoleRef {
        match self {
            SccBinding::Namespaced(rb) => &rb.role_ref,
            SccBinding::Cluster(crb) => &crb.role_ref,
        }
    }

    pub fn subjects(&self) -> &[rbacv1::Subject] {
        let subjects = match self {
            SccBinding::Namespaced(rb) => &rb.subjects,
            SccBinding::Cluster(crb) => &crb.subjects,
        };
        subjects.as_deref().unwrap_or_default()
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml_ng::to_string(self).context(SerdeYamlSnafu)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the SCC binding for `snapshot`.
///
/// Returns `Ok(None)` when RBAC or the SCC binding is switched off. The Airflow
/// version is only checked once the binding is enabled.
pub fn assemble(
    snapshot: &Snapshot,
    names: &impl NameResolver,
) -> Result<Option<SccBinding>, Error> {
    if !snapshot.binding_enabled() {
        debug!(
            rbac = snapshot.rbac_enabled,
            create_scc_role_binding = snapshot.create_binding_enabled,
            "scc role binding disabled"
        );
        return Ok(None);
    }

    let binding = if snapshot.multi_namespace_mode {
        SccBinding::Cluster(snapshot.new_scc_cluster_role_binding(names)?)
    } else {
        SccBinding::Namespaced(snapshot.new_scc_role_binding(names)?)
    };

    debug!(
        kind = binding.kind(),
        binding = ?binding.metadata().name,
        subjects = binding.subjects().len(),
        executor = %snapshot.executor,
        "assembled scc role binding"
    );

    Ok(Some(binding))
}
