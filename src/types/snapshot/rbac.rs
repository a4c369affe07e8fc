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

use super::Snapshot;
use crate::names::NameResolver;
use crate::types::component::Component;
use crate::types::error::Error;
use k8s_openapi::Resource as _;
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::api::rbac::v1 as rbacv1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use std::collections::BTreeMap;

/// OpenShift cluster role granting the `anyuid` security context constraint
pub const SCC_CLUSTER_ROLE: &str = "system:openshift:scc:anyuid";

impl Snapshot {
    pub fn new_scc_role_binding(
        &self,
        names: &impl NameResolver,
    ) -> Result<rbacv1::RoleBinding, Error> {
        Ok(rbacv1::RoleBinding {
            metadata: metav1::ObjectMeta {
                name: Some(self.scc_role_binding_name(names)),
                namespace: Some(self.release_namespace.clone()),
                labels: Some(self.scc_labels()),
                ..Default::default()
            },
            subjects: Some(self.scc_subjects(names)?),
            role_ref: Self::scc_role_ref(),
        })
    }

    pub fn new_scc_cluster_role_binding(
        &self,
        names: &impl NameResolver,
    ) -> Result<rbacv1::ClusterRoleBinding, Error> {
        Ok(rbacv1::ClusterRoleBinding {
            metadata: metav1::ObjectMeta {
                name: Some(self.scc_role_binding_name(names)),
                labels: Some(self.scc_labels()),
                ..Default::default()
            },
            subjects: Some(self.scc_subjects(names)?),
            role_ref: Self::scc_role_ref(),
        })
    }

    /// Cluster wide bindings are shared by all releases, so their name
    /// carries the release namespace.
    pub fn scc_role_binding_name(&self, names: &impl NameResolver) -> String {
        if self.multi_namespace_mode {
            format!(
                "{}-{}-scc-rolebinding",
                self.release_namespace,
                names.fullname()
            )
        } else {
            format!("{}-scc-rolebinding", names.fullname())
        }
    }

    /// Chart labels, overridden by the user supplied `labels`
    pub fn scc_labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert("tier".to_owned(), "airflow".to_owned());
        labels.insert("release".to_owned(), self.release_name.clone());
        labels.insert(
            "chart".to_owned(),
            format!("{}-{}", self.chart_name, self.chart_version),
        );
        labels.insert("heritage".to_owned(), self.release_service.clone());
        if self.multi_namespace_mode {
            labels.insert("namespace".to_owned(), self.release_namespace.clone());
        }

        labels.extend(self.extra_labels.clone());
        labels
    }

    pub fn scc_role_ref() -> rbacv1::RoleRef {
        rbacv1::RoleRef {
            api_group: rbacv1::ClusterRole::GROUP.to_owned(),
            kind: rbacv1::ClusterRole::KIND.to_owned(),
            name: SCC_CLUSTER_ROLE.to_owned(),
        }
    }

    /// Components whose service accounts are bound, in binding order.
    pub fn scc_components(&self) -> Result<Vec<Component>, Error> {
        let mut components = vec![Component::Webserver];

        if self.executor.has_workers() {
            if self.use_worker_dedicated_service_accounts {
                components.push(Component::CeleryWorker);
                components.push(Component::KubernetesWorker);
            } else {
                components.push(Component::Worker);
            }
        }

        components.push(Component::Scheduler);

        if self.statsd_enabled {
            components.push(Component::Statsd);
        }
        if self.flower_enabled && self.executor.runs_flower() {
            components.push(Component::Flower);
        }
        if self.runs_triggerer()? {
            components.push(Component::Triggerer);
        }

        components.push(Component::MigrateDatabaseJob);

        if self.default_user_enabled {
            components.push(Component::CreateUserJob);
        }
        if self.cleanup_enabled {
            components.push(Component::Cleanup);
        }
        if self.dag_processor_enabled {
            components.push(Component::DagProcessor);
        }

        Ok(components)
    }

    pub fn scc_subjects(
        &self,
        names: &impl NameResolver,
    ) -> Result<Vec<rbacv1::Subject>, Error> {
        Ok(self
            .scc_components()?
            .into_iter()
            .map(|component| rbacv1::Subject {
                kind: corev1::ServiceAccount::KIND.to_owned(),
                name: names.service_account_name(component),
                namespace: Some(self.release_namespace.clone()),
                ..Default::default()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::names::NameResolver;
    use crate::types::component::Component;
    use crate::types::executor::Executor;
    use strum::IntoEnumIterator;

    // Test: RoleBinding structure in single namespace mode
    #[test]
    fn test_new_scc_role_binding_structure() {
        let snapshot = crate::tests::create_test_snapshot();
        let values = crate::tests::create_test_values();
        let names = crate::tests::create_test_names(&values);

        let rb = snapshot.new_scc_role_binding(&names).unwrap();

        assert_eq!(
            rb.metadata.name,
            Some("myrelease-scc-rolebinding".to_string())
        );
        assert_eq!(rb.metadata.namespace, Some("airflow".to_string()));

        assert_eq!(rb.role_ref.api_group, "rbac.authorization.k8s.io");
        assert_eq!(rb.role_ref.kind, "ClusterRole");
        assert_eq!(rb.role_ref.name, "system:openshift:scc:anyuid");

        let subjects = rb.subjects.expect("RoleBinding should have subjects");
        for subject in &subjects {
            assert_eq!(subject.kind, "ServiceAccount");
            assert_eq!(subject.namespace, Some("airflow".to_string()));
            assert_eq!(subject.api_group, None);
        }
    }

    // Test: ClusterRoleBinding carries the namespace in its name, not its metadata
    #[test]
    fn test_new_scc_cluster_role_binding_structure() {
        let mut snapshot = crate::tests::create_test_snapshot();
        snapshot.multi_namespace_mode = true;
        let values = crate::tests::create_test_values();
        let names = crate::tests::create_test_names(&values);

        let crb = snapshot.new_scc_cluster_role_binding(&names).unwrap();

        assert_eq!(
            crb.metadata.name,
            Some("airflow-myrelease-scc-rolebinding".to_string())
        );
        assert_eq!(crb.metadata.namespace, None);

        let labels = crb.metadata.labels.expect("labels should be set");
        assert_eq!(labels.get("namespace"), Some(&"airflow".to_string()));
        assert_eq!(crb.role_ref.name, "system:openshift:scc:anyuid");
    }

    // Test: chart labels
    #[test]
    fn test_scc_labels() {
        let snapshot = crate::tests::create_test_snapshot();
        let labels = snapshot.scc_labels();

        assert_eq!(labels.len(), 4);
        assert_eq!(labels["tier"], "airflow");
        assert_eq!(labels["release"], "myrelease");
        assert_eq!(labels["chart"], "airflow-1.15.0");
        assert_eq!(labels["heritage"], "Helm");
        assert!(!labels.contains_key("namespace"));
    }

    // Test: user labels are merged last and win over chart labels
    #[test]
    fn test_scc_labels_user_override() {
        let mut snapshot = crate::tests::create_test_snapshot();
        snapshot.multi_namespace_mode = true;
        snapshot
            .extra_labels
            .insert("tier".to_owned(), "platform".to_owned());
        snapshot
            .extra_labels
            .insert("namespace".to_owned(), "shared".to_owned());
        snapshot
            .extra_labels
            .insert("team".to_owned(), "data".to_owned());

        let labels = snapshot.scc_labels();

        assert_eq!(labels["tier"], "platform");
        assert_eq!(labels["namespace"], "shared");
        assert_eq!(labels["team"], "data");
        assert_eq!(labels["release"], "myrelease");
    }

    // Test: every component in binding order when all toggles are on
    #[test]
    fn test_scc_components_full_order() {
        let mut snapshot = crate::tests::create_test_snapshot();
        snapshot.executor = Executor::CeleryKubernetes;
        snapshot.use_worker_dedicated_service_accounts = true;
        snapshot.flower_enabled = true;
        snapshot.default_user_enabled = true;
        snapshot.cleanup_enabled = true;
        snapshot.dag_processor_enabled = true;

        assert_eq!(
            snapshot.scc_components().unwrap(),
            vec![
                Component::Webserver,
                Component::CeleryWorker,
                Component::KubernetesWorker,
                Component::Scheduler,
                Component::Statsd,
                Component::Flower,
                Component::Triggerer,
                Component::MigrateDatabaseJob,
                Component::CreateUserJob,
                Component::Cleanup,
                Component::DagProcessor,
            ]
        );
    }

    // Test: the minimal subject list
    #[test]
    fn test_scc_components_minimal() {
        let mut snapshot = crate::tests::create_test_snapshot();
        snapshot.executor = Executor::Sequential;
        snapshot.statsd_enabled = false;
        snapshot.flower_enabled = true;
        snapshot.airflow_version = "2.1.9".to_owned();

        assert_eq!(
            snapshot.scc_components().unwrap(),
            vec![
                Component::Webserver,
                Component::Scheduler,
                Component::MigrateDatabaseJob,
            ]
        );
    }

    // Test: dedicated worker accounts replace the shared one for every worker executor
    #[test]
    fn test_worker_accounts_by_executor() {
        let worker_components = [
            Component::Worker,
            Component::CeleryWorker,
            Component::KubernetesWorker,
        ];

        for executor in Executor::iter() {
            for dedicated in [false, true] {
                let mut snapshot = crate::tests::create_test_snapshot();
                snapshot.executor = executor;
                snapshot.use_worker_dedicated_service_accounts = dedicated;

                let workers: Vec<_> = snapshot
                    .scc_components()
                    .unwrap()
                    .into_iter()
                    .filter(|c| worker_components.contains(c))
                    .collect();

                let expected = match (executor.has_workers(), dedicated) {
                    (false, _) => vec![],
                    (true, false) => vec![Component::Worker],
                    (true, true) => vec![Component::CeleryWorker, Component::KubernetesWorker],
                };
                assert_eq!(workers, expected, "{executor} dedicated={dedicated}");
            }
        }
    }

    // Test: flower needs both the toggle and a Celery executor
    #[test]
    fn test_flower_requires_celery() {
        for executor in Executor::iter() {
            for enabled in [false, true] {
                let mut snapshot = crate::tests::create_test_snapshot();
                snapshot.executor = executor;
                snapshot.flower_enabled = enabled;

                let has_flower = snapshot
                    .scc_components()
                    .unwrap()
                    .contains(&Component::Flower);
                let expected = enabled
                    && matches!(executor, Executor::Celery | Executor::CeleryKubernetes);
                assert_eq!(has_flower, expected, "{executor} enabled={enabled}");
            }
        }
    }

    // Test: triggerer appears from 2.2.0
    #[test]
    fn test_triggerer_version_boundary() {
        let mut snapshot = crate::tests::create_test_snapshot();

        snapshot.airflow_version = "2.1.9".to_owned();
        assert!(!snapshot.scc_components().unwrap().contains(&Component::Triggerer));

        snapshot.airflow_version = "2.2.0".to_owned();
        assert!(snapshot.scc_components().unwrap().contains(&Component::Triggerer));
    }

    // Test: malformed version fails the subject list
    #[test]
    fn test_invalid_version_fails_subjects() {
        let mut snapshot = crate::tests::create_test_snapshot();
        snapshot.airflow_version = "two".to_owned();
        let values = crate::tests::create_test_values();
        let names = crate::tests::create_test_names(&values);

        assert!(snapshot.scc_subjects(&names).is_err());
        assert!(snapshot.new_scc_role_binding(&names).is_err());
    }

    // Test: subject names come from the resolver
    #[test]
    fn test_scc_subjects_use_resolver() {
        struct Fixed;

        impl NameResolver for Fixed {
            fn fullname(&self) -> &str {
                "fixed"
            }

            fn service_account_name(&self, component: Component) -> String {
                format!("sa-{}", component.service_account_suffix())
            }
        }

        let snapshot = crate::tests::create_test_snapshot();
        let subjects: Vec<_> = snapshot
            .scc_subjects(&Fixed)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(
            subjects,
            vec![
                "sa-webserver",
                "sa-worker",
                "sa-scheduler",
                "sa-statsd",
                "sa-triggerer",
                "sa-migrate-database-job",
            ]
        );
        assert_eq!(
            snapshot.scc_role_binding_name(&Fixed),
            "fixed-scc-rolebinding"
        );
    }
}
