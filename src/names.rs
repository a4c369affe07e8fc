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

//! Object and service account names of a release

use crate::types::component::Component;
use crate::types::release::{Chart, Release};
use crate::types::values::ChartValues;
use tracing::trace;

/// Kubernetes object names are limited to 63 characters when they are used
/// as label values.
const MAX_NAME_LENGTH: usize = 63;

/// Supplies the names the binding refers to but does not own.
pub trait NameResolver {
    /// Fullname of the release, the prefix of every object it creates
    fn fullname(&self) -> &str;

    fn service_account_name(&self, component: Component) -> String;
}

/// Names following the Airflow chart helpers.
#[derive(Clone, Debug)]
pub struct ChartNames<'a> {
    values: &'a ChartValues,
    fullname: String,
}

impl<'a> ChartNames<'a> {
    pub fn new(values: &'a ChartValues, release: &Release, chart: &Chart) -> Self {
        let fullname = match non_empty(&values.fullname_override) {
            Some(name) => truncate(name),
            None => {
                let name = non_empty(&values.name_override).unwrap_or(&chart.name);
                if release.name.contains(name) {
                    truncate(&release.name)
                } else {
                    truncate(&format!("{}-{}", release.name, name))
                }
            }
        };

        ChartNames { values, fullname }
    }
}

impl NameResolver for ChartNames<'_> {
    fn fullname(&self) -> &str {
        &self.fullname
    }

    fn service_account_name(&self, component: Component) -> String {
        let sa = self.values.service_account(component);
        let name = match (sa.create, non_empty(&sa.name)) {
            (_, Some(name)) => name.to_owned(),
            (true, None) => format!("{}-{}", self.fullname, component.service_account_suffix()),
            (false, None) => "default".to_owned(),
        };
        trace!(%component, service_account = %name, "resolved service account");
        name
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// trunc 63 | trimSuffix "-"
fn truncate(name: &str) -> String {
    let end = name
        .char_indices()
        .nth(MAX_NAME_LENGTH)
        .map_or(name.len(), |(i, _)| i);
    let name = &name[..end];
    name.strip_suffix('-').unwrap_or(name).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(name: &str) -> Release {
        Release {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    // Test: fullname is release-chart unless the release already contains the chart name
    #[test]
    fn test_fullname_from_release() {
        let values = ChartValues::default();

        let names = ChartNames::new(&values, &release("prod"), &Chart::default());
        assert_eq!(names.fullname(), "prod-airflow");

        let names = ChartNames::new(&values, &release("my-airflow"), &Chart::default());
        assert_eq!(names.fullname(), "my-airflow");
    }

    #[test]
    fn test_fullname_overrides() {
        let mut values = ChartValues {
            name_override: Some("af".to_owned()),
            ..Default::default()
        };
        let names = ChartNames::new(&values, &release("prod"), &Chart::default());
        assert_eq!(names.fullname(), "prod-af");

        values.fullname_override = Some("myrelease".to_owned());
        let names = ChartNames::new(&values, &release("prod"), &Chart::default());
        assert_eq!(names.fullname(), "myrelease");

        // empty overrides count as unset
        values.fullname_override = Some(String::new());
        values.name_override = Some(String::new());
        let names = ChartNames::new(&values, &release("prod"), &Chart::default());
        assert_eq!(names.fullname(), "prod-airflow");
    }

    // Test: fullname is cut to 63 characters without a trailing dash
    #[test]
    fn test_fullname_truncated() {
        let values = ChartValues::default();
        let long = format!("{}-x", "a".repeat(62));
        let names = ChartNames::new(&values, &release(&long), &Chart::default());
        assert_eq!(names.fullname(), "a".repeat(62));

        let values = ChartValues {
            fullname_override: Some("b".repeat(80)),
            ..Default::default()
        };
        let names = ChartNames::new(&values, &release("prod"), &Chart::default());
        assert_eq!(names.fullname().len(), 63);
    }

    // Test: service account names follow create/name
    #[test]
    fn test_service_account_names() {
        let mut values = ChartValues {
            fullname_override: Some("myrelease".to_owned()),
            ..Default::default()
        };
        values.scheduler.service_account.name = Some("sched".to_owned());
        values.triggerer.service_account.create = false;
        values.cleanup.service_account.create = false;
        values.cleanup.service_account.name = Some("janitor".to_owned());

        let names = ChartNames::new(&values, &release("prod"), &Chart::default());

        assert_eq!(
            names.service_account_name(Component::Webserver),
            "myrelease-webserver"
        );
        assert_eq!(
            names.service_account_name(Component::CeleryWorker),
            "myrelease-worker-celery"
        );
        assert_eq!(
            names.service_account_name(Component::MigrateDatabaseJob),
            "myrelease-migrate-database-job"
        );
        assert_eq!(names.service_account_name(Component::Scheduler), "sched");
        assert_eq!(names.service_account_name(Component::Triggerer), "default");
        assert_eq!(names.service_account_name(Component::Cleanup), "janitor");
    }
}
