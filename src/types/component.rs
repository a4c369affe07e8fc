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

use strum::{Display, EnumIter};

/// Airflow chart components that run under their own service account.
///
/// The display form is the values key of the component, the suffix is what
/// the chart appends to the release fullname when it creates the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Component {
    #[strum(to_string = "webserver")]
    Webserver,

    #[strum(to_string = "workers")]
    Worker,

    #[strum(to_string = "workers.celery")]
    CeleryWorker,

    #[strum(to_string = "workers.kubernetes")]
    KubernetesWorker,

    #[strum(to_string = "scheduler")]
    Scheduler,

    #[strum(to_string = "statsd")]
    Statsd,

    #[strum(to_string = "flower")]
    Flower,

    #[strum(to_string = "triggerer")]
    Triggerer,

    #[strum(to_string = "migrateDatabaseJob")]
    MigrateDatabaseJob,

    #[strum(to_string = "createUserJob")]
    CreateUserJob,

    #[strum(to_string = "cleanup")]
    Cleanup,

    #[strum(to_string = "dagProcessor")]
    DagProcessor,
}

impl Component {
    pub fn service_account_suffix(self) -> &'static str {
        match self {
            Component::Webserver => "webserver",
            Component::Worker => "worker",
            Component::CeleryWorker => "worker-celery",
            Component::KubernetesWorker => "worker-kubernetes",
            Component::Scheduler => "scheduler",
            Component::Statsd => "statsd",
            Component::Flower => "flower",
            Component::Triggerer => "triggerer",
            Component::MigrateDatabaseJob => "migrate-database-job",
            Component::CreateUserJob => "create-user-job",
            Component::Cleanup => "cleanup",
            Component::DagProcessor => "dag-processor",
        }
    }
}
