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

//! Airflow executors understood by the chart

use crate::types::error::{Error, UnknownExecutorSnafu};
use snafu::OptionExt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Task execution backend selected by the `executor` value.
///
/// The set is closed: any other value is rejected when the snapshot is built.
///
/// https://airflow.apache.org/docs/apache-airflow/stable/core-concepts/executor/index.html
#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
pub enum Executor {
    #[strum(to_string = "CeleryExecutor")]
    #[default]
    Celery,

    #[strum(to_string = "LocalKubernetesExecutor")]
    LocalKubernetes,

    #[strum(to_string = "KubernetesExecutor")]
    Kubernetes,

    #[strum(to_string = "CeleryKubernetesExecutor")]
    CeleryKubernetes,

    #[strum(to_string = "SequentialExecutor")]
    Sequential,

    #[strum(to_string = "LocalExecutor")]
    Local,

    #[strum(to_string = "DebugExecutor")]
    Debug,
}

impl Executor {
    pub fn parse(value: &str) -> Result<Self, Error> {
        Executor::from_str(value.trim())
            .ok()
            .context(UnknownExecutorSnafu { executor: value })
    }

    /// Executors that run tasks in worker pods, either Celery workers or
    /// pods launched by the Kubernetes executor.
    pub fn has_workers(self) -> bool {
        matches!(
            self,
            Executor::Celery
                | Executor::LocalKubernetes
                | Executor::Kubernetes
                | Executor::CeleryKubernetes
        )
    }

    /// Flower only monitors Celery queues.
    pub fn runs_flower(self) -> bool {
        matches!(self, Executor::Celery | Executor::CeleryKubernetes)
    }
}
