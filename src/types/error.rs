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

use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("invalid airflowVersion '{}': {}", version, source))]
    InvalidAirflowVersion {
        version: String,
        source: semver::Error,
    },

    #[snafu(display("unknown executor '{}'", executor))]
    UnknownExecutor { executor: String },

    #[snafu(display("cannot read values file {}: {}", path.display(), source))]
    ReadValues {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("cannot parse values file {}: {}", path.display(), source))]
    ParseValues {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[snafu(display("invalid values: {}", source))]
    InvalidValues { source: serde_yaml_ng::Error },

    #[snafu(display("invalid override '{}', expected path=value", expr))]
    InvalidOverride { expr: String },

    #[snafu(display("serde_yaml error: {}", source))]
    SerdeYaml { source: serde_yaml_ng::Error },

    #[snafu(display("serde_json error: {}", source))]
    SerdeJson { source: serde_json::Error },
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::SerdeJson { source }
    }
}
