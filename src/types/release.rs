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

pub const DEFAULT_RELEASE_NAME: &str = "release-name";
pub const DEFAULT_RELEASE_NAMESPACE: &str = "default";
pub const DEFAULT_RELEASE_SERVICE: &str = "Helm";
pub const DEFAULT_CHART_NAME: &str = "airflow";
pub const DEFAULT_CHART_VERSION: &str = "1.15.0";

/// The release the binding is rendered for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub namespace: String,
    /// Tool managing the release, rendered as the `heritage` label
    pub service: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chart {
    pub name: String,
    pub version: String,
}

impl Default for Release {
    fn default() -> Self {
        Release {
            name: DEFAULT_RELEASE_NAME.to_owned(),
            namespace: DEFAULT_RELEASE_NAMESPACE.to_owned(),
            service: DEFAULT_RELEASE_SERVICE.to_owned(),
        }
    }
}

impl Default for Chart {
    fn default() -> Self {
        Chart {
            name: DEFAULT_CHART_NAME.to_owned(),
            version: DEFAULT_CHART_VERSION.to_owned(),
        }
    }
}
