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

use clap::{Parser, Subcommand};
use scc_binding::build;
use scc_binding::types::release::{
    Chart, DEFAULT_CHART_NAME, DEFAULT_CHART_VERSION, DEFAULT_RELEASE_NAME,
    DEFAULT_RELEASE_NAMESPACE, DEFAULT_RELEASE_SERVICE, Release,
};
use scc_binding::types::values::Override;
use scc_binding::{OutputFormat, RenderOptions};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "scc-binding")]
#[command(version = build::PKG_VERSION)]
#[command(about = "Airflow chart OpenShift SCC RoleBinding renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the SCC RoleBinding from chart values
    Render {
        /// Values files, later files take precedence
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set a value, e.g. rbac.createSCCRoleBinding=true
        #[arg(long, value_parser = Override::parse)]
        set: Vec<Override>,

        /// Set a value that is always kept as a string
        #[arg(long, value_parser = Override::parse_string)]
        set_string: Vec<Override>,

        #[arg(long, default_value = DEFAULT_RELEASE_NAME)]
        release_name: String,

        /// Namespace of the release
        #[arg(short, long, default_value = DEFAULT_RELEASE_NAMESPACE)]
        namespace: String,

        #[arg(long, default_value = DEFAULT_RELEASE_SERVICE)]
        release_service: String,

        #[arg(long, default_value = DEFAULT_CHART_NAME)]
        chart_name: String,

        #[arg(long, default_value = DEFAULT_CHART_VERSION)]
        chart_version: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Optional output path. If not set, the output will be written to stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Output the JSON schema of the chart values
    Schema {
        /// Optional output path. If not set, the output will be written to stdout.
        #[arg(short, long)]
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    scc_binding::init_tracing();
    debug!(
        version = build::PKG_VERSION,
        commit = build::SHORT_COMMIT,
        built = build::BUILD_TIME,
        "starting scc-binding"
    );

    match cli.command {
        Commands::Render {
            values,
            set,
            set_string,
            release_name,
            namespace,
            release_service,
            chart_name,
            chart_version,
            format,
            output,
        } => {
            let options = RenderOptions {
                values_files: values,
                overrides: set.into_iter().chain(set_string).collect(),
                release: Release {
                    name: release_name,
                    namespace,
                    service: release_service,
                },
                chart: Chart {
                    name: chart_name,
                    version: chart_version,
                },
                format,
                file: output,
            };
            scc_binding::render(options).await?;
        }
        Commands::Schema { file } => scc_binding::schema(file).await?,
    }

    Ok(())
}
