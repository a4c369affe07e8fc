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

use crate::names::ChartNames;
use crate::types::error::{ParseValuesSnafu, ReadValuesSnafu};
use crate::types::release::{Chart, Release};
use crate::types::snapshot::Snapshot;
use crate::types::values::{ChartValues, Override};
use clap::ValueEnum;
use snafu::ResultExt;
use std::path::PathBuf;
use std::pin::Pin;
use strum::Display;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub mod assembler;
pub mod names;
pub mod types;


pub use assembler::{SccBinding, assemble};

shadow_rs::shadow!(build);

#[derive(ValueEnum, Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    #[strum(to_string = "yaml")]
    Yaml,

    #[strum(to_string = "json")]
    Json,
}

/// Inputs of a `render` run.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Values files, merged in order over the chart defaults
    pub values_files: Vec<PathBuf>,
    pub overrides: Vec<Override>,
    pub release: Release,
    pub chart: Chart,
    pub format: OutputFormat,
    /// Output path, stdout when unset
    pub file: Option<String>,
}

/// Logs go to stderr so stdout only ever carries the rendered document.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();
}

pub async fn load_values(
    files: &[PathBuf],
    overrides: &[Override],
) -> Result<ChartValues, types::error::Error> {
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let content = tokio::fs::read_to_string(path)
            .await
            .context(ReadValuesSnafu { path })?;
        if content.trim().is_empty() {
            debug!(path = %path.display(), "skipping empty values file");
            continue;
        }

        let document: serde_yaml_ng::Value =
            serde_yaml_ng::from_str(&content).context(ParseValuesSnafu { path })?;
        debug!(path = %path.display(), "loaded values file");
        documents.push(document);
    }

    ChartValues::from_documents(documents, overrides)
}

/// Renders the document for `options`, or nothing when the binding is
/// disabled, and returns the binding that was written.
pub async fn render(
    options: RenderOptions,
) -> Result<Option<SccBinding>, Box<dyn std::error::Error>> {
    let values = load_values(&options.values_files, &options.overrides).await?;
    let snapshot = Snapshot::new(&values, &options.release, &options.chart)?;
    let names = ChartNames::new(&values, &options.release, &options.chart);

    let Some(binding) = assemble(&snapshot, &names)? else {
        info!("rbac.create and rbac.createSCCRoleBinding are not both enabled, nothing to render");
        return Ok(None);
    };

    let document = match options.format {
        OutputFormat::Yaml => binding.to_yaml()?,
        OutputFormat::Json => binding.to_json()? + "\n",
    };

    let mut writer = output_writer(options.file).await?;
    writer.write_all(document.as_bytes()).await?;
    writer.flush().await?;

    info!(
        kind = binding.kind(),
        subjects = binding.subjects().len(),
        format = %options.format,
        "rendered scc role binding"
    );

    Ok(Some(binding))
}

/// Writes the JSON schema of the chart values understood by `render`.
pub async fn schema(file: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(ChartValues);

    let mut writer = output_writer(file).await?;
    writer
        .write_all(serde_json::to_string_pretty(&schema)?.as_bytes())
        .await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    Ok(())
}

async fn output_writer(
    file: Option<String>,
) -> Result<Pin<Box<dyn AsyncWrite + Send>>, std::io::Error> {
    let writer: Pin<Box<dyn AsyncWrite + Send>> = if let Some(file) = file {
        Box::pin(
            tokio::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(file)
                .await?,
        )
    } else {
        Box::pin(tokio::io::stdout())
    };

    Ok(writer)
}
