//! Index Builder
//!
//! Runs the build stages in order: load the catalogue, assemble and stamp the
//! index, then serialize it to disk.

use std::path::PathBuf;
use tracing::info;

use crate::checksum::Checksum;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::loader::{self, LoadOutcome, LoadedSchool, SkippedSchool};
use crate::mapper;
use crate::schema::{SchoolIndex, PROTOCOL_VERSION};
use crate::version::VersionStamp;
use crate::writer::{self, WrittenArtifact};

/// Summary of one completed build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: PathBuf,
    pub bytes: u64,
    pub checksum: Checksum,
    pub version_id: String,
    pub protocol_version: i32,
    pub schools: usize,
    pub adapters: usize,
    pub skipped: Vec<SkippedSchool>,
}

impl BuildReport {
    /// Artifact size in KiB
    pub fn size_kib(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Drives a single build from a configuration
pub struct IndexBuilder {
    config: BuildConfig,
}

impl IndexBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Stage one: read the manifest and adapter files
    pub fn load(&self) -> Result<LoadOutcome> {
        loader::load_catalogue(&self.config)
    }

    /// Stage two: map loaded schools into a freshly stamped index
    pub fn assemble(&self, schools: &[LoadedSchool], stamp: VersionStamp) -> SchoolIndex {
        SchoolIndex {
            protocol_version: PROTOCOL_VERSION,
            version_id: stamp.version_id(),
            schools: schools.iter().map(mapper::map_school).collect(),
        }
    }

    /// Stage three: serialize the index to the configured output
    pub fn write(&self, index: &SchoolIndex) -> Result<WrittenArtifact> {
        writer::write_index(index, &self.config.paths.output)
    }

    /// Run every stage, printing progress to stdout
    pub fn run(&self) -> Result<BuildReport> {
        println!("Target output file: {}", self.config.paths.output.display());

        println!("--- Stage 1: parsing YAML sources ---");
        let outcome = self.load()?;

        println!("\n--- Stage 2: building protobuf message ---");
        let index = self.assemble(&outcome.schools, VersionStamp::now());
        println!("Protobuf protocol version: {}", index.protocol_version);
        println!("Data version ID: {}", index.version_id);

        println!("\n--- Stage 3: serializing and writing to disk ---");
        let artifact = self.write(&index)?;

        let report = BuildReport {
            output: artifact.path,
            bytes: artifact.bytes,
            checksum: artifact.checksum,
            version_id: index.version_id.clone(),
            protocol_version: index.protocol_version,
            schools: index.schools.len(),
            adapters: index.adapter_count(),
            skipped: outcome.skipped,
        };
        info!(
            schools = report.schools,
            adapters = report.adapters,
            skipped = report.skipped.len(),
            version_id = %report.version_id,
            "index built"
        );

        println!("\nBuild succeeded! Binary file saved to: {}", report.output.display());
        println!("File size: {:.2} KB", report.size_kib());
        println!("SHA-256: {}", report.checksum);

        Ok(report)
    }
}
