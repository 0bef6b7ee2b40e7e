//! Local OSRM dataset preparation: Geofabrik download + docker preprocessing.
//!
//! Only needed when running against a self-hosted OSRM instead of Google.
//! Neither the planner nor the server call into this module; it backs the
//! docker-based OSRM integration tests and one-off dataset preparation.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::info;

pub const OSRM_IMAGE: &str = "osrm/osrm-backend";

/// Extract covering the default service area.
pub const DEFAULT_REGION: &str = "south-america/brazil/sudeste";

#[derive(Debug, Clone)]
pub struct GeofabrikRegion {
    /// Geofabrik region path, e.g. "south-america/brazil/sudeste".
    pub path: String,
}

impl Default for GeofabrikRegion {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl GeofabrikRegion {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> &str {
        self.path
            .rsplit('/')
            .find(|part| !part.is_empty())
            .unwrap_or("region")
    }

    pub fn url(&self) -> String {
        format!("https://download.geofabrik.de/{}-latest.osm.pbf", self.path)
    }
}

#[derive(Debug, Clone)]
pub struct OsrmDatasetConfig {
    pub region: GeofabrikRegion,
    pub data_root: PathBuf,
}

impl OsrmDatasetConfig {
    pub fn new(region: GeofabrikRegion, data_root: impl Into<PathBuf>) -> Self {
        Self {
            region,
            data_root: data_root.into(),
        }
    }
}

/// Paths of a prepared (MLD) dataset.
#[derive(Debug, Clone)]
pub struct OsrmDataset {
    pub data_dir: PathBuf,
    pub osrm_base: PathBuf,
    pub pbf_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum OsrmDataError {
    #[error("dataset io failed: {0}")]
    Io(#[from] io::Error),
    #[error("extract download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    ProcessFailure(String),
}

impl OsrmDataset {
    /// Downloads and preprocesses the region unless already present.
    pub fn ensure(config: &OsrmDatasetConfig) -> Result<Self, OsrmDataError> {
        let region_name = config.region.name();
        let data_root = if config.data_root.is_absolute() {
            config.data_root.clone()
        } else {
            std::env::current_dir()?.join(&config.data_root)
        };
        let data_dir = data_root.join(region_name);
        fs::create_dir_all(&data_dir)?;

        let pbf_path = data_dir.join(format!("{region_name}-latest.osm.pbf"));
        if !pbf_path.exists() {
            info!(url = %config.region.url(), "downloading OSM extract");
            download_pbf(&config.region.url(), &pbf_path)?;
        }

        let osrm_base = data_dir.join(format!("{region_name}-latest.osrm"));
        if !osrm_base.exists() {
            run_docker(
                &["osrm-extract", "-p", "/opt/car.lua", &container_path(&pbf_path)],
                &data_dir,
            )?;
        }

        if !mld_ready(&osrm_base) {
            run_docker(&["osrm-partition", &container_path(&osrm_base)], &data_dir)?;
            run_docker(&["osrm-customize", &container_path(&osrm_base)], &data_dir)?;
        }

        Ok(Self {
            data_dir,
            osrm_base,
            pbf_path,
        })
    }

    /// `/data/<file>` path of the prepared graph inside the container.
    pub fn container_graph(&self) -> String {
        container_path(&self.osrm_base)
    }
}

fn download_pbf(url: &str, dest: &Path) -> Result<(), OsrmDataError> {
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    response.copy_to(&mut writer)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

fn mld_ready(osrm_base: &Path) -> bool {
    ["osrm.partition", "osrm.mldgr", "osrm.cells"]
        .iter()
        .all(|ext| osrm_base.with_extension(ext).exists())
        && osrm_base.exists()
}

fn run_docker(args: &[&str], data_dir: &Path) -> Result<(), OsrmDataError> {
    info!(?args, "running OSRM preprocessing step");
    let status = Command::new("docker")
        .arg("run")
        .arg("--rm")
        .arg("-t")
        .arg("-v")
        .arg(format!("{}:/data", data_dir.display()))
        .arg(OSRM_IMAGE)
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OsrmDataError::ProcessFailure(format!(
            "docker exited with status {}",
            status
        )))
    }
}

fn container_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    format!("/data/{file_name}")
}
