use crate::export::ExportFilter;
use crate::io::read_json_file;
use crate::resolver::ResolverParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: OutputConfig,
    #[serde(default, alias = "writeAllPoints")]
    pub write_all_points: bool,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl RunConfig {
    pub fn export_filter(&self) -> ExportFilter {
        ExportFilter {
            all_points: self.write_all_points,
            municipality: self.municipality.clone(),
        }
    }

    /// Output paths joined onto the output directory.
    pub fn report_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.result_json)
    }

    pub fn points_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.points_json)
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
    #[serde(default = "default_result_json")]
    pub result_json: PathBuf,
    #[serde(default = "default_points_json")]
    pub points_json: PathBuf,
}

fn default_result_json() -> PathBuf {
    PathBuf::from("report.json")
}

fn default_points_json() -> PathBuf {
    PathBuf::from("points.json")
}

/// Optional overrides of [`ResolverParams`].
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    pub absolute_tolerance: Option<f64>,
    pub angle_tolerance_deg: Option<f64>,
    pub lenient_fallback: Option<bool>,
}

impl ResolverConfig {
    pub fn resolve(&self) -> ResolverParams {
        let defaults = ResolverParams::default();
        ResolverParams {
            absolute_tolerance: self.absolute_tolerance.unwrap_or(defaults.absolute_tolerance),
            angle_tolerance_deg: self.angle_tolerance_deg.unwrap_or(defaults.angle_tolerance_deg),
            lenient_fallback: self.lenient_fallback.unwrap_or(defaults.lenient_fallback),
        }
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    read_json_file(path).map_err(|e| format!("Invalid config: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let json = r#"{"input": "net.json", "output": {"dir": "out"}}"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert!(!config.write_all_points);
        assert_eq!(config.report_path(), PathBuf::from("out/report.json"));
        assert_eq!(config.points_path(), PathBuf::from("out/points.json"));

        let params = config.resolver.resolve();
        assert_eq!(params.absolute_tolerance, 20.0);
        assert_eq!(params.angle_tolerance_deg, 0.01);
        assert!(params.lenient_fallback);
    }

    #[test]
    fn overrides_and_export_flags() {
        let json = r#"{
            "input": "net.json",
            "output": {"dir": "out", "points_json": "net_points.json"},
            "writeAllPoints": true,
            "municipality": "Dorf",
            "resolver": {"absolute_tolerance": 5.0, "lenient_fallback": false}
        }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        let filter = config.export_filter();
        assert!(filter.all_points);
        assert_eq!(filter.municipality.as_deref(), Some("Dorf"));
        assert_eq!(config.points_path(), PathBuf::from("out/net_points.json"));

        let params = config.resolver.resolve();
        assert_eq!(params.absolute_tolerance, 5.0);
        assert_eq!(params.angle_tolerance_deg, 0.01);
        assert!(!params.lenient_fallback);
    }
}
