use std::path::{Path, PathBuf};

use log::{debug, info, LevelFilter};
use serde::Serialize;
use serde_json::Value;

use crate::config::AnalysisConfig;
use crate::errors::{RoiError, RoiResult};
use crate::evaluator::{RoiEvaluator, Selection, SelectionCache};
use crate::geometry::Shape;
use crate::grid::VolumeImage;
use crate::io::{read_raw_volume, roi_from_json, to_record, RawVolumeSpec};
use crate::stats::{reduce, StatKind};
use crate::utils::logger::{init_console_logger, Logger};
use crate::utils::mask_preview::save_mask_slice;
use crate::utils::progress::ProgressTracker;

/// One requested statistic, evaluated for every frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatEntry {
    pub statistic: StatKind,
    /// One value per frame; None where the statistic is undefined
    pub values: Vec<Option<f64>>,
}

/// Result of analyzing one image inside one ROI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiReport {
    /// ROI definition in its JSON record form
    pub roi: Value,
    pub voxel_count: usize,
    pub frames: usize,
    pub statistics: Vec<StatEntry>,
}

impl RoiReport {
    /// Per-frame values of one statistic, if it was requested
    pub fn get(&self, kind: StatKind) -> Option<&[Option<f64>]> {
        self.statistics
            .iter()
            .find(|entry| entry.statistic == kind)
            .map(|entry| entry.values.as_slice())
    }

    /// First-frame value of one statistic
    pub fn value(&self, kind: StatKind) -> Option<f64> {
        self.get(kind).and_then(|values| values.first().copied().flatten())
    }

    /// Pretty-printed JSON form of the report
    pub fn to_json(&self) -> RoiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Main interface to the RoiKit library
pub struct RoiKit {
    config: AnalysisConfig,
    evaluator: RoiEvaluator,
}

impl RoiKit {
    /// Create a RoiKit instance with the given settings
    pub fn new(config: AnalysisConfig) -> Self {
        RoiKit {
            config,
            evaluator: RoiEvaluator::new(),
        }
    }

    /// Create a RoiKit instance from a TOML configuration file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// A RoiKit instance or an error if the file cannot be read or parsed
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> RoiResult<Self> {
        Ok(Self::new(AnalysisConfig::from_file(path)?))
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Install the global logger described by the configuration
    ///
    /// Logs go to `log_file` when one is configured, to the console otherwise.
    /// Installing twice is not an error; the first logger stays active.
    pub fn init_logging(&self) -> RoiResult<()> {
        let level: LevelFilter = self.config.level_filter()?;
        match &self.config.log_file {
            Some(log_file) => {
                Logger::init_global_logger(log_file, level)?;
            }
            None => {
                init_console_logger(level);
            }
        }
        Ok(())
    }

    /// Load an ROI from a JSON document or a JSON file path
    pub fn load_roi(&self, input: &str) -> RoiResult<Shape> {
        roi_from_json(input)
    }

    /// Raw volume layout using the configured voxel-center convention
    pub fn volume_spec(&self, voxel_dimensions: [usize; 3], field_of_view: [f64; 3]) -> RawVolumeSpec {
        RawVolumeSpec {
            convention: self.config.convention,
            ..RawVolumeSpec::new(voxel_dimensions, field_of_view)
        }
    }

    /// Load a raw volume file
    pub fn load_volume<P: AsRef<Path>>(&self, path: P, spec: &RawVolumeSpec) -> RoiResult<VolumeImage> {
        read_raw_volume(path, spec)
    }

    /// Voxels of an image's grid inside an ROI
    pub fn select(&self, shape: &Shape, image: &VolumeImage) -> Selection {
        self.evaluator.evaluate_image(shape, image)
    }

    /// Compute the configured statistics of an image inside an ROI
    ///
    /// # Arguments
    /// * `shape` - The ROI
    /// * `image` - Image to analyze; every frame is reduced
    ///
    /// # Returns
    /// A report with one entry per configured statistic
    pub fn analyze(&self, shape: &Shape, image: &VolumeImage) -> RoiResult<RoiReport> {
        info!("Analyzing {} ROI over image {:?}", shape.type_name(), image.geometry().voxel_dimensions());
        let selection = self.select(shape, image);
        self.report(shape, &selection, image)
    }

    /// Analyze many images with one ROI
    ///
    /// Images sharing a grid geometry share one evaluated selection.
    pub fn analyze_batch(&self, shape: &Shape, images: &[VolumeImage]) -> RoiResult<Vec<RoiReport>> {
        info!("Analyzing {} image(s) with a {} ROI", images.len(), shape.type_name());
        let progress = if self.config.show_progress {
            ProgressTracker::new(images.len() as u64, "Analyzing images")
        } else {
            ProgressTracker::hidden(images.len() as u64)
        };

        let mut cache = SelectionCache::new();
        let mut reports = Vec::with_capacity(images.len());
        for image in images {
            let selection = cache.get_or_evaluate(shape, image.geometry());
            reports.push(self.report(shape, &selection, image)?);
            progress.increment(1);
        }
        progress.finish();

        let (hits, misses) = cache.stats();
        debug!("Batch evaluated {} selection(s), reused {} time(s)", misses, hits);
        Ok(reports)
    }

    /// Save one z-slice of an ROI's selection as a PNG preview
    ///
    /// # Returns
    /// The path written, with its extension forced to `.png`
    pub fn save_mask_preview<P: AsRef<Path>>(&self,
                                             shape: &Shape,
                                             image: &VolumeImage,
                                             z: usize,
                                             output_path: P) -> RoiResult<PathBuf> {
        let selection = self.select(shape, image);
        save_mask_slice(&selection, z, output_path)
    }

    fn report(&self, shape: &Shape, selection: &Selection, image: &VolumeImage) -> RoiResult<RoiReport> {
        let frame_values = selection.frame_values(image)?;

        let mut statistics = Vec::with_capacity(self.config.statistics.len());
        for &kind in &self.config.statistics {
            let values = frame_values
                .iter()
                .map(|values| match reduce(values, kind) {
                    Ok(value) => Ok(Some(value)),
                    Err(RoiError::EmptyInput(_)) => Ok(None),
                    Err(e) => Err(e),
                })
                .collect::<RoiResult<Vec<_>>>()?;
            statistics.push(StatEntry {
                statistic: kind,
                values,
            });
        }

        Ok(RoiReport {
            roi: to_record(shape),
            voxel_count: selection.len(),
            frames: image.frames(),
            statistics,
        })
    }
}

impl Default for RoiKit {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point3, Sphere};
    use ndarray::{Array, ArrayD, IxDyn};

    fn quiet_kit(statistics: &str) -> RoiKit {
        let config = AnalysisConfig::from_toml_str(&format!(
            "statistics = {}\nshow_progress = false\n",
            statistics
        ))
        .unwrap();
        RoiKit::new(config)
    }

    #[test]
    fn test_report_follows_configured_statistics() {
        let kit = quiet_kit("[\"max\", \"sum\"]");
        let data = Array::from_shape_fn(IxDyn(&[3, 3, 3]), |ix| (ix[0] + ix[1] + ix[2]) as f64);
        let image = VolumeImage::new([3, 3, 3], [3.0, 3.0, 3.0], data).unwrap();
        let sphere: Shape = Sphere::new(1.0, Point3::origin()).unwrap().into();

        let report = kit.analyze(&sphere, &image).unwrap();
        assert_eq!(report.voxel_count, 7);
        assert_eq!(report.statistics.len(), 2);
        assert_eq!(report.statistics[0].statistic, StatKind::Max);
        // center is 3, its six neighbours are 2 or 4
        assert_eq!(report.value(StatKind::Sum), Some(21.0));
        assert_eq!(report.value(StatKind::Max), Some(4.0));
        assert_eq!(report.get(StatKind::Mean), None);
    }

    #[test]
    fn test_empty_roi_reports_none() {
        let kit = quiet_kit("[\"sum\", \"mean\"]");
        let image = VolumeImage::new([4, 4, 4], [4.0, 4.0, 4.0], ArrayD::ones(IxDyn(&[4, 4, 4]))).unwrap();
        let far: Shape = Sphere::new(1.0, Point3::new(50.0, 0.0, 0.0)).unwrap().into();

        let report = kit.analyze(&far, &image).unwrap();
        assert_eq!(report.voxel_count, 0);
        assert_eq!(report.value(StatKind::Sum), Some(0.0));
        assert_eq!(report.get(StatKind::Mean), Some(&[None][..]));

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["statistics"][1]["statistic"], "mean");
        assert!(json["statistics"][1]["values"][0].is_null());
        assert_eq!(json["roi"]["type"], "sphere");
    }

    #[test]
    fn test_batch_over_frames_and_images() {
        let kit = quiet_kit("[\"mean\"]");
        let sphere: Shape = Sphere::new(1.0, Point3::origin()).unwrap().into();
        let images: Vec<VolumeImage> = (1..=3)
            .map(|scale| {
                let data = Array::from_shape_fn(IxDyn(&[3, 3, 3, 2]), |ix| (scale * (ix[3] + 1)) as f64);
                VolumeImage::new([3, 3, 3], [3.0, 3.0, 3.0], data).unwrap()
            })
            .collect();

        let reports = kit.analyze_batch(&sphere, &images).unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].frames, 2);
        assert_eq!(reports[2].get(StatKind::Mean), Some(&[Some(3.0), Some(6.0)][..]));
    }

    #[test]
    fn test_volume_spec_uses_configured_convention() {
        let config = AnalysisConfig::from_toml_str("convention = \"corner\"").unwrap();
        let kit = RoiKit::new(config);
        let spec = kit.volume_spec([8, 8, 4], [8.0, 8.0, 4.0]);
        assert_eq!(spec.convention, crate::grid::GridConvention::Corner);
        assert_eq!(spec.frames, 1);
    }
}
