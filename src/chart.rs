use std::{
    fs,
    path::{Path, PathBuf},
};

use hsl::HSL;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontTransform;

use crate::{
    align::SeriesPair,
    error::{Error, Result},
};

/// The default caption for the chart
const CAPTION: &str = "CPU vs GPU";

/// The default path where the chart will be saved
const PATH: &str = "plot.png";

/// Configuration structure for the chart, including caption, axis label, path, width, and height
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub caption: String,
    pub y_desc: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ChartConfig {
    /// Builder pattern for configuring the chart
    pub fn builder() -> ChartConfigBuilder {
        ChartConfigBuilder::default()
    }
}

impl Default for ChartConfig {
    /// Default implementation for ChartConfig with preset values
    fn default() -> Self {
        ChartConfig {
            caption: CAPTION.to_string(),
            y_desc: String::new(),
            path: PathBuf::from(PATH),
            width: 1200,
            height: 600,
        }
    }
}

/// Builder pattern for `ChartConfig` struct to allow flexible configuration
#[derive(Default)]
pub struct ChartConfigBuilder {
    caption: Option<String>,
    y_desc: Option<String>,
    path: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
}

impl ChartConfigBuilder {
    /// Set the caption for the chart
    pub fn caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }

    /// Set the y axis description
    pub fn y_desc(mut self, y_desc: &str) -> Self {
        self.y_desc = Some(y_desc.to_string());
        self
    }

    /// Set the path where the chart will be saved
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the width of the chart
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height of the chart
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Build and return the final `ChartConfig`
    pub fn build(self) -> ChartConfig {
        let defaults = ChartConfig::default();
        ChartConfig {
            caption: self.caption.unwrap_or(defaults.caption),
            y_desc: self.y_desc.unwrap_or(defaults.y_desc),
            path: self.path.unwrap_or(defaults.path),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
        }
    }
}

/// Legend stroke for GPU series, relative to the legend anchor.
const GPU_LEGEND_LINE: [(i32, i32); 2] = [(-10, 0), (10, 0)];

/// Legend dashes for CPU series, split around the marker.
const CPU_LEGEND_DASHES: [[(i32, i32); 2]; 2] = [[(-10, 0), (-5, 0)], [(5, 0), (10, 0)]];

/// Legend marker size in pixels.
const LEGEND_MARKER: i32 = 4;

/// One colour per test, hues spread evenly around the wheel.
pub fn test_colors(count: usize) -> Vec<RGBColor> {
    (0..count)
        .map(|i| {
            let hue = i as f64 * 360.0 / count.max(1) as f64;
            let (r, g, b) = HSL {
                h: hue,
                s: 0.7,
                l: 0.45,
            }
            .to_rgb();
            RGBColor(r, g, b)
        })
        .collect()
}

/// Top of the y axis: 10% above the largest value, or 1 when everything is 0.
pub fn y_upper_bound(pairs: &[SeriesPair]) -> f64 {
    let max = pairs
        .iter()
        .flat_map(|p| p.gpu.values.iter().chain(p.cpu.values.iter()))
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Draw one line per test and device over the model axis and save it as a PNG.
///
/// GPU series are solid with circle markers, CPU series dashed with cross
/// markers; both share the test's colour. The destination directory is
/// created if needed.
///
/// # Arguments
/// * `models` - Category labels for the x axis, in plotting order
/// * `pairs` - Aligned GPU/CPU series, each `models.len()` long
/// * `config` - Caption, axis label, output path, and size
pub fn plot_comparison(models: &[String], pairs: &[SeriesPair], config: &ChartConfig) -> Result<()> {
    if models.is_empty() {
        return Err(Error::EmptyAxis);
    }
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    draw_comparison(models, pairs, config).map_err(|e| Error::render(&config.path, e))
}

fn draw_comparison(
    models: &[String],
    pairs: &[SeriesPair],
    config: &ChartConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(&config.path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let n = models.len() as i32;
    let label_for = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => models.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.caption, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(140)
        .y_label_area_size(80)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..y_upper_bound(pairs))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(models.len())
        .x_label_formatter(&label_for)
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_desc(config.y_desc.as_str())
        .draw()?;

    let colors = test_colors(pairs.len());
    for (pair, color) in pairs.iter().zip(colors) {
        let gpu: Vec<(SegmentValue<i32>, f64)> = points(&pair.gpu.values);
        let cpu: Vec<(SegmentValue<i32>, f64)> = points(&pair.cpu.values);

        chart
            .draw_series(LineSeries::new(gpu, color.stroke_width(2)).point_size(4))?
            .label(format!("{} GPU", pair.test_name))
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(GPU_LEGEND_LINE.to_vec(), color.stroke_width(2))
                    + Circle::new((0, 0), LEGEND_MARKER, color.filled())
            });

        chart
            .draw_series(DashedLineSeries::new(
                cpu.clone(),
                8,
                4,
                color.stroke_width(2),
            ))?
            .label(format!("{} CPU", pair.test_name))
            .legend(move |(x, y)| {
                let [left, right] = CPU_LEGEND_DASHES;
                EmptyElement::at((x, y))
                    + PathElement::new(left.to_vec(), color.stroke_width(2))
                    + PathElement::new(right.to_vec(), color.stroke_width(2))
                    + Cross::new((0, 0), LEGEND_MARKER, color.stroke_width(2))
            });
        chart.draw_series(
            cpu.into_iter()
                .map(|point| Cross::new(point, 4, color.stroke_width(2))),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    // Save the chart to file
    root.present()?;
    Ok(())
}

fn points(values: &[f64]) -> Vec<(SegmentValue<i32>, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (SegmentValue::CenterOf(i as i32), *v))
        .collect()
}
