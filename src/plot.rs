// src/plot.rs
//! 3D trajectory rendering

use std::path::{Path, PathBuf};

use log::{info, warn};
use plotly::{
    color::NamedColor,
    common::{Marker, Mode},
    layout::Axis,
    Layout, Plot, Scatter3D,
};

use crate::gps::{Fix, Track};

/// Fixed name of the rendered artifact.
pub const OUTPUT_FILE: &str = "trajectory_3d.html";

/// Outcome of the render phase.
#[derive(Debug)]
pub enum RenderResult {
    /// Plot built; `output` names the written artifact if one was requested.
    Completed { output: Option<PathBuf> },
    /// The track was empty; there is nothing to draw.
    NothingToRender,
    /// The plot could not be produced or written.
    Failed(String),
}

/// Render the collected track as a 3D trajectory.
///
/// `output` is the artifact path to write, if any; `open_viewer` opens the
/// interactive plot in the default browser. An empty track short-circuits
/// to [`RenderResult::NothingToRender`].
pub fn render_track(track: &Track, output: Option<&Path>, open_viewer: bool) -> RenderResult {
    if track.is_empty() {
        warn!("no data collected, nothing to plot");
        return RenderResult::NothingToRender;
    }

    let fixes = track.snapshot();
    let longitudes: Vec<f64> = fixes.iter().map(|f| f.longitude).collect();
    let latitudes: Vec<f64> = fixes.iter().map(|f| f.latitude).collect();
    let altitudes: Vec<f64> = fixes.iter().map(|f| f.altitude).collect();
    let times: Vec<String> = fixes.iter().map(|f| f.time.clone()).collect();

    let mut plot = Plot::new();
    plot.set_layout(trajectory_layout());
    plot.add_trace(
        Scatter3D::new(longitudes, latitudes, altitudes)
            .mode(Mode::LinesMarkers)
            .name("Trajectory")
            .hover_text_array(times),
    );
    plot.add_trace(endpoint_marker("Start", NamedColor::Green, &fixes[0]));
    plot.add_trace(endpoint_marker(
        "End",
        NamedColor::Red,
        &fixes[fixes.len() - 1],
    ));

    let written = match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, plot.to_html()) {
                return RenderResult::Failed(format!(
                    "failed to write {}: {}",
                    path.display(),
                    e
                ));
            }
            info!("saved {}", path.display());
            Some(path.to_path_buf())
        }
        None => None,
    };

    if open_viewer {
        plot.show();
    }

    RenderResult::Completed { output: written }
}

fn trajectory_layout() -> Layout {
    Layout::new()
        .title("3D GNSS Trajectory")
        .x_axis(Axis::new().title("Longitude [°]").zero_line(false))
        .y_axis(Axis::new().title("Latitude [°]").zero_line(false))
        .z_axis(Axis::new().title("Altitude [m]").zero_line(false))
        .show_legend(true)
        .auto_size(true)
}

fn endpoint_marker(name: &str, color: NamedColor, fix: &Fix) -> Box<Scatter3D<f64, f64, f64>> {
    Scatter3D::new(vec![fix.longitude], vec![fix.latitude], vec![fix.altitude])
        .mode(Mode::Markers)
        .name(name)
        .marker(Marker::new().size(8).color(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::Track;

    fn sample_track(points: usize) -> Track {
        let mut track = Track::new(points);
        for n in 0..points {
            track.append(Fix {
                time: format!("12:35:{:02}", 19 + n),
                latitude: 48.1173 + 0.001 * n as f64,
                longitude: 11.5167 + 0.001 * n as f64,
                altitude: 545.4 + 5.0 * n as f64,
            });
        }
        track
    }

    #[test]
    fn test_empty_track_short_circuits() {
        let track = Track::new(10);
        assert!(matches!(
            render_track(&track, None, false),
            RenderResult::NothingToRender
        ));
    }

    #[test]
    fn test_populated_track_completes_without_artifact() {
        let track = sample_track(3);
        match render_track(&track, None, false) {
            RenderResult::Completed { output: None } => {}
            other => panic!("unexpected render result: {:?}", other),
        }
    }

    #[test]
    fn test_artifact_written_to_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        let track = sample_track(3);

        match render_track(&track, Some(&path), false) {
            RenderResult::Completed {
                output: Some(written),
            } => assert_eq!(written, path),
            other => panic!("unexpected render result: {:?}", other),
        }

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Trajectory"));
    }

    #[test]
    fn test_unwritable_path_is_contained() {
        let track = sample_track(2);
        let path = Path::new("/nonexistent-dir/trajectory_3d.html");
        assert!(matches!(
            render_track(&track, Some(path), false),
            RenderResult::Failed(_)
        ));
    }

    #[test]
    fn test_single_fix_renders() {
        let track = sample_track(1);
        assert!(matches!(
            render_track(&track, None, false),
            RenderResult::Completed { .. }
        ));
    }
}
