//! Snapshot output formatting
//!
//! Renders an [`OrientationSnapshot`] as human-readable text, JSON or CSV.

use crate::api::types::{ApiResult, OrientationSnapshot, OutputFormat};

/// CSV column order produced by [`SnapshotFormatter::csv_row`]
pub const CSV_HEADER: &str = "sample_count,heading_deg,direction,face_rotation_deg,\
target_bearing_deg,target_rotation_deg,target_distance_km,is_loading,heading_known,error";

/// Snapshot formatter
#[derive(Debug, Clone)]
pub struct SnapshotFormatter {
    /// Output format
    pub format: OutputFormat,
    /// Decimal places for bearings and rotations
    pub precision: usize,
}

impl Default for SnapshotFormatter {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: 1,
        }
    }
}

impl SnapshotFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Format according to `self.format`
    pub fn format(&self, snapshot: &OrientationSnapshot) -> ApiResult<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text(snapshot)),
            OutputFormat::CompactText => Ok(self.compact_text(snapshot)),
            OutputFormat::Json => Ok(serde_json::to_string(snapshot)?),
            OutputFormat::PrettyJson => Ok(serde_json::to_string_pretty(snapshot)?),
            OutputFormat::Csv => Ok(self.csv_row(snapshot)),
        }
    }

    /// Multi-line report
    pub fn text(&self, snapshot: &OrientationSnapshot) -> String {
        let p = self.precision;
        let mut output = String::new();

        output.push_str(&format!("Status:          {}\n", status_label(snapshot)));
        if snapshot.heading_known {
            output.push_str(&format!(
                "Heading:         {:.0}° ({})\n",
                snapshot.heading_degrees, snapshot.direction_label
            ));
        } else {
            output.push_str("Heading:         unknown\n");
        }
        output.push_str(&format!("Qibla bearing:   {:.*}°\n", p, snapshot.target_bearing_degrees));
        if let Some(distance) = snapshot.target_distance_km {
            output.push_str(&format!("Distance:        {:.0} km\n", distance));
        }
        output.push_str(&format!("Face rotation:   {:.*}°\n", p, snapshot.face_rotation_degrees));
        output.push_str(&format!("Target rotation: {:.*}°\n", p, snapshot.target_rotation_degrees));

        output
    }

    /// Single-line summary
    pub fn compact_text(&self, snapshot: &OrientationSnapshot) -> String {
        if let Some(error) = &snapshot.error_reason {
            return format!("error: {}", error);
        }
        if snapshot.is_loading {
            return "loading".to_string();
        }

        let p = self.precision;
        let heading = if snapshot.heading_known {
            format!("{:.0}° {}", snapshot.heading_degrees, snapshot.direction_label)
        } else {
            "--".to_string()
        };
        format!(
            "hdg {} | qibla {:.*}° | face {:.*}° | target {:.*}°",
            heading,
            p,
            snapshot.target_bearing_degrees,
            p,
            snapshot.face_rotation_degrees,
            p,
            snapshot.target_rotation_degrees
        )
    }

    /// One CSV row in [`CSV_HEADER`] order
    pub fn csv_row(&self, snapshot: &OrientationSnapshot) -> String {
        let p = self.precision;
        let distance = snapshot
            .target_distance_km
            .map(|d| format!("{:.1}", d))
            .unwrap_or_default();

        format!(
            "{},{:.0},{},{:.*},{:.*},{:.*},{},{},{},{}",
            snapshot.sample_count,
            snapshot.heading_degrees,
            snapshot.direction_label,
            p,
            snapshot.face_rotation_degrees,
            p,
            snapshot.target_bearing_degrees,
            p,
            snapshot.target_rotation_degrees,
            distance,
            snapshot.is_loading,
            snapshot.heading_known,
            snapshot.error_reason.as_deref().unwrap_or("")
        )
    }
}

fn status_label(snapshot: &OrientationSnapshot) -> String {
    match &snapshot.error_reason {
        Some(error) => format!("error ({})", error),
        None if snapshot.is_loading => "loading".to_string(),
        None => "ready".to_string(),
    }
}
