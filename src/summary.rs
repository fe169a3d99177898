//! Per-run label frequency report.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::activity::ActivityLabel;
use crate::emotion::Emotion;
use crate::error::{PipelineError, Result};

/// File name of the report, written next to the output video.
pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// Label counts accumulated over one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub video: String,
    pub total_frames: u64,
    pub frames_processed: u64,
    pub anomalies_detected: u64,
    pub emotions: BTreeMap<Emotion, u64>,
    pub activities: BTreeMap<ActivityLabel, u64>,
}

impl Summary {
    pub fn new(video: impl Into<String>) -> Self {
        Self {
            video: video.into(),
            ..Default::default()
        }
    }

    pub fn record_frame(&mut self) {
        self.frames_processed += 1;
    }

    pub fn record_emotion(&mut self, emotion: Emotion) {
        *self.emotions.entry(emotion).or_default() += 1;
    }

    /// Count an activity; anomalies go to the anomaly counter instead.
    pub fn record_activity(&mut self, activity: ActivityLabel) {
        if activity.is_anomaly() {
            self.record_anomaly();
        } else {
            *self.activities.entry(activity).or_default() += 1;
        }
    }

    pub fn record_anomaly(&mut self) {
        self.anomalies_detected += 1;
    }

    pub fn emotion_count(&self, emotion: Emotion) -> u64 {
        self.emotions.get(&emotion).copied().unwrap_or(0)
    }

    pub fn activity_count(&self, activity: ActivityLabel) -> u64 {
        self.activities.get(&activity).copied().unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as `summary.json` in the directory holding `output_video`.
    pub fn save_beside(&self, output_video: &Path) -> Result<PathBuf> {
        let dir = output_video.parent().unwrap_or_else(|| Path::new(""));
        let path = dir.join(SUMMARY_FILE_NAME);
        self.save(&path)?;
        Ok(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source| PipelineError::SummaryWrite {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_activity_splits_anomalies() {
        let mut summary = Summary::new("clip.mp4");
        summary.record_activity(ActivityLabel::Walking);
        summary.record_activity(ActivityLabel::Walking);
        summary.record_activity(ActivityLabel::Anomaly);
        summary.record_activity(ActivityLabel::Unknown);

        assert_eq!(summary.activity_count(ActivityLabel::Walking), 2);
        assert_eq!(summary.activity_count(ActivityLabel::Unknown), 1);
        assert_eq!(summary.activity_count(ActivityLabel::Anomaly), 0);
        assert_eq!(summary.anomalies_detected, 1);
    }

    #[test]
    fn test_json_shape() {
        let mut summary = Summary::new("clip.mp4");
        summary.total_frames = 3;
        summary.record_frame();
        summary.record_emotion(Emotion::Happy);
        summary.record_emotion(Emotion::Unknown);
        summary.record_activity(ActivityLabel::HandsUp);
        summary.record_activity(ActivityLabel::WritingOrTyping);

        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "video": "clip.mp4",
                "total_frames": 3,
                "frames_processed": 1,
                "anomalies_detected": 0,
                "emotions": {"happy": 1, "unknown": 1},
                "activities": {"hands_up": 1, "writing_or_typing": 1}
            })
        );
    }

    #[test]
    fn test_map_keys_in_label_name_order() {
        let mut summary = Summary::new("clip.mp4");
        for emotion in [Emotion::Unknown, Emotion::Surprise, Emotion::Neutral, Emotion::Angry] {
            summary.record_emotion(emotion);
        }
        for activity in [
            ActivityLabel::WritingOrTyping,
            ActivityLabel::Unknown,
            ActivityLabel::Dancing,
            ActivityLabel::HandsUp,
        ] {
            summary.record_activity(activity);
        }

        let emotions: Vec<&str> = summary.emotions.keys().map(Emotion::as_str).collect();
        assert_eq!(emotions, ["angry", "neutral", "surprise", "unknown"]);
        let activities: Vec<&str> = summary.activities.keys().map(ActivityLabel::as_str).collect();
        assert_eq!(activities, ["dancing", "hands_up", "unknown", "writing_or_typing"]);

        let json = summary.to_json().unwrap();
        let neutral = json.find("\"neutral\"").unwrap();
        let surprise = json.find("\"surprise\"").unwrap();
        assert!(neutral < surprise);
    }

    #[test]
    fn test_save_beside_output_video() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("annotated.mp4");
        let mut summary = Summary::new("input.mp4");
        summary.record_emotion(Emotion::Sad);

        let path = summary.save_beside(&output).unwrap();
        assert_eq!(path, dir.path().join(SUMMARY_FILE_NAME));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["video"], "input.mp4");
        assert_eq!(written["emotions"]["sad"], 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("annotated.mp4");
        let err = Summary::new("input.mp4").save_beside(&output).unwrap_err();
        assert!(matches!(err, PipelineError::SummaryWrite { .. }));
    }
}
