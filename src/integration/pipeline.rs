//! Pipeline combining periodic detection, tracking and activity classification.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::activity::{ActivityLabel, JointSnapshot, classify};
use crate::config::PipelineConfig;
use crate::emotion::Emotion;
use crate::error::{PipelineError, Result};
use crate::frame::Frame;
use crate::integration::annotate::{Annotator, BoxAnnotator};
use crate::integration::detector::{FaceEmotionSource, PoseSource};
use crate::integration::face::FaceDetection;
use crate::integration::video::{VideoBackend, VideoSink, VideoSource};
use crate::summary::Summary;
use crate::tracker::{TrackSet, TrackerFactory};

/// Frames between two progress log lines.
const PROGRESS_LOG_EVERY: u64 = 500;

/// What the pipeline does with a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Run face analysis and pose estimation, reseed trackers.
    Detect,
    /// Step the trackers and draw their boxes.
    Track,
}

impl FramePhase {
    /// Detection runs on every `detect_every_n`-th frame, starting at frame 0.
    pub fn for_index(index: u64, detect_every_n: u32) -> Self {
        if index % u64::from(detect_every_n.max(1)) == 0 {
            FramePhase::Detect
        } else {
            FramePhase::Track
        }
    }
}

/// Result of processing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    pub phase: FramePhase,
    /// Activity classified on a detect frame.
    pub activity: Option<ActivityLabel>,
    /// Representative emotion counted on a detect frame.
    pub emotion: Option<Emotion>,
    /// Faces drawn on a track frame.
    pub annotations: usize,
}

/// Annotates a video with face emotions and body activities.
///
/// Face analysis and pose estimation are expensive, so they run only on
/// detection cycles; the frames in between follow the detected faces with
/// lightweight visual trackers.
pub struct Pipeline<D, P, F: TrackerFactory, A = BoxAnnotator> {
    face_source: D,
    pose_source: P,
    tracks: TrackSet<F>,
    annotator: A,
    config: PipelineConfig,
    previous_pose: Option<JointSnapshot>,
}

impl<D, P, F> Pipeline<D, P, F>
where
    D: FaceEmotionSource,
    P: PoseSource,
    F: TrackerFactory,
{
    /// Create a pipeline drawing plain boxes around tracked faces.
    ///
    /// [`BoxAnnotator`] has no font, so the emotion label is not written. Use
    /// [`with_annotator`](Pipeline::with_annotator) with a text-capable
    /// annotator, such as `OpenCvAnnotator` from the `opencv-backend`
    /// feature, to get the box and its label.
    pub fn new(
        face_source: D,
        pose_source: P,
        tracker_factory: F,
        config: PipelineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            face_source,
            pose_source,
            tracks: TrackSet::new(tracker_factory),
            annotator: BoxAnnotator,
            config,
            previous_pose: None,
        })
    }
}

impl<D, P, F, A> Pipeline<D, P, F, A>
where
    D: FaceEmotionSource,
    P: PoseSource,
    F: TrackerFactory,
    A: Annotator,
{
    /// Replace the annotator used on track frames.
    pub fn with_annotator<B: Annotator>(self, annotator: B) -> Pipeline<D, P, F, B> {
        Pipeline {
            face_source: self.face_source,
            pose_source: self.pose_source,
            tracks: self.tracks,
            annotator,
            config: self.config,
            previous_pose: self.previous_pose,
        }
    }

    /// Annotate the video at `input` into `output` and write `summary.json`
    /// next to `output`.
    ///
    /// Fails without writing anything if either stream cannot be opened. The
    /// summary is only written after every frame went through and both
    /// streams have been released.
    pub fn run<B: VideoBackend>(
        &mut self,
        backend: &B,
        input: &Path,
        output: &Path,
    ) -> Result<Summary> {
        let source = backend
            .open_input(input)
            .map_err(|e| PipelineError::InputOpen {
                path: input.to_path_buf(),
                source: e.into(),
            })?;
        let info = source.info();
        let sink = backend
            .open_output(output, &info, self.config.codec)
            .map_err(|e| PipelineError::OutputOpen {
                path: output.to_path_buf(),
                source: e.into(),
            })?;

        let video_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        let summary = self.process(video_name, source, sink)?;

        let path = summary.save_beside(output)?;
        info!("Summary saved to {}", path.display());
        Ok(summary)
    }

    /// Run the frame loop over already opened streams.
    ///
    /// Both streams are dropped before this returns.
    pub fn process<S, K>(
        &mut self,
        video_name: impl Into<String>,
        mut source: S,
        mut sink: K,
    ) -> Result<Summary>
    where
        S: VideoSource,
        K: VideoSink,
    {
        let info = source.info();
        let mut summary = Summary::new(video_name);
        summary.total_frames = info.frame_count.unwrap_or(0);
        self.tracks.reset();
        self.previous_pose = None;

        info!(
            "Processing {}: {}x{} @ {:.2} fps, {} frames, detecting every {} frames",
            summary.video,
            info.width,
            info.height,
            info.fps,
            info.frame_count
                .map_or_else(|| "unknown".to_string(), |n| n.to_string()),
            self.config.detect_every_n
        );

        let mut index: u64 = 0;
        while info.frame_count.is_none_or(|total| index < total) {
            let mut frame = match source.read_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) => {
                    warn!("Frame {} could not be decoded, stopping: {}", index, e);
                    break;
                }
            };

            self.process_frame(index, &mut frame, &mut summary);
            sink.write_frame(&frame).map_err(|e| PipelineError::Encode {
                index,
                source: e.into(),
            })?;
            summary.record_frame();

            index += 1;
            if index % PROGRESS_LOG_EVERY == 0 {
                info!("Processed {}/{} frames", index, summary.total_frames);
            }
        }

        drop(sink);
        drop(source);
        self.tracks.reset();

        if info.frame_count.is_none() {
            summary.total_frames = summary.frames_processed;
        }
        info!(
            "Finished {}: {} frames, {} anomalies",
            summary.video, summary.frames_processed, summary.anomalies_detected
        );
        Ok(summary)
    }

    /// Process the frame at `index`, drawing on it in place when tracking.
    pub fn process_frame(
        &mut self,
        index: u64,
        frame: &mut Frame,
        summary: &mut Summary,
    ) -> FrameOutcome {
        match FramePhase::for_index(index, self.config.detect_every_n) {
            FramePhase::Detect => self.detect(index, frame, summary),
            FramePhase::Track => self.track(frame),
        }
    }

    fn detect(&mut self, index: u64, frame: &Frame, summary: &mut Summary) -> FrameOutcome {
        self.tracks.reset();

        let detections = match self.face_source.analyze(frame) {
            Ok(detections) => detections,
            Err(e) => {
                warn!("Face analysis failed on frame {}, counting as anomaly: {}", index, e);
                summary.record_anomaly();
                Vec::new()
            }
        };

        let width = frame.width() as f32;
        let height = frame.height() as f32;
        let current_pose = match self.pose_source.process(frame) {
            Ok(landmarks) => landmarks.map(|l| JointSnapshot::from_landmarks(&l, width, height)),
            Err(e) => {
                warn!("Pose estimation failed on frame {}: {}", index, e);
                None
            }
        };

        let activity = classify(current_pose.as_ref(), self.previous_pose.as_ref(), height, width);
        summary.record_activity(activity);
        self.previous_pose = current_pose;

        let seeded = self.tracks.seed(frame, &detections);
        let emotion = FaceDetection::representative(&detections);
        summary.record_emotion(emotion);

        debug!(
            "Frame {}: {} faces, {} tracked, emotion={}, activity={}",
            index,
            detections.len(),
            seeded,
            emotion,
            activity
        );

        FrameOutcome {
            phase: FramePhase::Detect,
            activity: Some(activity),
            emotion: Some(emotion),
            annotations: 0,
        }
    }

    fn track(&mut self, frame: &mut Frame) -> FrameOutcome {
        let boxes = self.tracks.advance(frame);
        for (bbox, emotion) in &boxes {
            self.annotator.annotate(frame, bbox, *emotion);
        }
        FrameOutcome {
            phase: FramePhase::Track,
            activity: None,
            emotion: None,
            annotations: boxes.len(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get a reference to the face analyzer.
    pub fn face_source(&self) -> &D {
        &self.face_source
    }

    /// Get a reference to the pose estimator.
    pub fn pose_source(&self) -> &P {
        &self.pose_source
    }

    /// Get a reference to the active track set.
    pub fn tracks(&self) -> &TrackSet<F> {
        &self.tracks
    }
}
