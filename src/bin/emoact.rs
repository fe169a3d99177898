use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use emoact_rs::integration::opencv_backend::{
    DEFAULT_INPUT_SIDE, DEFAULT_MIN_SCORE, DnnPoseEstimator, OpenCvAnnotator, OpenCvFaceAnalyzer,
    OpenCvTrackerFactory, OpenCvVideo,
};
use emoact_rs::{FaceBackend, FourCc, NoPose, Pipeline, PipelineConfig, PoseSource, TrackerKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "emoact", about = "Annotate a video with facial emotions and body activities")]
struct Args {
    /// Video to annotate
    #[arg(default_value = "input_video.mp4")]
    input: PathBuf,
    /// Annotated video; summary.json is written next to it
    #[arg(default_value = "output_video.mp4")]
    output: PathBuf,
    /// Run detection on every N-th frame and track in between
    #[arg(long, default_value_t = 10)]
    detect_every: u32,
    #[arg(long, default_value_t = FaceBackend::Yunet)]
    detector_backend: FaceBackend,
    /// YuNet ONNX model or Haar cascade XML, matching --detector-backend
    #[arg(long, value_name = "PATH", default_value = "models/face_detection_yunet_2023mar.onnx")]
    face_model: PathBuf,
    /// ONNX facial expression classifier; faces are labelled unknown without it
    #[arg(long, value_name = "PATH")]
    emotion_model: Option<PathBuf>,
    /// ONNX keypoint model; activities are unknown without it
    #[arg(long, value_name = "PATH")]
    pose_model: Option<PathBuf>,
    /// Square input side the pose model expects
    #[arg(long, default_value_t = DEFAULT_INPUT_SIDE)]
    pose_input_size: i32,
    /// Keypoints scoring below this are treated as not visible
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pose_min_score: f32,
    #[arg(long, default_value_t = FourCc::MP4V)]
    codec: FourCc,
    #[arg(long, default_value_t = TrackerKind::Csrt)]
    tracker: TrackerKind,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut faces = OpenCvFaceAnalyzer::new(args.detector_backend, &args.face_model)
        .with_context(|| format!("Failed to load face model {}", args.face_model.display()))?;
    match &args.emotion_model {
        Some(path) => {
            faces = faces
                .with_emotion_model(path)
                .with_context(|| format!("Failed to load emotion model {}", path.display()))?;
        }
        None => warn!("No emotion model given, every face will be labelled unknown"),
    }

    match &args.pose_model {
        Some(path) => {
            let pose = DnnPoseEstimator::new(path)
                .with_context(|| format!("Failed to load pose model {}", path.display()))?
                .with_input_side(args.pose_input_size)
                .with_min_score(args.pose_min_score);
            run(&args, faces, pose)
        }
        None => {
            warn!("No pose model given, every activity will be unknown");
            run(&args, faces, NoPose)
        }
    }
}

fn run<P: PoseSource>(args: &Args, faces: OpenCvFaceAnalyzer, pose: P) -> Result<()> {
    let config = PipelineConfig {
        detect_every_n: args.detect_every,
        codec: args.codec,
    };
    let mut pipeline = Pipeline::new(faces, pose, OpenCvTrackerFactory::new(args.tracker), config)
        .context("Invalid pipeline configuration")?
        .with_annotator(OpenCvAnnotator);

    let summary = pipeline
        .run(&OpenCvVideo, &args.input, &args.output)
        .with_context(|| format!("Failed to annotate {}", args.input.display()))?;

    info!(
        "Done: {} frames, {} anomalies, annotated video at {}",
        summary.frames_processed,
        summary.anomalies_detected,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["emoact"]).unwrap();
        assert_eq!(args.input, PathBuf::from("input_video.mp4"));
        assert_eq!(args.output, PathBuf::from("output_video.mp4"));
        assert_eq!(args.detect_every, 10);
        assert_eq!(args.tracker, TrackerKind::Csrt);
        assert_eq!(args.pose_input_size, DEFAULT_INPUT_SIDE);
        assert_eq!(args.pose_min_score, DEFAULT_MIN_SCORE);
        assert!(args.pose_model.is_none());
    }

    #[test]
    fn test_pose_options() {
        let args = Args::try_parse_from([
            "emoact",
            "clip.mp4",
            "out/clip.mp4",
            "--pose-model",
            "movenet.onnx",
            "--pose-input-size",
            "256",
            "--pose-min-score",
            "0.3",
            "--tracker",
            "kcf",
        ])
        .unwrap();
        assert_eq!(args.pose_model, Some(PathBuf::from("movenet.onnx")));
        assert_eq!(args.pose_input_size, 256);
        assert_eq!(args.pose_min_score, 0.3);
        assert_eq!(args.tracker, TrackerKind::Kcf);
    }

    #[test]
    fn test_rejects_bad_codec() {
        assert!(Args::try_parse_from(["emoact", "--codec", "h264x"]).is_err());
    }
}
