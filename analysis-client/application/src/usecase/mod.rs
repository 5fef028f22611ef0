mod analyze_recording;

pub use analyze_recording::{AnalyzeRecordingUseCase, AnalyzeRecordingUseCaseImpl};
