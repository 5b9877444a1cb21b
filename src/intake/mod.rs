pub mod assembler;
pub mod controller;
pub mod latency;
pub mod validation;

pub use assembler::{RecordAssembler, CONFIDENCE_RANGE};
pub use controller::IntakeController;
pub use latency::LatencySimulator;
pub use validation::{FeedbackForm, ValidatedFeedback};
