mod record_classifier;

pub use record_classifier::{Classification, RecordClassifier};
