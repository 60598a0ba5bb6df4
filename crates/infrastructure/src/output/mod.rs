mod sink;

pub use sink::{LogWriter, OutputSink};
