pub mod index;
pub mod outcome;
pub mod status;
pub mod timing;

pub use index::{RunSummary, SignatureIndex};
pub use outcome::{Diagnostic, Diff, Location, TestOutcome, signature};
pub use status::TestStatus;
pub use timing::{Severity, TimeReading, TimeUnit};
