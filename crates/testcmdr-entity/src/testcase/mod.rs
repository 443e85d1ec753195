//! Test case domain entities.

pub mod model;
pub mod status;
pub mod step;

pub use model::{CreateTestCase, TestCase};
pub use status::{Priority, RunStatus};
pub use step::TestStep;
