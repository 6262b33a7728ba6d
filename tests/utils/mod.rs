pub mod setup;

#[allow(unused_imports)]
pub use setup::{TestApp, TestAppBuilder, TEST_SECRET};
