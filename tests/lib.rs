/// Main test module that includes all sub-modules
/// Run specific tests with `cargo test <module>::<submodule>`
/// For example: `cargo test integration::pipeline_test`
// Utility modules
pub mod utils;

// Algorithm tests
pub mod algorithm {
    pub mod comparison_test;
    pub mod distribution_test;
}

// Integration tests
pub mod integration {
    pub mod loader_test;
    pub mod pipeline_test;
}
