pub mod types_test;
pub mod codec_test;
pub mod reconstruct_test;
pub mod resource_test;
