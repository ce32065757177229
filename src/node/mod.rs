//! # Node Module
//!
//! Host-facing node surface: the image tensor type and the resolution suggest node.

pub mod node;
pub mod tensor;

pub use node::{NodeOutput, ResolutionSuggestNode};
pub use tensor::ImageTensor;
