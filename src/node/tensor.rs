//! Batch-height-width-channel image tensor as handed over by node hosts.

use std::sync::Arc;

use image::DynamicImage;

use crate::error::{PlannerError, PlannerResult};

/// Image batch in `[batch, height, width, channels]` layout with `f32` samples in 0..1.
///
/// The planner only reads the shape; the sample buffer is shared and passed through.
#[derive(Clone, Debug)]
pub struct ImageTensor {
    pub shape: [usize; 4],
    pub data: Arc<Vec<f32>>,
}

impl ImageTensor {
    /// Wrap an existing buffer, checking it matches the shape.
    pub fn new(shape: [usize; 4], data: Arc<Vec<f32>>) -> PlannerResult<Self> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(PlannerError::invalid_size(shape[2], shape[1]).with_context(format!(
                "buffer holds {} samples, shape {:?} needs {}",
                data.len(),
                shape,
                expected
            )));
        }
        Ok(Self { shape, data })
    }

    /// Shape-only tensor; useful for hosts that planned before decoding pixels.
    pub fn empty(height: usize, width: usize) -> Self {
        Self {
            shape: [1, height, width, 3],
            data: Arc::new(Vec::new()),
        }
    }

    /// Convert a decoded image to a single-image RGB batch.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb32f();
        let (w, h) = rgb.dimensions();
        Self {
            shape: [1, h as usize, w as usize, 3],
            data: Arc::new(rgb.into_raw()),
        }
    }

    pub fn batch(&self) -> usize {
        self.shape[0]
    }

    pub fn height(&self) -> usize {
        self.shape[1]
    }

    pub fn width(&self) -> usize {
        self.shape[2]
    }

    pub fn channels(&self) -> usize {
        self.shape[3]
    }
}
