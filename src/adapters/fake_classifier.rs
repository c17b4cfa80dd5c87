//! Stand-in image classifier.
//!
//! Answers yes/no at random from a seeded generator, so a replay with the
//! same seed reproduces the same decisions.  Used wherever a real vision
//! backend is not wired in.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::{ClassifierError, Image, ImageClassifier};

pub struct FakeImageClassifier {
    rng: StdRng,
}

impl FakeImageClassifier {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ImageClassifier for FakeImageClassifier {
    fn contains_trigger(&mut self, image: &Image, confidence_threshold: f32) -> Result<bool, ClassifierError> {
        if image.is_empty() {
            return Err(ClassifierError::UnusableImage);
        }
        // Confidence is drawn uniformly; a higher threshold means fewer hits.
        let confidence: f32 = self.rng.gen_range(0.0..100.0);
        let detected = confidence >= confidence_threshold;
        debug!(
            "fake classifier: {} bytes, confidence {confidence:.1}% vs {confidence_threshold:.1}% -> {detected}",
            image.len()
        );
        Ok(detected)
    }
}
