//! Eigenface training and nearest-neighbour recognition.

use crate::math::eigen::{PowerIteration, PowerIterationConfig};
use crate::math::linalg::{deflate, ColumnVector, Matrix};
use crate::types::RecognitionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Eigenvalues below this fraction of the largest are treated as noise.
const NEGLIGIBLE_EIGENVALUE: f64 = 1e-8;

/// Configuration for [`EigenfaceModel::train`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenfaceConfig {
    /// Settings for the inner power iteration.
    pub power_iteration: PowerIterationConfig,
    /// Seed for the random power-iteration start vector.
    pub seed: u64,
}

impl Default for EigenfaceConfig {
    fn default() -> Self {
        Self {
            power_iteration: PowerIterationConfig::default(),
            seed: 0x5eed,
        }
    }
}

impl EigenfaceConfig {
    /// Create a configuration.
    pub fn new(power_iteration: PowerIterationConfig, seed: u64) -> Self {
        Self {
            power_iteration,
            seed,
        }
    }
}

/// Result of [`EigenfaceModel::recognize`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    /// Index of the nearest training image.
    pub index: usize,
    /// Euclidean distance between the weight vectors.
    pub distance: f64,
}

/// A trained eigenface basis with the training set's weights.
///
/// Training uses the small-matrix trick: for `n` images of `p` pixels the
/// eigenvectors `v` of the `n × n` matrix `L = AᵗA` give the eigenfaces
/// `u = A·v / ‖A·v‖`, avoiding the `p × p` covariance.
///
/// # Example
///
/// ```
/// use numeric_core::math::linalg::ColumnVector;
/// use numeric_core::recognition::{EigenfaceConfig, EigenfaceModel};
///
/// let faces: Vec<ColumnVector> = [
///     [255u8, 0, 0, 0],
///     [0, 255, 0, 0],
///     [0, 0, 255, 0],
/// ]
/// .iter()
/// .map(|p| ColumnVector::from_pixels(p))
/// .collect();
///
/// let model = EigenfaceModel::train(&faces, 2, &EigenfaceConfig::default()).unwrap();
/// let query = ColumnVector::from_pixels(&[10u8, 240, 5, 0]);
/// assert_eq!(model.recognize(&query).unwrap().index, 1);
/// ```
#[derive(Debug, Clone)]
pub struct EigenfaceModel {
    mean: ColumnVector,
    eigenfaces: Vec<ColumnVector>,
    eigenvalues: Vec<f64>,
    weights: Vec<Vec<f64>>,
}

impl EigenfaceModel {
    /// Train on `images` (flattened, equal length), keeping at most
    /// `components` eigenfaces.
    ///
    /// Fewer eigenfaces are kept when the centered images span fewer
    /// dimensions: extraction stops at the first component with a
    /// negligible eigenvalue or a zero-norm eigenface.
    ///
    /// # Errors
    ///
    /// - [`RecognitionError::EmptyTrainingSet`] if `images` is empty
    /// - [`RecognitionError::ImageSizeMismatch`] if lengths differ
    /// - [`RecognitionError::InvalidComponentCount`] if `components` is zero
    ///   or exceeds the number of images
    pub fn train(
        images: &[ColumnVector],
        components: usize,
        config: &EigenfaceConfig,
    ) -> Result<Self, RecognitionError> {
        let first = images.first().ok_or(RecognitionError::EmptyTrainingSet)?;
        let pixels = first.len();
        if let Some(bad) = images.iter().find(|img| img.len() != pixels) {
            return Err(RecognitionError::ImageSizeMismatch {
                expected: pixels,
                got: bad.len(),
            });
        }
        let n = images.len();
        if components == 0 || components > n {
            return Err(RecognitionError::InvalidComponentCount {
                requested: components,
                available: n,
            });
        }

        let mut sum = ColumnVector::zeros(pixels);
        for image in images {
            sum = sum.add(image)?;
        }
        let mean = sum.scale(1.0 / n as f64);

        let centered = images
            .iter()
            .map(|image| image.subtract(&mean))
            .collect::<Result<Vec<_>, _>>()?;
        let a = Matrix::from_columns(&centered)?;
        let l = a.transpose().multiply(&a)?;

        let solver = PowerIteration::new(config.power_iteration);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut remaining = l;
        let mut eigenfaces = Vec::with_capacity(components);
        let mut eigenvalues: Vec<f64> = Vec::with_capacity(components);

        for component in 0..components {
            // Fresh start per component so repeated eigenvalues are all found.
            // A constant vector would lie in the null space of L.
            let start: ColumnVector = (0..n).map(|_| rng.gen_range(0.5..1.5)).collect();
            let pair = solver.dominant(&remaining, &start)?;

            let leading = eigenvalues.first().copied().unwrap_or(pair.eigenvalue);
            if pair.eigenvalue <= NEGLIGIBLE_EIGENVALUE * leading {
                debug!(component, eigenvalue = pair.eigenvalue, "negligible component");
                break;
            }

            let face = a.mul_vector(&pair.eigenvector)?;
            let norm = face.euclidean_norm();
            if norm == 0.0 {
                debug!(component, "zero-norm eigenface");
                break;
            }
            if !pair.converged {
                warn!(
                    component,
                    iterations = pair.iterations,
                    "eigenface did not converge"
                );
            }

            remaining = deflate(&remaining, &pair.eigenvector, pair.eigenvalue)?;
            eigenfaces.push(face.scale(1.0 / norm));
            eigenvalues.push(pair.eigenvalue);
        }

        let weights = centered
            .iter()
            .map(|phi| weights_in(&eigenfaces, phi))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            images = n,
            pixels,
            components = eigenfaces.len(),
            "eigenface model trained"
        );
        Ok(Self {
            mean,
            eigenfaces,
            eigenvalues,
            weights,
        })
    }

    /// Weights of `image` in the eigenface basis.
    ///
    /// # Errors
    ///
    /// [`RecognitionError::ImageSizeMismatch`] if `image` has the wrong length.
    pub fn project(&self, image: &ColumnVector) -> Result<Vec<f64>, RecognitionError> {
        self.check_size(image)?;
        let phi = image.subtract(&self.mean)?;
        weights_in(&self.eigenfaces, &phi)
    }

    /// Nearest training image to `image` in weight space.
    ///
    /// # Errors
    ///
    /// [`RecognitionError::ImageSizeMismatch`] if `image` has the wrong length.
    pub fn recognize(&self, image: &ColumnVector) -> Result<Match, RecognitionError> {
        let w = self.project(image)?;

        let mut best = Match {
            index: 0,
            distance: f64::INFINITY,
        };
        for (index, known) in self.weights.iter().enumerate() {
            let distance = known
                .iter()
                .zip(&w)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            if distance < best.distance {
                best = Match { index, distance };
            }
        }
        Ok(best)
    }

    /// Approximate `image` from its projection: `mean + Σ w_k u_k`.
    pub fn reconstruct(&self, image: &ColumnVector) -> Result<ColumnVector, RecognitionError> {
        let w = self.project(image)?;
        let mut out = self.mean.clone();
        for (weight, face) in w.iter().zip(&self.eigenfaces) {
            out = out.add(&face.scale(*weight))?;
        }
        Ok(out)
    }

    /// Mean training image.
    pub fn mean(&self) -> &ColumnVector {
        &self.mean
    }

    /// Unit-norm eigenfaces, strongest first.
    pub fn eigenfaces(&self) -> &[ColumnVector] {
        &self.eigenfaces
    }

    /// Eigenvalues of `AᵗA` for each eigenface.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Weights of each training image.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Number of eigenfaces kept.
    pub fn components(&self) -> usize {
        self.eigenfaces.len()
    }

    /// Pixels per image.
    pub fn pixel_count(&self) -> usize {
        self.mean.len()
    }

    fn check_size(&self, image: &ColumnVector) -> Result<(), RecognitionError> {
        if image.len() != self.pixel_count() {
            return Err(RecognitionError::ImageSizeMismatch {
                expected: self.pixel_count(),
                got: image.len(),
            });
        }
        Ok(())
    }
}

fn weights_in(eigenfaces: &[ColumnVector], phi: &ColumnVector) -> Result<Vec<f64>, RecognitionError> {
    eigenfaces
        .iter()
        .map(|u| u.dot(phi).map_err(RecognitionError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn one_hot_faces() -> Vec<ColumnVector> {
        (0..4)
            .map(|k| {
                let mut pixels = [0u8; 9];
                pixels[k] = 200;
                ColumnVector::from_pixels(&pixels)
            })
            .collect()
    }

    fn train(components: usize) -> EigenfaceModel {
        EigenfaceModel::train(&one_hot_faces(), components, &EigenfaceConfig::default()).unwrap()
    }

    #[test]
    fn test_mean_face() {
        let model = train(3);
        let mean = model.mean();
        for k in 0..4 {
            assert_relative_eq!(mean[k], 50.0, epsilon = 1e-12);
        }
        for k in 4..9 {
            assert_eq!(mean[k], 0.0);
        }
        assert_eq!(model.pixel_count(), 9);
    }

    #[test]
    fn test_eigenfaces_are_orthonormal() {
        let model = train(3);
        assert_eq!(model.components(), 3);
        let faces = model.eigenfaces();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(faces[i].dot(&faces[j]).unwrap(), expected, epsilon = 1e-6);
            }
        }
        for &value in model.eigenvalues() {
            assert_relative_eq!(value, 40000.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_recognizes_training_images() {
        let faces = one_hot_faces();
        let model = train(3);
        for (i, face) in faces.iter().enumerate() {
            let found = model.recognize(face).unwrap();
            assert_eq!(found.index, i);
            assert!(found.distance < 1e-6);
        }
    }

    #[test]
    fn test_recognizes_noisy_image() {
        let mut pixels = [0u8; 9];
        pixels[2] = 190;
        pixels[0] = 5;
        pixels[7] = 5;
        let query = ColumnVector::from_pixels(&pixels);

        let found = train(3).recognize(&query).unwrap();
        assert_eq!(found.index, 2);
        assert!(found.distance > 0.0);
    }

    #[test]
    fn test_reconstruct_training_image() {
        let faces = one_hot_faces();
        let model = train(3);
        let rebuilt = model.reconstruct(&faces[1]).unwrap();
        for (r, f) in rebuilt.iter().zip(faces[1].iter()) {
            assert_relative_eq!(*r, *f, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_eigenfaces_as_gray_images() {
        let faces = one_hot_faces();
        let model = train(3);
        for face in model.eigenfaces() {
            let gray = face.to_gray_pixels();
            assert_eq!(gray.len(), model.pixel_count());
            assert!(gray.contains(&0) && gray.contains(&255));
        }

        let rebuilt = model.reconstruct(&faces[1]).unwrap().to_gray_pixels();
        assert_eq!(rebuilt, vec![0, 255, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_rank_limits_components() {
        // Four centered images span only three dimensions
        let model = train(4);
        assert_eq!(model.components(), 3);
    }

    #[test]
    fn test_training_errors() {
        let config = EigenfaceConfig::default();
        assert_eq!(
            EigenfaceModel::train(&[], 1, &config).unwrap_err(),
            RecognitionError::EmptyTrainingSet
        );

        let mixed = vec![ColumnVector::zeros(4), ColumnVector::zeros(5)];
        assert_eq!(
            EigenfaceModel::train(&mixed, 1, &config).unwrap_err(),
            RecognitionError::ImageSizeMismatch {
                expected: 4,
                got: 5
            }
        );

        let faces = one_hot_faces();
        assert!(matches!(
            EigenfaceModel::train(&faces, 0, &config),
            Err(RecognitionError::InvalidComponentCount { requested: 0, .. })
        ));
        assert!(matches!(
            EigenfaceModel::train(&faces, 5, &config),
            Err(RecognitionError::InvalidComponentCount {
                requested: 5,
                available: 4
            })
        ));
    }

    #[test]
    fn test_image_size_mismatch() {
        let model = train(2);
        assert_eq!(
            model.project(&ColumnVector::zeros(3)).unwrap_err(),
            RecognitionError::ImageSizeMismatch {
                expected: 9,
                got: 3
            }
        );
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = train(2);
        let b = train(2);
        assert_eq!(a.eigenfaces(), b.eigenfaces());
    }
}
