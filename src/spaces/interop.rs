//! Numeric backend interop.
//! Optional conversions of poses and stacked observations into ndarray/nalgebra types,
//! gated behind feature flags. The core crate keeps plain arrays and `Vec<f64>`.

#[cfg(feature = "ndarray")]
pub mod ndarray_impl {
    use ndarray::Array2;

    use crate::sim::POSE_SIZE;

    /// Error for observations whose length is not a whole number of poses.
    #[derive(Debug, Clone, PartialEq)]
    pub struct NdarrayShapeError(pub usize);

    /// View a stacked observation as an `(action_repeat, 6)` matrix, one pose per row.
    pub fn observation_to_ndarray(obs: &[f64]) -> Result<Array2<f64>, NdarrayShapeError> {
        if obs.len() % POSE_SIZE != 0 {
            return Err(NdarrayShapeError(obs.len()));
        }
        Array2::from_shape_vec((obs.len() / POSE_SIZE, POSE_SIZE), obs.to_vec())
            .map_err(|_| NdarrayShapeError(obs.len()))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn rows_are_poses() {
            let obs: Vec<f64> = (0..18).map(|v| v as f64).collect();
            let m = observation_to_ndarray(&obs).expect("shape");
            assert_eq!(m.shape(), &[3, 6]);
            assert_eq!(m[[2, 0]], 12.0);
            assert!(observation_to_ndarray(&obs[..7]).is_err());
        }
    }
}

#[cfg(feature = "nalgebra")]
pub mod nalgebra_impl {
    use nalgebra::{SVector, Vector3};

    use crate::sim::{Pose, POSE_SIZE};

    impl Pose {
        pub fn position_vector(&self) -> Vector3<f64> { Vector3::from(self.position) }

        pub fn to_nalgebra(&self) -> SVector<f64, POSE_SIZE> {
            SVector::<f64, POSE_SIZE>::from_row_slice(&self.to_array())
        }

        pub fn from_nalgebra(v: &SVector<f64, POSE_SIZE>) -> Self {
            Pose::new([v[0], v[1], v[2]], [v[3], v[4], v[5]])
        }
    }

}
