use nalgebra::{Quaternion, Rotation3, UnitQuaternion};
use rand_distr::{Normal, Distribution};

pub struct SimpleSamplers;
impl SimpleSamplers {
    pub fn normal_samples(means_and_standard_deviations: &Vec<(f64, f64)>) -> Vec<f64> {
        let mut out_vec = vec![];
        let mut rng = rand::thread_rng();
        for (mean, standard_deviation) in means_and_standard_deviations {
            let distribution = match Normal::new(*mean, *standard_deviation) {
                Ok(d) => { d }
                Err(_) => { out_vec.push(*mean); continue; }
            };
            out_vec.push(distribution.sample(&mut rng));
        }
        out_vec
    }
    /// Samples a unit quaternion uniformly over SO(3) by normalizing four standard normal draws.
    pub fn unit_quaternion_sample() -> UnitQuaternion<f64> {
        loop {
            let s = Self::normal_samples(&vec![(0.0, 1.0); 4]);
            let q = Quaternion::new(s[0], s[1], s[2], s[3]);
            if q.norm() > 1e-6 { return UnitQuaternion::from_quaternion(q); }
        }
    }
    pub fn unit_quaternion_samples(n: usize) -> Vec<UnitQuaternion<f64>> {
        (0..n).map(|_| Self::unit_quaternion_sample()).collect()
    }
    pub fn rotation_matrix_sample() -> Rotation3<f64> {
        Self::unit_quaternion_sample().to_rotation_matrix()
    }
}
