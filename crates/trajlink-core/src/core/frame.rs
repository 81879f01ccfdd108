use nalgebra::{Point3, Vector3};

/// One timestep of trajectory data.
///
/// A frame is produced by the engine's caching module after a successful
/// runner advance and is owned by the caller once yielded. Positions are in
/// nanometers, time in picoseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Step index within the simulation that produced the trajectory.
    pub step: i64,
    /// Simulation time of this frame, in picoseconds.
    pub time: f64,
    /// Atom positions, in the order the selection produced them.
    pub positions: Vec<Point3<f64>>,
    /// Triclinic box vectors, when the resource records a periodic box.
    pub box_vectors: Option<[Vector3<f64>; 3]>,
}

impl Frame {
    pub fn new(step: i64, time: f64, positions: Vec<Point3<f64>>) -> Self {
        Self {
            step,
            time,
            positions,
            box_vectors: None,
        }
    }

    pub fn with_box_vectors(mut self, box_vectors: [Vector3<f64>; 3]) -> Self {
        self.box_vectors = Some(box_vectors);
        self
    }

    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
