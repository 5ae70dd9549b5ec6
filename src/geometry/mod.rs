pub mod coordinate;
pub mod eigen;
pub mod matrix;
pub mod moments;
