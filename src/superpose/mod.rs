pub mod qcp;
pub mod quaternion_fit;
