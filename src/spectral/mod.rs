pub mod analysis;
pub mod framer;
pub mod matrix;
pub mod scaler;
pub mod transform;
pub mod window;
