pub mod decode;
pub mod mixer;
