pub mod imaging;
pub mod spectral;
pub mod text;
