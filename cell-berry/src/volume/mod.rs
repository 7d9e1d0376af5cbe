mod label;
pub(crate) mod prob;
mod scale;

pub use label::LabelVolume;
pub use prob::ProbVolume;
pub use scale::ScaleFactors;
