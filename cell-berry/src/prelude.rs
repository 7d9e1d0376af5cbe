//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx3d, LabelId};

pub use crate::{LabelVolume, ProbVolume, ScaleFactors};

pub use crate::instance::{
    connected_component_instances, watershed_instances, ConnectedParams, InstanceMethod,
    WatershedParams,
};

pub use crate::error::{ParameterError, SegError, SegResult, ShapeError};

pub use crate::consts::{BACKGROUND, SEMANTIC_CHANNEL};

pub use crate::dataset::{self, home_dataset_dir_with, read_probability_npy, PredictionArchive};

pub use crate::morph::Connectivity;
