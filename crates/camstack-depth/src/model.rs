use std::str::FromStr;

use candle_transformers::models::depth_anything_v2::DepthAnythingV2Config;

use crate::estimator::DepthError;

/// The Depth Anything V2 variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthModel {
    /// ViT-Small backbone (default).
    #[default]
    VitSmall,
    /// ViT-Base backbone.
    VitBase,
}

impl FromStr for DepthModel {
    type Err = DepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vits" | "vit-s" | "small" => Ok(Self::VitSmall),
            "vitb" | "vit-b" | "base" => Ok(Self::VitBase),
            other => Err(DepthError::UnknownModel(other.to_string())),
        }
    }
}

impl DepthModel {
    /// The network configuration of this variant.
    pub fn config(&self) -> DepthAnythingV2Config {
        match self {
            Self::VitSmall => DepthAnythingV2Config::vit_small(),
            Self::VitBase => DepthAnythingV2Config::vit_base(),
        }
    }

    /// DINOv2 backbone parameters: (depth, embedding dim, attention heads).
    pub fn dinov2_params(&self) -> (usize, usize, usize) {
        match self {
            Self::VitSmall => (12, 384, 6),
            Self::VitBase => (12, 768, 12),
        }
    }

    /// The safetensors file name of the DINOv2 backbone on the hub.
    pub fn dinov2_filename(&self) -> &'static str {
        match self {
            Self::VitSmall => "dinov2_vits14.safetensors",
            Self::VitBase => "dinov2_vitb14.safetensors",
        }
    }

    /// The safetensors file name of the depth head on the hub.
    pub fn depth_filename(&self) -> &'static str {
        match self {
            Self::VitSmall => "depth_anything_v2_vits.safetensors",
            Self::VitBase => "depth_anything_v2_vitb.safetensors",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_model_names() {
        assert_eq!("vits".parse::<DepthModel>().unwrap(), DepthModel::VitSmall);
        assert_eq!("VITB".parse::<DepthModel>().unwrap(), DepthModel::VitBase);
        assert!(matches!(
            "zoedepth".parse::<DepthModel>(),
            Err(DepthError::UnknownModel(_))
        ));
    }
}
