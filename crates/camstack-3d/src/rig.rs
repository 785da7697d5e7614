use std::path::Path;

use crate::camera::RigidTransform;

/// An error type for rig configuration loading.
#[derive(thiserror::Error, Debug)]
pub enum RigError {
    /// Error when the config file does not exist.
    #[error("Rig config file does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the config file.
    #[error("Failed to read the rig config. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to parse the config file.
    #[error("Failed to parse the rig config. {0}")]
    ParseError(#[from] serde_json::Error),

    /// The rig does not describe any camera.
    #[error("Rig config must contain at least one camera")]
    EmptyRig,
}

/// One camera of a rig: a display name plus its fixed extrinsic transform
/// from camera-local to world coordinates.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigCamera {
    /// A human readable camera name.
    #[serde(default)]
    pub name: String,
    /// The camera extrinsic transform.
    pub extrinsic: RigidTransform,
}

/// An ordered list of rig cameras. The first camera is the alignment
/// reference.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigConfig {
    /// The cameras of the rig, reference first.
    pub cameras: Vec<RigCamera>,
}

impl RigConfig {
    /// The default four-camera rig: vertically stacked cameras with the
    /// reference on top and the others 0.4, 0.78 and 1.13 meters below it.
    pub fn vertical_stack() -> Self {
        let offsets = [0.0, -0.4, -0.78, -1.13];
        Self {
            cameras: offsets
                .iter()
                .enumerate()
                .map(|(i, &dy)| RigCamera {
                    name: format!("camera_{i}"),
                    extrinsic: RigidTransform::from_translation([0.0, dy, 0.0]),
                })
                .collect(),
        }
    }

    /// Load a rig configuration from a JSON file.
    pub fn from_json_file(file_path: impl AsRef<Path>) -> Result<Self, RigError> {
        let file_path = file_path.as_ref().to_owned();
        if !file_path.exists() {
            return Err(RigError::FileDoesNotExist(file_path));
        }

        let contents = std::fs::read_to_string(file_path)?;
        let rig: Self = serde_json::from_str(&contents)?;
        if rig.cameras.is_empty() {
            return Err(RigError::EmptyRig);
        }
        Ok(rig)
    }

    /// The number of cameras in the rig.
    #[inline]
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// Check if the rig has no cameras.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vertical_stack() {
        let rig = RigConfig::vertical_stack();
        assert_eq!(rig.len(), 4);
        assert_eq!(rig.cameras[0].extrinsic, RigidTransform::identity());
        assert_eq!(rig.cameras[1].extrinsic.translation, [0.0, -0.4, 0.0]);
        assert_eq!(rig.cameras[2].extrinsic.translation, [0.0, -0.78, 0.0]);
        assert_eq!(rig.cameras[3].extrinsic.translation, [0.0, -1.13, 0.0]);
    }

    #[test]
    fn load_from_json() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rig.json");
        std::fs::write(
            &file_path,
            r#"{
                "cameras": [
                    { "name": "top", "extrinsic": { "translation": [0.0, 0.0, 0.0] } },
                    { "extrinsic": { "translation": [0.0, -0.5, 0.0] } }
                ]
            }"#,
        )?;

        let rig = RigConfig::from_json_file(&file_path)?;
        assert_eq!(rig.len(), 2);
        assert_eq!(rig.cameras[0].name, "top");
        // omitted rotation defaults to identity
        assert_eq!(rig.cameras[1].extrinsic, RigidTransform::from_translation([0.0, -0.5, 0.0]));
        Ok(())
    }

    #[test]
    fn missing_file() {
        let result = RigConfig::from_json_file("/no/such/rig.json");
        assert!(matches!(result, Err(RigError::FileDoesNotExist(_))));
    }

    #[test]
    fn empty_rig_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rig.json");
        std::fs::write(&file_path, r#"{ "cameras": [] }"#)?;

        let result = RigConfig::from_json_file(&file_path);
        assert!(matches!(result, Err(RigError::EmptyRig)));
        Ok(())
    }
}
