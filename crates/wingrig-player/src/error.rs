use thiserror::Error;
use wingrig_config::ConfigError;

/// Wiring errors raised while assembling a [`CharacterRig`](crate::CharacterRig).
#[derive(Debug, Error)]
pub enum RigError {
    /// A required collaborator was never supplied to the builder.
    #[error("rig is missing its {0}")]
    MissingCollaborator(&'static str),

    /// The supplied configuration failed validation.
    #[error("invalid rig configuration: {0}")]
    Config(#[from] ConfigError),
}
