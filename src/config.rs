use serde::{Deserialize, Serialize};

use crate::payload::PayloadState;
use crate::rtp::Ssrc;

/// Customized config for creating [`FrameDependencyTranslator`] and
/// [`PayloadRouter`] instances.
///
/// ```
/// use str0m_framedeps::PayloadConfig;
///
/// let config = PayloadConfig::new()
///     .set_generic_descriptor(false)
///     .set_random_initial_state(true);
///
/// assert!(!config.generic_descriptor());
/// assert!(config.generic_picture_id());
/// ```
///
/// The config is serializable, which allows loading it alongside other
/// settings. Missing fields take their default value.
///
/// ```
/// use str0m_framedeps::PayloadConfig;
///
/// let json = r#"{ "generic_descriptor": false }"#;
/// let config: PayloadConfig = serde_json::from_str(json).unwrap();
///
/// assert!(!config.generic_descriptor());
/// assert!(!config.random_initial_state());
/// ```
///
/// [`FrameDependencyTranslator`]: crate::FrameDependencyTranslator
/// [`PayloadRouter`]: crate::PayloadRouter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    pub(crate) generic_descriptor: bool,
    pub(crate) generic_picture_id: bool,
    pub(crate) random_initial_state: bool,
}

impl PayloadConfig {
    /// Creates a new default config.
    pub fn new() -> Self {
        PayloadConfig::default()
    }

    /// Tells whether VP8 frames get a generic frame descriptor with explicit
    /// frame dependencies.
    ///
    /// Defaults to `true`.
    pub fn generic_descriptor(&self) -> bool {
        self.generic_descriptor
    }

    /// Toggle the generic frame descriptor for VP8 frames.
    ///
    /// When disabled, receivers rely on picture id and tl0 pic idx alone.
    pub fn set_generic_descriptor(mut self, enabled: bool) -> Self {
        self.generic_descriptor = enabled;
        self
    }

    /// Tells whether frames of the generic codec get a running frame id.
    ///
    /// Defaults to `true`.
    pub fn generic_picture_id(&self) -> bool {
        self.generic_picture_id
    }

    /// Toggle the running frame id for the generic codec.
    pub fn set_generic_picture_id(mut self, enabled: bool) -> Self {
        self.generic_picture_id = enabled;
        self
    }

    /// Tells whether streams without a restored [`PayloadState`] start from a
    /// random picture id and tl0 pic idx.
    ///
    /// Defaults to `false`, i.e. starting from 0.
    pub fn random_initial_state(&self) -> bool {
        self.random_initial_state
    }

    /// Toggle random initial payload state.
    pub fn set_random_initial_state(mut self, enabled: bool) -> Self {
        self.random_initial_state = enabled;
        self
    }

    /// The state a stream starts from when nothing was persisted for it.
    pub(crate) fn initial_state(&self, ssrc: Ssrc) -> PayloadState {
        if !self.random_initial_state {
            return PayloadState::default();
        }

        let state = PayloadState::new(fastrand::u16(..), fastrand::u8(..));
        trace!("Random initial payload state for {}: {:?}", ssrc, state);
        state
    }
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            generic_descriptor: true,
            generic_picture_id: true,
            random_initial_state: false,
        }
    }
}
