use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("invalid time '{input}': expected HH:MM or h:MM AM/PM")]
    InvalidTime { input: String },

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("unknown clock format '{0}': expected 24h or 12h")]
    UnknownClockFormat(String),

    #[error("duplicate preset id '{0}'")]
    DuplicatePreset(String),

    #[error("unknown preset set '{0}': expected default or business")]
    UnknownPresetSet(String),
}
