use std::fmt;
use thiserror::Error;

/// Stable error taxonomy. Discriminants are the public integer ids.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFoundSndFile = 0,
    NotFoundSoundNumber,
    NotFoundSoundIndex,

    InvalidSndExtension,
    InvalidLoadSndPath,
    InvalidSndSearchPath,
    InvalidEmptySndFilePath,
    InvalidSndFileSize,
    InvalidSndSignature,
    InvalidRiffSignature,
    InvalidWaveFormat,
    InvalidOutputFolderPath,

    FailedOpenSndFile,
    FailedCreateOutputFolder,
    FailedCreateErrorLogFile,
    FailedWriteErrorLogFile,
    FailedCloseErrorLogFile,
    FailedCreateExportWavFolder,
    FailedCreateWavFile,
    FailedWriteWavFile,
    FailedCloseWavFile,

    CorruptedSndFile,
    WarningDuplicateSoundNumber,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    NotFound,
    Invalid,
    Failed,
    Corrupted,
    Warning,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 23] = [
        ErrorKind::NotFoundSndFile,
        ErrorKind::NotFoundSoundNumber,
        ErrorKind::NotFoundSoundIndex,
        ErrorKind::InvalidSndExtension,
        ErrorKind::InvalidLoadSndPath,
        ErrorKind::InvalidSndSearchPath,
        ErrorKind::InvalidEmptySndFilePath,
        ErrorKind::InvalidSndFileSize,
        ErrorKind::InvalidSndSignature,
        ErrorKind::InvalidRiffSignature,
        ErrorKind::InvalidWaveFormat,
        ErrorKind::InvalidOutputFolderPath,
        ErrorKind::FailedOpenSndFile,
        ErrorKind::FailedCreateOutputFolder,
        ErrorKind::FailedCreateErrorLogFile,
        ErrorKind::FailedWriteErrorLogFile,
        ErrorKind::FailedCloseErrorLogFile,
        ErrorKind::FailedCreateExportWavFolder,
        ErrorKind::FailedCreateWavFile,
        ErrorKind::FailedWriteWavFile,
        ErrorKind::FailedCloseWavFile,
        ErrorKind::CorruptedSndFile,
        ErrorKind::WarningDuplicateSoundNumber,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::NotFoundSndFile => "NotFound_SNDFile",
            ErrorKind::NotFoundSoundNumber => "NotFound_SoundNumber",
            ErrorKind::NotFoundSoundIndex => "NotFound_SoundIndex",
            ErrorKind::InvalidSndExtension => "Invalid_SNDExtension",
            ErrorKind::InvalidLoadSndPath => "Invalid_LoadSNDPath",
            ErrorKind::InvalidSndSearchPath => "Invalid_SNDSearchPath",
            ErrorKind::InvalidEmptySndFilePath => "Invalid_EmptySNDFilePath",
            ErrorKind::InvalidSndFileSize => "Invalid_SNDFileSize",
            ErrorKind::InvalidSndSignature => "Invalid_SNDSignature",
            ErrorKind::InvalidRiffSignature => "Invalid_RIFFSignature",
            ErrorKind::InvalidWaveFormat => "Invalid_WAVEFormat",
            ErrorKind::InvalidOutputFolderPath => "Invalid_OutputFolderPath",
            ErrorKind::FailedOpenSndFile => "Failed_OpenSNDFile",
            ErrorKind::FailedCreateOutputFolder => "Failed_CreateOutputFolder",
            ErrorKind::FailedCreateErrorLogFile => "Failed_CreateErrorLogFile",
            ErrorKind::FailedWriteErrorLogFile => "Failed_WriteErrorLogFile",
            ErrorKind::FailedCloseErrorLogFile => "Failed_CloseErrorLogFile",
            ErrorKind::FailedCreateExportWavFolder => "Failed_CreateExportWAVFolder",
            ErrorKind::FailedCreateWavFile => "Failed_CreateWAVFile",
            ErrorKind::FailedWriteWavFile => "Failed_WriteWAVFile",
            ErrorKind::FailedCloseWavFile => "Failed_CloseWAVFile",
            ErrorKind::CorruptedSndFile => "Corrupted_SNDFile",
            ErrorKind::WarningDuplicateSoundNumber => "Warning_DuplicateSoundNumber",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::NotFoundSndFile => "SND file not found",
            ErrorKind::NotFoundSoundNumber => "sound number not found in the sound list",
            ErrorKind::NotFoundSoundIndex => "sound index not found in the sound list",
            ErrorKind::InvalidSndExtension => "file extension is not .snd",
            ErrorKind::InvalidLoadSndPath => "load path for the SND file is invalid",
            ErrorKind::InvalidSndSearchPath => "SND search folder path is invalid",
            ErrorKind::InvalidEmptySndFilePath => "no SND file path was given",
            ErrorKind::InvalidSndFileSize => "SND file size exceeds the supported limit",
            ErrorKind::InvalidSndSignature => "file is not an SND container",
            ErrorKind::InvalidRiffSignature => "embedded sound data is not RIFF",
            ErrorKind::InvalidWaveFormat => "embedded sound data is not WAVE",
            ErrorKind::InvalidOutputFolderPath => "output folder path is invalid",
            ErrorKind::FailedOpenSndFile => "could not open the SND file",
            ErrorKind::FailedCreateOutputFolder => "could not create the output folder",
            ErrorKind::FailedCreateErrorLogFile => "could not create the error log file",
            ErrorKind::FailedWriteErrorLogFile => "could not write the error log file",
            ErrorKind::FailedCloseErrorLogFile => "error log file did not close cleanly",
            ErrorKind::FailedCreateExportWavFolder => "could not create the WAV export folder",
            ErrorKind::FailedCreateWavFile => "could not create the WAV file",
            ErrorKind::FailedWriteWavFile => "could not write the WAV file",
            ErrorKind::FailedCloseWavFile => "WAV file did not close cleanly",
            ErrorKind::CorruptedSndFile => "SND file may be corrupted",
            ErrorKind::WarningDuplicateSoundNumber => "duplicate sound number in the sound list",
        }
    }

    pub fn category(self) -> Category {
        match self.id() {
            0..=2 => Category::NotFound,
            3..=11 => Category::Invalid,
            12..=20 => Category::Failed,
            21 => Category::Corrupted,
            _ => Category::Warning,
        }
    }

    pub fn is_warning(self) -> bool {
        self.category() == Category::Warning
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric context attached to a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    Value(i32),
    Sound { group: i32, item: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub payload: Payload,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            payload: Payload::None,
        }
    }

    pub fn with_value(kind: ErrorKind, value: i32) -> Self {
        Self {
            kind,
            payload: Payload::Value(value),
        }
    }

    pub fn with_sound(kind: ErrorKind, group: i32, item: i32) -> Self {
        Self {
            kind,
            payload: Payload::Sound { group, item },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.kind.message())?;
        match self.payload {
            Payload::None => Ok(()),
            Payload::Value(v) => write!(f, " ({v})"),
            Payload::Sound { group, item } => write!(f, " ({group}-{item})"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SndError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("{0}")]
    Reported(Diagnostic),
}

impl SndError {
    /// The taxonomy kind, when this error came through the collector.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SndError::Reported(d) => Some(d.kind),
            _ => None,
        }
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, SndError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_table_order() {
        for (i, k) in ErrorKind::ALL.iter().enumerate() {
            assert_eq!(k.id(), i as i32);
            assert_eq!(ErrorKind::from_id(i as i32), Some(*k));
        }
        assert_eq!(ErrorKind::from_id(23), None);
        assert_eq!(ErrorKind::from_id(-1), None);
    }

    #[test]
    fn categories() {
        assert_eq!(ErrorKind::NotFoundSoundIndex.category(), Category::NotFound);
        assert_eq!(ErrorKind::InvalidOutputFolderPath.category(), Category::Invalid);
        assert_eq!(ErrorKind::FailedCloseWavFile.category(), Category::Failed);
        assert_eq!(ErrorKind::CorruptedSndFile.category(), Category::Corrupted);
        assert!(ErrorKind::WarningDuplicateSoundNumber.is_warning());
    }

    #[test]
    fn display_carries_payload() {
        let d = Diagnostic::with_sound(ErrorKind::NotFoundSoundNumber, 9, 9);
        let s = SndError::Reported(d).to_string();
        assert!(s.starts_with("NotFound_SoundNumber"));
        assert!(s.ends_with("(9-9)"));
    }
}
