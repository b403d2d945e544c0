//! Fire-and-forget sound cues.
//!
//! Playback never reports back to the caller: a missing file or an absent
//! output device is logged and otherwise ignored.

use std::path::{Path, PathBuf};

use strum::{Display, EnumIter};
use tracing::{info, trace, warn};

use crate::config::AudioConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Cue {
    Flap,
    Score,
    Hit,
}

impl Cue {
    pub fn file_name(&self) -> &'static str {
        match self {
            Cue::Flap => "flap.mp3",
            Cue::Score => "score.mp3",
            Cue::Hit => "hit.mp3",
        }
    }

    pub fn path(&self, asset_dir: &Path) -> PathBuf {
        asset_dir.join(self.file_name())
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Sink used when audio is disabled or unavailable.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, cue: Cue) {
        trace!(%cue, "muted");
    }
}

pub fn open(config: &AudioConfig) -> Box<dyn AudioSink> {
    if !config.enabled {
        info!("audio disabled by configuration");
        return Box::new(Silent);
    }

    #[cfg(feature = "audio")]
    {
        match rodio_sink::RodioSink::new(config.asset_dir.clone()) {
            Ok(sink) => {
                info!(asset_dir = %config.asset_dir.display(), "audio output opened");
                return Box::new(sink);
            },
            Err(e) => warn!(error = %e, "no audio output, continuing muted"),
        }
    }

    #[cfg(not(feature = "audio"))]
    warn!("built without the `audio` feature, continuing muted");

    Box::new(Silent)
}

#[cfg(feature = "audio")]
mod rodio_sink {
    use std::{fs::File, io::BufReader, path::PathBuf};

    use color_eyre::eyre::Result;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use tracing::debug;

    use super::{AudioSink, Cue};

    pub struct RodioSink {
        // Dropping the stream silences every sink attached to the handle.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        asset_dir: PathBuf,
    }

    impl RodioSink {
        pub fn new(asset_dir: PathBuf) -> Result<Self> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self { _stream: stream, handle, asset_dir })
        }

        fn try_play(&self, cue: Cue) -> Result<()> {
            let file = File::open(cue.path(&self.asset_dir))?;
            let source = Decoder::new(BufReader::new(file))?;
            let sink = Sink::try_new(&self.handle)?;
            sink.append(source);
            sink.detach();
            Ok(())
        }
    }

    impl AudioSink for RodioSink {
        fn play(&mut self, cue: Cue) {
            if let Err(e) = self.try_play(cue) {
                debug!(%cue, error = %e, "playback failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_cue_files() {
        let files: Vec<&str> = Cue::iter().map(|cue| cue.file_name()).collect();
        assert_eq!(files, vec!["flap.mp3", "score.mp3", "hit.mp3"]);
        assert_eq!(Cue::Hit.path(Path::new("sounds")), PathBuf::from("sounds/hit.mp3"));
    }

    #[test]
    fn test_disabled_audio_is_silent() {
        let config = AudioConfig { enabled: false, asset_dir: PathBuf::from(".") };
        let mut sink = open(&config);
        sink.play(Cue::Flap);
    }
}
