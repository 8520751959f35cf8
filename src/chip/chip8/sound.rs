use crossbeam_channel::{unbounded, Receiver, Sender};
use log::warn;

/// The sound device. The interpreter calls `beep` once whenever the sound timer runs out; pitch
/// and duration are up to the implementation.
pub trait Sound: Send + Sync {
    fn beep(&self);
}

/// Plain functions and closures can be used as sound devices.
impl<F> Sound for F
where
    F: Fn() + Send + Sync,
{
    fn beep(&self) {
        self()
    }
}

/// A sound device that does nothing.
pub struct Mute;

impl Sound for Mute {
    fn beep(&self) {}
}

/// Forwards every beep as a message, so that an audio thread can play it.
pub struct ChannelSound {
    sender: Sender<()>,
}

impl ChannelSound {
    /// Returns the sound device and the receiver that gets one `()` per beep.
    pub fn new() -> (Self, Receiver<()>) {
        let (sender, receiver) = unbounded();
        (ChannelSound { sender }, receiver)
    }
}

impl Sound for ChannelSound {
    fn beep(&self) {
        if self.sender.send(()).is_err() {
            warn!("Dropping beep, the receiving end of the sound channel is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_closure_as_sound() {
        let beeps = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&beeps);
        let sound: Arc<dyn Sound> = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        sound.beep();
        sound.beep();
        assert_eq!(beeps.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_channel_sound_forwards_beeps() {
        let (sound, beeps) = ChannelSound::new();
        sound.beep();
        assert_eq!(beeps.try_recv(), Ok(()));
        assert!(beeps.try_recv().is_err());
    }

    #[test]
    fn test_channel_sound_survives_dropped_receiver() {
        let (sound, beeps) = ChannelSound::new();
        drop(beeps);
        sound.beep();
    }
}
