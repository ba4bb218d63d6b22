use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle, PlayerEvent};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    events: Sender<PlayerEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut current: Option<(String, Vec<u8>, Option<Duration>)> = None;
        let mut paused = true;
        let mut volume: f32 = 1.0;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        // Spawn a ticker thread to update playback_info.elapsed periodically.
        let info_for_ticker_clone = playback_info.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(500));
            let mut info = info_for_ticker_clone.lock().unwrap();
            if info.playing {
                info.elapsed += Duration::from_millis(500);
            }
        });

        fn do_stop(
            sink: &mut Option<Sink>,
            current: &mut Option<(String, Vec<u8>, Option<Duration>)>,
            paused: &mut bool,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *sink = None;
            *current = None;
            *paused = true;
            *started_at = None;
            *accumulated = Duration::ZERO;
            if let Ok(mut info) = playback_info.lock() {
                info.id = None;
                info.elapsed = Duration::ZERO;
                info.duration = None;
                info.playing = false;
            }
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play {
                        id,
                        bytes,
                        duration,
                    } => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        match create_sink_at(&stream, bytes.clone(), Duration::ZERO) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                new_sink.play();
                                sink = Some(new_sink);
                                paused = false;
                                started_at = Some(Instant::now());
                                accumulated = Duration::ZERO;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.id = Some(id.clone());
                                    info.elapsed = Duration::ZERO;
                                    info.duration = duration;
                                    info.playing = true;
                                }
                                current = Some((id, bytes, duration));
                            }
                            Err(err) => {
                                sink = None;
                                current = None;
                                paused = true;
                                started_at = None;
                                accumulated = Duration::ZERO;
                                if let Ok(mut info) = playback_info.lock() {
                                    // Keep the id visible so the UI can name the failed track.
                                    info.id = Some(id.clone());
                                    info.elapsed = Duration::ZERO;
                                    info.duration = None;
                                    info.playing = false;
                                }
                                let _ = events.send(PlayerEvent::Unavailable {
                                    id,
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                if let Some(st) = started_at {
                                    accumulated += Instant::now() - st;
                                }
                                started_at = None;
                                paused = true;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                            }
                        }
                    }

                    AudioCmd::Resume => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                started_at = Some(Instant::now());
                                paused = false;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = true;
                                }
                            }
                        }
                    }

                    AudioCmd::Stop => {
                        do_stop(
                            &mut sink,
                            &mut current,
                            &mut paused,
                            &mut started_at,
                            &mut accumulated,
                            &playback_info,
                        );
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                    }

                    AudioCmd::SeekTo(target) => {
                        // Seeking rebuilds the current sink and skips into the
                        // decoded stream. Only meaningful with a loaded track.
                        let Some((id, bytes, duration)) = current.clone() else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }
                        let target = match duration {
                            Some(total) => target.min(total),
                            None => target,
                        };

                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        match create_sink_at(&stream, bytes, target) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                if paused {
                                    new_sink.pause();
                                    started_at = None;
                                } else {
                                    new_sink.play();
                                    started_at = Some(Instant::now());
                                }
                                sink = Some(new_sink);
                                accumulated = target;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = target;
                                }
                            }
                            Err(err) => {
                                do_stop(
                                    &mut sink,
                                    &mut current,
                                    &mut paused,
                                    &mut started_at,
                                    &mut accumulated,
                                    &playback_info,
                                );
                                let _ = events.send(PlayerEvent::Unavailable {
                                    id,
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic check for track end. The decision about what
                    // plays next lives with the caller, not in this thread.
                    if let Some(ref s) = sink {
                        if !paused && s.empty() {
                            let ended = current.take();
                            sink = None;
                            paused = true;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = false;
                                info.elapsed = Duration::ZERO;
                            }
                            if let Some((id, _, _)) = ended {
                                let _ = events.send(PlayerEvent::Ended { id });
                            }
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
