//! Landmark detector adapter
//!
//! The pose estimator is an external program. [`SubprocessSource`] spawns
//! the configured detector command and reads one JSON object per line from
//! its stdout, each describing the hands visible in one camera frame:
//!
//! ```json
//! {"hands":[{"handedness":"left","landmarks":[[0.1,0.2,0.0], ...]}]}
//! ```
//!
//! A closed pipe or malformed line is a capture failure, which terminates
//! the session worker.

use crate::app::config::DetectorConfig;
use crate::hand::landmarks::{HandLandmarks, Handedness, Landmark, RawHand, LANDMARK_COUNT};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

/// Everything observed in one captured frame.
#[derive(Debug, Clone, Default)]
pub struct SourceFrame {
    /// Detected hands, zero or more
    pub hands: Vec<RawHand>,
}

/// Blocking per-frame acquisition from the external detector.
pub trait HandSource: Send {
    /// Acquire the next frame. Blocks until one is available; an error is
    /// a capture failure and terminates the session worker.
    fn next_frame(&mut self) -> crate::Result<SourceFrame>;
}

#[derive(Debug, Deserialize)]
struct WireFrame {
    #[serde(default)]
    hands: Vec<WireHand>,
}

#[derive(Debug, Deserialize)]
struct WireHand {
    handedness: String,
    landmarks: Vec<[f64; 3]>,
}

/// Line-delimited-JSON subprocess detector.
pub struct SubprocessSource {
    child: Child,
    stdout: BufReader<std::process::ChildStdout>,
    line: String,
}

impl SubprocessSource {
    /// Spawn the configured detector command.
    pub fn spawn(config: &DetectorConfig) -> crate::Result<Self> {
        if config.command.trim().is_empty() {
            return Err(crate::Error::Detector(
                "no detector command configured; set [detector] command in the config".into(),
            ));
        }
        let mut child = Command::new(&config.command)
            .args(&config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                crate::Error::Detector(format!("failed to spawn `{}`: {e}", config.command))
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| crate::Error::Detector("detector stdout not captured".into()))?;
        info!(command = %config.command, "Landmark detector started");
        Ok(Self {
            child,
            stdout: BufReader::new(stdout),
            line: String::new(),
        })
    }

    fn parse_frame(line: &str) -> crate::Result<SourceFrame> {
        let wire: WireFrame = serde_json::from_str(line)
            .map_err(|e| crate::Error::Detector(format!("malformed detector frame: {e}")))?;
        let mut hands = Vec::with_capacity(wire.hands.len());
        for hand in wire.hands {
            if hand.landmarks.len() != LANDMARK_COUNT {
                warn!(
                    count = hand.landmarks.len(),
                    "detector hand skipped: wrong landmark count"
                );
                continue;
            }
            let handedness: Handedness = hand.handedness.parse()?;
            let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
            for (slot, [x, y, z]) in landmarks.iter_mut().zip(hand.landmarks) {
                *slot = Landmark { x, y, z };
            }
            hands.push(RawHand {
                handedness,
                landmarks: HandLandmarks(landmarks),
            });
        }
        Ok(SourceFrame { hands })
    }
}

impl HandSource for SubprocessSource {
    fn next_frame(&mut self) -> crate::Result<SourceFrame> {
        self.line.clear();
        let read = self
            .stdout
            .read_line(&mut self.line)
            .map_err(|e| crate::Error::Capture(format!("detector read failed: {e}")))?;
        if read == 0 {
            return Err(crate::Error::Capture("detector stream ended".into()));
        }
        let trimmed = self.line.trim();
        if trimmed.is_empty() {
            // Heartbeat line: a frame with nothing in it
            return Ok(SourceFrame::default());
        }
        Self::parse_frame(trimmed)
    }
}

impl Drop for SubprocessSource {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!("detector already exited: {e}");
        }
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark_json() -> String {
        let point = "[0.1,0.2,0.0]";
        let landmarks = vec![point; LANDMARK_COUNT].join(",");
        format!(r#"{{"hands":[{{"handedness":"left","landmarks":[{landmarks}]}}]}}"#)
    }

    #[test]
    fn test_parse_frame() {
        let frame = SubprocessSource::parse_frame(&landmark_json()).unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].handedness, Handedness::Left);
        assert_eq!(frame.hands[0].landmarks.get(0).x, 0.1);
    }

    #[test]
    fn test_parse_empty_hands() {
        let frame = SubprocessSource::parse_frame(r#"{"hands":[]}"#).unwrap();
        assert!(frame.hands.is_empty());
        let frame = SubprocessSource::parse_frame("{}").unwrap();
        assert!(frame.hands.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SubprocessSource::parse_frame("not json").is_err());
    }

    #[test]
    fn test_wrong_landmark_count_skips_hand() {
        let json = r#"{"hands":[{"handedness":"right","landmarks":[[0.0,0.0,0.0]]}]}"#;
        let frame = SubprocessSource::parse_frame(json).unwrap();
        assert!(frame.hands.is_empty());
    }

    #[test]
    fn test_unknown_handedness_is_error() {
        let json = landmark_json().replace("left", "sideways");
        assert!(SubprocessSource::parse_frame(&json).is_err());
    }
}
