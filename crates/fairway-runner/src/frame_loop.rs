use std::time::Duration;

use bytes::Bytes;
use glam::Vec2;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use fairway_putt::input::PointerEvent;
use fairway_putt::{GreenEvent, GreenState, PuttingGreen};

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// Commands sent from the input layer to the frame loop.
#[derive(Debug)]
pub enum FrameCommand {
    Pointer(PointerEvent),
    Pause,
    Resume,
    Stop,
}

/// Broadcasts sent from the frame loop to the presentation layer.
#[derive(Debug, Clone)]
pub enum FrameBroadcast {
    /// Encoded [`GreenState`] after a tick.
    /// Uses `Bytes` so several consumers can share one encoding.
    Frame { frame: u64, state: Bytes },
    Event(GreenEvent),
    /// The loop has exited after running `frames` ticks.
    LoopEnded { frames: u64 },
}

/// Spawn the frame loop as a tokio task.
/// Returns the command sender, the broadcast receiver and a handle that
/// yields the green back once the loop stops.
pub fn spawn_green_session(
    green: PuttingGreen,
    config: &RunnerConfig,
) -> Result<
    (
        mpsc::UnboundedSender<FrameCommand>,
        mpsc::UnboundedReceiver<FrameBroadcast>,
        JoinHandle<PuttingGreen>,
    ),
    RunnerError,
> {
    let tick_interval = config.tick_interval()?;

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (broadcast_tx, broadcast_rx) = mpsc::unbounded_channel();

    let max_frames = config.max_frames;
    let span = tracing::info_span!("green_session", session = %uuid::Uuid::new_v4());

    let handle = tokio::spawn(
        run_frame_loop(green, tick_interval, max_frames, cmd_rx, broadcast_tx).instrument(span),
    );

    Ok((cmd_tx, broadcast_rx, handle))
}

/// One tick per interval; pointer commands are applied as they arrive on the same task.
async fn run_frame_loop(
    mut green: PuttingGreen,
    tick_interval: Duration,
    max_frames: Option<u64>,
    mut cmd_rx: mpsc::UnboundedReceiver<FrameCommand>,
    broadcast_tx: mpsc::UnboundedSender<FrameBroadcast>,
) -> PuttingGreen {
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(?max_frames, "Frame loop started");
    let mut frames: u64 = 0;

    loop {
        if max_frames.is_some_and(|max| frames >= max) {
            tracing::debug!(frames, "Frame budget reached");
            break;
        }

        tokio::select! {
            _ = interval.tick() => {
                let events = green.tick();
                frames += 1;

                let state = Bytes::from(green.snapshot());
                let _ = broadcast_tx.send(FrameBroadcast::Frame {
                    frame: green.state().frame,
                    state,
                });

                for event in events {
                    if let GreenEvent::Captured { strokes, frame } = event {
                        tracing::info!(strokes, frame, "{}", green.capture_message());
                    }
                    let _ = broadcast_tx.send(FrameBroadcast::Event(event));
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(FrameCommand::Pointer(pointer)) => {
                        if let Some(event) = green.handle_pointer(pointer) {
                            let _ = broadcast_tx.send(FrameBroadcast::Event(event));
                        }
                    },
                    Some(FrameCommand::Pause) => green.pause(),
                    Some(FrameCommand::Resume) => green.resume(),
                    Some(FrameCommand::Stop) | None => {
                        break;
                    },
                }
            }
        }
    }

    tracing::info!(frames, "Frame loop ended");
    let _ = broadcast_tx.send(FrameBroadcast::LoopEnded { frames });
    green
}

/// Decode a [`FrameBroadcast::Frame`] payload.
pub fn decode_frame(state: &[u8]) -> Result<GreenState, RunnerError> {
    Ok(rmp_serde::from_slice(state)?)
}

/// Result of a headless putt.
#[derive(Debug)]
pub struct PuttOutcome {
    pub events: Vec<GreenEvent>,
    pub final_state: GreenState,
    pub frames: u64,
}

impl PuttOutcome {
    pub fn captured(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GreenEvent::Captured { .. }))
    }
}

/// Play one putt through the frame loop: press on the ball, pull back by
/// `pull`, release. Runs until the ball drops, comes to rest, or the frame
/// budget is spent.
pub async fn play_putt(
    green: PuttingGreen,
    config: &RunnerConfig,
    pull: Vec2,
) -> Result<PuttOutcome, RunnerError> {
    let center = green.ball().position;
    let (cmd_tx, mut broadcast_rx, handle) = spawn_green_session(green, config)?;

    for pointer in [
        PointerEvent::press(center),
        PointerEvent::moved(center + pull),
        PointerEvent::release(center + pull),
    ] {
        cmd_tx
            .send(FrameCommand::Pointer(pointer))
            .map_err(|_| RunnerError::LoopClosed)?;
    }

    let mut events = Vec::new();
    let mut shot_taken = false;
    let mut frames = 0;

    loop {
        match broadcast_rx.recv().await {
            Some(FrameBroadcast::Event(event)) => {
                let done = matches!(event, GreenEvent::Captured { .. });
                shot_taken |= matches!(event, GreenEvent::ShotTaken { .. });
                events.push(event);
                if done {
                    let _ = cmd_tx.send(FrameCommand::Stop);
                }
            },
            Some(FrameBroadcast::Frame { state, .. }) => {
                if shot_taken && decode_frame(&state)?.ball.is_at_rest() {
                    let _ = cmd_tx.send(FrameCommand::Stop);
                }
            },
            Some(FrameBroadcast::LoopEnded { frames: n }) => {
                frames = n;
                break;
            },
            None => return Err(RunnerError::LoopClosed),
        }
    }

    let green = handle.await?;
    Ok(PuttOutcome {
        events,
        final_state: green.state().clone(),
        frames,
    })
}
