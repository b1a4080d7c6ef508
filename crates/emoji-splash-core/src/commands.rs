//! Commands from the UI into the core
//!
//! The UI never touches the world directly. It sends [`Command`]s through a
//! [`CommandSender`]; the session drains them once per advance, each exactly
//! once. UIs that model one-shot actions as ever-increasing counters can turn
//! them into commands with an [`EdgeTrigger`].

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::glyphs::EmojiCategory;
use crate::types::{DisplayMode, Viewport};

/// A discrete instruction for the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetCategory(EmojiCategory),
    SetMode(DisplayMode),
    SetGravityScale(f32),
    Resize(Viewport),
    Clear,
    Shake,
}

/// Cloneable handle for sending commands to a session
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Queue a command. Returns false if the session is gone.
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn set_category(&self, category: EmojiCategory) -> bool {
        self.send(Command::SetCategory(category))
    }

    pub fn set_mode(&self, mode: DisplayMode) -> bool {
        self.send(Command::SetMode(mode))
    }

    pub fn set_gravity_scale(&self, scale: f32) -> bool {
        self.send(Command::SetGravityScale(scale))
    }

    pub fn resize(&self, viewport: Viewport) -> bool {
        self.send(Command::Resize(viewport))
    }

    pub fn clear(&self) -> bool {
        self.send(Command::Clear)
    }

    pub fn shake(&self) -> bool {
        self.send(Command::Shake)
    }
}

/// Receiving end, owned by the session
#[derive(Debug)]
pub struct CommandReceiver {
    rx: Receiver<Command>,
}

impl CommandReceiver {
    /// Take every queued command in send order
    pub fn drain(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(command) => commands.push(command),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        commands
    }
}

/// Create a connected sender/receiver pair
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel();
    (CommandSender { tx }, CommandReceiver { rx })
}

/// Turns a monotonically increasing trigger counter into one-shot firings
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeTrigger {
    seen: u64,
}

impl EdgeTrigger {
    /// Start from the counter's current value so it does not fire immediately
    pub fn new(initial: u64) -> Self {
        Self { seen: initial }
    }

    /// Number of increments since the last call (0 if unchanged)
    pub fn take(&mut self, counter: u64) -> u64 {
        let fired = counter.saturating_sub(self.seen);
        self.seen = self.seen.max(counter);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_drained_in_order_once() {
        let (tx, rx) = command_channel();
        tx.clear();
        tx.set_mode(DisplayMode::Rain);
        tx.shake();

        assert_eq!(
            rx.drain(),
            vec![Command::Clear, Command::SetMode(DisplayMode::Rain), Command::Shake]
        );
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn test_send_fails_after_receiver_dropped() {
        let (tx, rx) = command_channel();
        drop(rx);
        assert!(!tx.shake());
    }

    #[test]
    fn test_edge_trigger_fires_once_per_increment() {
        let mut trigger = EdgeTrigger::new(0);
        assert_eq!(trigger.take(0), 0);
        assert_eq!(trigger.take(1), 1);
        assert_eq!(trigger.take(1), 0);
        assert_eq!(trigger.take(3), 2);
        assert_eq!(trigger.take(3), 0);
    }

    #[test]
    fn test_edge_trigger_ignores_initial_value() {
        let mut trigger = EdgeTrigger::new(5);
        assert_eq!(trigger.take(5), 0);
        assert_eq!(trigger.take(6), 1);
    }
}
