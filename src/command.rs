//! Runtime control of a running disco.
//!
//! Commands travel over a bounded queue guarded by `critical-section`, so
//! they can be sent from interrupt handlers or other tasks while the
//! animation loop owns the display.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::config::Caption;

/// A request to change the running animation
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoCommand {
    /// Leave the run loop before the next frame
    Stop,
    /// Change the backlight level (0.0 - 1.0)
    SetBacklight(f32),
    /// Replace the text drawn over the rainbow
    SetCaption(Caption),
}

/// Returned when the queue is full, carries the rejected command.
#[derive(Debug, Clone, PartialEq)]
pub struct TrySendError(pub DiscoCommand);

/// Returned when there is nothing queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded command queue.
pub struct CommandChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<DiscoCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandChannel<SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle, any number of them can coexist.
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { channel: self }
    }

    /// Get a receiver handle.
    ///
    /// The animation loop should hold the only receiver.
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { channel: self }
    }

    fn push(&self, command: DiscoCommand) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(TrySendError)
        })
    }

    fn pop(&self) -> Option<DiscoCommand> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const SIZE: usize> Default for CommandChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending side of a [`CommandChannel`].
///
/// A lightweight reference that can be copied into interrupt handlers or tasks.
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Queue a command without blocking.
    ///
    /// Returns `Err(TrySendError(command))` if the queue is full.
    pub fn try_send(&self, command: DiscoCommand) -> Result<(), TrySendError> {
        self.channel.push(command)
    }

    /// Ask the animation loop to stop
    ///
    /// Returns `Err(TrySendError(DiscoCommand::Stop))` if the queue is full.
    pub fn stop(&self) -> Result<(), TrySendError> {
        self.try_send(DiscoCommand::Stop)
    }
}

/// Receiving side of a [`CommandChannel`].
///
/// A lightweight reference, drained by the animation loop once per frame.
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Take the oldest queued command.
    ///
    /// Returns `Err(TryReceiveError)` if nothing is queued.
    pub fn try_receive(&self) -> Result<DiscoCommand, TryReceiveError> {
        self.channel.pop().ok_or(TryReceiveError)
    }
}
