//! Bounded operator command queue.
//!
//! The panel pushes commands between ticks; the orchestrator drains the
//! queue at the start of each tick in arrival order.

use bxt_common::control_unit::command::OperatorCommand;
use heapless::Deque;
use static_assertions::const_assert;
use thiserror::Error;

/// Maximum number of commands buffered between two ticks.
pub const COMMAND_QUEUE_CAPACITY: usize = 16;

const_assert!(COMMAND_QUEUE_CAPACITY >= 4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("operator command queue full ({capacity} pending), dropped {command:?}")]
    QueueFull {
        command: OperatorCommand,
        capacity: usize,
    },
}

#[derive(Debug)]
pub struct CommandQueue {
    pending: Deque<OperatorCommand, COMMAND_QUEUE_CAPACITY>,
}

impl CommandQueue {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// Queue a command for the next tick.
    ///
    /// # Errors
    /// `QueueFull` when `COMMAND_QUEUE_CAPACITY` commands are already pending.
    pub fn push(&mut self, command: OperatorCommand) -> Result<(), CommandError> {
        self.pending
            .push_back(command)
            .map_err(|command| CommandError::QueueFull {
                command,
                capacity: COMMAND_QUEUE_CAPACITY,
            })
    }

    /// Oldest pending command.
    #[inline]
    pub fn pop(&mut self) -> Option<OperatorCommand> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
