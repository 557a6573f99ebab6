//! The ordered record of applied commands.

use std::ops::Index;

use sleigh_physics::Command;

/// Every command an episode applied, in order.
///
/// Commands are name-addressed, so a log can be replayed against a fresh
/// simulator without knowing the gift lists at each step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandLog {
    commands: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_inner(self) -> Vec<Command> {
        self.commands
    }
}

impl From<Vec<Command>> for CommandLog {
    fn from(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

impl FromIterator<Command> for CommandLog {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self { commands: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a CommandLog {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl Index<usize> for CommandLog {
    type Output = Command;

    fn index(&self, i: usize) -> &Command {
        &self.commands[i]
    }
}
