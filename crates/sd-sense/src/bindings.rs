//! Listened tokens and their handler sets, aligned by index.

use crate::HandlerSet;

/// `stimuli[i]` is answered by `handlers[i]`.
///
/// The two lists may drift out of alignment through authoring mistakes; a
/// token with no handler set at its index is still "listened" but every
/// delivery of it fails.
#[derive(Debug, Default)]
pub struct StimulusBindings {
    stimuli: Vec<String>,
    handlers: Vec<HandlerSet>,
}

impl StimulusBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: listen to `token` with `handlers`.
    pub fn listen(mut self, token: &str, handlers: HandlerSet) -> Self {
        self.stimuli.push(token.to_owned());
        self.handlers.push(handlers);
        self
    }

    /// Builder: listen to `token` without a handler set.
    pub fn listen_token(mut self, token: &str) -> Self {
        self.stimuli.push(token.to_owned());
        self
    }

    pub fn push_token(&mut self, token: &str) {
        self.stimuli.push(token.to_owned());
    }

    pub fn push_handlers(&mut self, handlers: HandlerSet) {
        self.handlers.push(handlers);
    }

    /// Position of the first occurrence of `token`.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.stimuli.iter().position(|s| s == token)
    }

    pub fn is_listened(&self, token: &str) -> bool {
        self.index_of(token).is_some()
    }

    pub fn tokens(&self) -> &[String] {
        &self.stimuli
    }

    pub fn has_handler(&self, index: usize) -> bool {
        index < self.handlers.len()
    }

    pub fn handler_mut(&mut self, index: usize) -> Option<&mut HandlerSet> {
        self.handlers.get_mut(index)
    }

    /// `true` if every listened token has a handler set.
    pub fn is_consistent(&self) -> bool {
        self.handlers.len() >= self.stimuli.len()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}
