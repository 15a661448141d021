//! Event loop driving a [`SignupForm`].
//!
//! The loop is single-threaded and cooperative: it pulls one input at a time,
//! hands it to the form, carries out the returned [`Effect`]s and re-renders.
//! Success resets are tokio tasks that sleep and then post
//! [`Event::ResetElapsed`] back into the loop; cancelling a reset aborts its
//! task.
//!
//! # Example
//!
//! ```rust,ignore
//! use signup_form::{Event, Input, Program, RecordingView, SignupForm};
//! use tokio::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel(16);
//! let program = Program::new(SignupForm::default(), RecordingView::default());
//! tx.send(Input::Event(Event::Submit)).await?;
//! drop(tx);
//! let finished = program.run(rx).await;
//! ```

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::controller::{SignupForm, View};
use crate::state::{Effect, Event, FormState, ResetToken};

/// What the presentation layer feeds into the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(Event),
    /// Render again without changing state.
    Refresh,
    /// Stop the loop, dropping any pending resets.
    Quit,
}

impl From<Event> for Input {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Final state and view of a finished run.
#[derive(Debug)]
pub struct Finished<V> {
    pub state: FormState,
    pub view: V,
}

/// Program options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramOptions {
    /// After the input channel closes, keep running until every scheduled
    /// reset has fired.
    pub drain_resets: bool,
}

pub struct Program<V: View> {
    form: SignupForm,
    view: V,
    options: ProgramOptions,
    timers: HashMap<ResetToken, JoinHandle<()>>,
}

impl<V: View> Program<V> {
    pub fn new(form: SignupForm, view: V) -> Self {
        Self {
            form,
            view,
            options: ProgramOptions::default(),
            timers: HashMap::new(),
        }
    }

    /// Wait for scheduled resets once input is exhausted.
    #[must_use]
    pub fn with_drain_resets(mut self) -> Self {
        self.options.drain_resets = true;
        self
    }

    /// Runs until `inputs` closes or yields [`Input::Quit`].
    ///
    /// Must be called within a tokio runtime.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<Input>) -> Finished<V> {
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<ResetToken>();
        let mut inputs_open = true;

        self.render();

        loop {
            if !inputs_open && (!self.options.drain_resets || self.timers.is_empty()) {
                break;
            }

            tokio::select! {
                biased;

                Some(token) = timer_rx.recv() => {
                    self.timers.remove(&token);
                    self.dispatch(Event::ResetElapsed(token), &timer_tx);
                }
                input = inputs.recv(), if inputs_open => match input {
                    Some(Input::Event(event)) => self.dispatch(event, &timer_tx),
                    Some(Input::Refresh) => self.render(),
                    Some(Input::Quit) => {
                        tracing::debug!("quit requested");
                        break;
                    }
                    None => {
                        tracing::debug!(pending = self.timers.len(), "input closed");
                        inputs_open = false;
                    }
                },
            }
        }

        for (_, handle) in self.timers.drain() {
            handle.abort();
        }

        Finished {
            state: self.form.into_state(),
            view: self.view,
        }
    }

    fn dispatch(&mut self, event: Event, timer_tx: &mpsc::UnboundedSender<ResetToken>) {
        tracing::trace!(?event, "dispatch");
        let effects = self.form.update(event);
        for effect in effects {
            self.apply(effect, timer_tx);
        }
        self.render();
    }

    fn apply(&mut self, effect: Effect, timer_tx: &mpsc::UnboundedSender<ResetToken>) {
        match effect {
            Effect::ScheduleReset { token, after } => {
                let tx = timer_tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    // The loop may already be gone.
                    let _ = tx.send(token);
                });
                tracing::debug!(token = token.id(), ?after, "success reset scheduled");
                self.timers.insert(token, handle);
            }
            Effect::CancelReset(token) => {
                if let Some(handle) = self.timers.remove(&token) {
                    handle.abort();
                    tracing::debug!(token = token.id(), "success reset cancelled");
                }
            }
        }
    }

    fn render(&mut self) {
        self.view.render(&self.form.view());
    }
}
