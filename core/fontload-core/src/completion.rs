//! Single-shot completion signal for a font load (made by FontLab https://www.fontlab.com/)
//!
//! A [`Completion`] settles exactly once: right away for inline styles and
//! validation failures, or when the host reports the stylesheet's load event.
//! There is no timeout. A stylesheet the host never finishes keeps its
//! completion pending forever; callers wanting a deadline wrap it themselves.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::error::{FontLoadError, Result};

/// Outcome of one load: `Ok(())` or a diagnostic error.
#[must_use = "a Completion reports whether the font actually loaded"]
#[derive(Debug)]
pub struct Completion {
    state: State,
}

#[derive(Debug)]
enum State {
    Ready(Result<()>),
    Waiting {
        url: String,
        rx: oneshot::Receiver<Result<()>>,
    },
}

impl Completion {
    /// A completion that has already settled.
    pub fn ready(result: Result<()>) -> Self {
        Self {
            state: State::Ready(result),
        }
    }

    /// A completion that settles when `Settle` is used for the stylesheet at `url`.
    pub fn pending(url: impl Into<String>) -> (Settle, Self) {
        let (tx, rx) = oneshot::channel();
        let completion = Self {
            state: State::Waiting {
                url: url.into(),
                rx,
            },
        };
        (Settle { tx }, completion)
    }

    /// The outcome if it is already known, without an executor.
    ///
    /// Returns `None` while the load is still pending. Once settled, every
    /// call (and any later `.await`) sees the same outcome.
    pub fn try_result(&mut self) -> Option<Result<()>> {
        if let State::Waiting { url, rx } = &mut self.state {
            let result = match rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Closed) => Err(FontLoadError::Abandoned { url: url.clone() }),
                Err(TryRecvError::Empty) => return None,
            };
            self.state = State::Ready(result);
        }
        match &self.state {
            State::Ready(result) => Some(result.clone()),
            State::Waiting { .. } => None,
        }
    }
}

impl Future for Completion {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if let State::Waiting { url, rx } = &mut this.state {
            let result = match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => result,
                Poll::Ready(Err(_)) => Err(FontLoadError::Abandoned { url: url.clone() }),
                Poll::Pending => return Poll::Pending,
            };
            this.state = State::Ready(result);
        }
        match &this.state {
            State::Ready(result) => Poll::Ready(result.clone()),
            State::Waiting { .. } => Poll::Pending,
        }
    }
}

/// Sending half of a pending [`Completion`]. Consumed on use.
#[derive(Debug)]
pub struct Settle {
    tx: oneshot::Sender<Result<()>>,
}

impl Settle {
    pub fn send(self, result: Result<()>) {
        // A dropped Completion only means nobody is listening any more.
        let _ = self.tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_completion_is_settled_immediately() {
        let mut completion = Completion::ready(Ok(()));
        assert_eq!(completion.try_result(), Some(Ok(())));
        assert_eq!(completion.try_result(), Some(Ok(())), "outcome is kept");
    }

    #[test]
    fn pending_completion_waits_for_settle() {
        let (settle, mut completion) = Completion::pending("https://x.example/a.css");
        assert_eq!(completion.try_result(), None);

        settle.send(Err(FontLoadError::ResourceLoadFailure {
            url: "https://x.example/a.css".into(),
        }));
        assert_eq!(
            completion.try_result(),
            Some(Err(FontLoadError::ResourceLoadFailure {
                url: "https://x.example/a.css".into()
            }))
        );
    }

    #[test]
    fn dropped_settle_reports_abandoned() {
        let (settle, mut completion) = Completion::pending("https://x.example/a.css");
        drop(settle);
        assert!(matches!(
            completion.try_result(),
            Some(Err(FontLoadError::Abandoned { .. }))
        ));
    }

    #[tokio::test]
    async fn awaiting_yields_sent_result() {
        let (settle, completion) = Completion::pending("https://x.example/a.css");
        settle.send(Ok(()));
        assert_eq!(completion.await, Ok(()));
    }

    #[tokio::test]
    async fn awaiting_after_try_result_yields_same_outcome() {
        let (settle, mut completion) = Completion::pending("https://x.example/a.css");
        settle.send(Err(FontLoadError::ResourceLoadFailure {
            url: "https://x.example/a.css".into(),
        }));

        let seen = completion.try_result().expect("settled");
        assert_eq!(completion.await, seen);
    }

    #[tokio::test]
    async fn awaiting_abandoned_after_try_result() {
        let (settle, mut completion) = Completion::pending("https://x.example/a.css");
        drop(settle);

        assert!(matches!(
            completion.try_result(),
            Some(Err(FontLoadError::Abandoned { .. }))
        ));
        assert!(matches!(
            completion.await,
            Err(FontLoadError::Abandoned { .. })
        ));
    }
}
