//! Viewer handles and the scoped connection that owns one.

use std::io::Write;

use super::ViewerCommand;
use crate::error::TrackError;

/// A live handle to an external structure viewer.
pub trait ViewerBackend {
    /// Hand one command to the viewer.
    ///
    /// # Errors
    ///
    /// Any failure the viewer reports. Callers treat commands as
    /// fire-and-forget and only log these.
    fn send(&mut self, command: &ViewerCommand) -> Result<(), TrackError>;

    /// Release the handle. Called exactly once, when the owning
    /// [`ViewerConnection`] is closed or dropped.
    fn dispose(&mut self) {}
}

/// Exclusive owner of one viewer handle for the lifetime of a mounted track.
///
/// Opening takes the handle; closing (or dropping, on any exit path) disposes
/// it exactly once. Commands are fire-and-forget: failures are logged and
/// counted, never retried and never reported back to the caller.
pub struct ViewerConnection<B: ViewerBackend> {
    backend: Option<B>,
    sent: usize,
    failed: usize,
}

impl<B: ViewerBackend> ViewerConnection<B> {
    /// Take ownership of a viewer handle.
    #[must_use]
    pub fn open(backend: B) -> Self {
        log::info!("viewer connection opened");
        Self {
            backend: Some(backend),
            sent: 0,
            failed: 0,
        }
    }

    /// Send `commands` in order. A failed command does not stop the rest.
    pub fn dispatch(&mut self, commands: &[ViewerCommand]) {
        let Some(backend) = self.backend.as_mut() else {
            log::warn!(
                "dropping {} viewer command(s): connection closed",
                commands.len()
            );
            return;
        };
        for command in commands {
            match backend.send(command) {
                Ok(()) => {
                    self.sent += 1;
                    log::debug!("viewer <- {command}");
                }
                Err(e) => {
                    self.failed += 1;
                    log::warn!("viewer command '{command}' failed: {e}");
                }
            }
        }
    }

    /// The owned handle, while the connection is open.
    #[must_use]
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Whether the handle has not been released yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.backend.is_some()
    }

    /// Commands accepted by the viewer so far.
    #[must_use]
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Commands the viewer reported as failed so far.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Dispose the handle now and give it back for inspection.
    #[must_use]
    pub fn close(mut self) -> Option<B> {
        self.release()
    }

    fn release(&mut self) -> Option<B> {
        let mut backend = self.backend.take()?;
        backend.dispose();
        log::info!(
            "viewer connection closed ({} sent, {} failed)",
            self.sent,
            self.failed
        );
        Some(backend)
    }
}

impl<B: ViewerBackend> Drop for ViewerConnection<B> {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// In-memory viewer that records every command it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLog {
    commands: Vec<ViewerCommand>,
    disposed: bool,
}

impl CommandLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[ViewerCommand] {
        &self.commands
    }

    /// Whether [`ViewerBackend::dispose`] has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl ViewerBackend for CommandLog {
    fn send(&mut self, command: &ViewerCommand) -> Result<(), TrackError> {
        self.commands.push(command.clone());
        Ok(())
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Viewer that writes each command's script form as one line.
pub struct ScriptWriter<W: Write> {
    out: W,
}

impl<W: Write> ScriptWriter<W> {
    /// Write scripts to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ViewerBackend for ScriptWriter<W> {
    fn send(&mut self, command: &ViewerCommand) -> Result<(), TrackError> {
        writeln!(self.out, "{command}")?;
        Ok(())
    }

    fn dispose(&mut self) {
        if let Err(e) = self.out.flush() {
            log::warn!("failed to flush viewer script: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::viewer::ViewerStyle;

    struct Flaky {
        calls: usize,
        disposals: Rc<Cell<usize>>,
    }

    impl ViewerBackend for Flaky {
        fn send(&mut self, _: &ViewerCommand) -> Result<(), TrackError> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(TrackError::Viewer("unreachable".to_owned()))
            } else {
                Ok(())
            }
        }

        fn dispose(&mut self) {
            self.disposals.set(self.disposals.get() + 1);
        }
    }

    #[test]
    fn failures_do_not_stop_dispatch() {
        let disposals = Rc::new(Cell::new(0));
        let mut conn = ViewerConnection::open(Flaky {
            calls: 0,
            disposals: Rc::clone(&disposals),
        });
        conn.dispatch(&[
            ViewerCommand::Clear,
            ViewerCommand::ClearHighlight,
            ViewerCommand::Clear,
        ]);
        assert_eq!(conn.sent(), 2);
        assert_eq!(conn.failed(), 1);
        assert_eq!(conn.backend().map(|b| b.calls), Some(3));
    }

    #[test]
    fn drop_disposes_exactly_once() {
        let disposals = Rc::new(Cell::new(0));
        {
            let _conn = ViewerConnection::open(Flaky {
                calls: 0,
                disposals: Rc::clone(&disposals),
            });
        }
        assert_eq!(disposals.get(), 1);
    }

    #[test]
    fn close_disposes_and_returns_handle() {
        let conn = ViewerConnection::open(CommandLog::new());
        let log = conn.close().unwrap();
        assert!(log.is_disposed());
    }

    #[test]
    fn script_writer_emits_lines() {
        let mut conn = ViewerConnection::open(ScriptWriter::new(Vec::new()));
        conn.dispatch(&[
            ViewerCommand::select(vec![3]),
            ViewerCommand::style(ViewerStyle::Ribbon),
        ]);
        let out = conn.close().unwrap().into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "select :3\nstyle proteins ribbon\n"
        );
    }
}
