use eframe::egui::ViewportCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FullscreenError {
    #[error("the window system did not report full-screen support")]
    Unsupported,
}

/// Platform full-screen control. Requests may be refused; callers log and move on.
pub trait Fullscreen {
    fn request(&mut self) -> Result<(), FullscreenError>;

    fn exit(&mut self) -> Result<(), FullscreenError>;

    fn is_active(&self) -> bool;

    fn toggle(&mut self) -> Result<(), FullscreenError> {
        if self.is_active() {
            self.exit()
        } else {
            self.request()
        }
    }
}

/// Full-screen through eframe viewport commands.
///
/// Commands are queued and sent by the app after input handling, since
/// sending them from inside `ctx.input()` deadlocks.
#[derive(Debug, Default)]
pub struct ViewportFullscreen {
    /// Last state reported by the viewport; `None` when it reports nothing
    reported: Option<bool>,
    queued: Vec<ViewportCommand>,
}

impl ViewportFullscreen {
    pub fn observe(&mut self, fullscreen: Option<bool>) {
        self.reported = fullscreen;
    }

    pub fn take_commands(&mut self) -> Vec<ViewportCommand> {
        std::mem::take(&mut self.queued)
    }
}

impl Fullscreen for ViewportFullscreen {
    fn request(&mut self) -> Result<(), FullscreenError> {
        match self.reported {
            None => Err(FullscreenError::Unsupported),
            Some(true) => Ok(()),
            Some(false) => {
                self.queued.push(ViewportCommand::Fullscreen(true));
                self.reported = Some(true);
                Ok(())
            }
        }
    }

    fn exit(&mut self) -> Result<(), FullscreenError> {
        if self.reported == Some(true) {
            self.queued.push(ViewportCommand::Fullscreen(false));
            self.reported = Some(false);
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.reported == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_report_is_rejected() {
        let mut fs = ViewportFullscreen::default();
        assert_eq!(fs.request(), Err(FullscreenError::Unsupported));
        assert!(fs.take_commands().is_empty());
    }

    #[test]
    fn test_request_and_exit_queue_commands() {
        let mut fs = ViewportFullscreen::default();
        fs.observe(Some(false));
        fs.request().unwrap();
        fs.request().unwrap();
        assert!(fs.is_active());
        let cmds = fs.take_commands();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], ViewportCommand::Fullscreen(true)));

        fs.exit().unwrap();
        fs.exit().unwrap();
        let cmds = fs.take_commands();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], ViewportCommand::Fullscreen(false)));
    }

    #[test]
    fn test_exit_when_windowed_does_nothing() {
        let mut fs = ViewportFullscreen::default();
        fs.observe(Some(false));
        fs.exit().unwrap();
        assert!(fs.take_commands().is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut fs = ViewportFullscreen::default();
        fs.observe(Some(true));
        fs.toggle().unwrap();
        assert!(!fs.is_active());
        fs.toggle().unwrap();
        assert!(fs.is_active());
        assert_eq!(fs.take_commands().len(), 2);
    }
}
