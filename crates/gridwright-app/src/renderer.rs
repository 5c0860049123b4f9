//! Preview renderer that writes ghost changes to the log.

use gridwright_core::{GhostPreview, PreviewRenderer};

/// Logs the ghost whenever it changes.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: Option<GhostPreview>,
    frames: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last(&self) -> Option<&GhostPreview> {
        self.last.as_ref()
    }
}

impl PreviewRenderer for LogRenderer {
    fn draw_preview(&mut self, preview: Option<&GhostPreview>) {
        self.frames += 1;
        if preview == self.last.as_ref() {
            return;
        }
        match preview {
            Some(ghost) => log::debug!(
                "Ghost {} at {} yaw {}°{}",
                ghost.geometry.label,
                ghost.position,
                ghost.yaw.degrees(),
                if ghost.not_allowed { " (blocked)" } else { "" }
            ),
            None => log::debug!("Ghost cleared"),
        }
        self.last = preview.copied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use gridwright_core::{GhostObject, ObjectKind, Template};

    #[test]
    fn test_tracks_last_preview() {
        let mut renderer = LogRenderer::new();
        let ghost = GhostObject::from_template(&Template::default_for(ObjectKind::Floor), DVec3::ZERO);
        let preview = ghost.preview();

        renderer.draw_preview(Some(&preview));
        renderer.draw_preview(Some(&preview));
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.last(), Some(&preview));

        renderer.draw_preview(None);
        assert_eq!(renderer.last(), None);
    }
}
