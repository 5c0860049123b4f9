//! Placement mode lifecycle: activation, listener ownership, teardown.

use crate::camera::Camera;
use crate::config::PlacementConfig;
use crate::error::{PlacementError, PlacementResult};
use crate::ghost::{GhostObject, GhostPreview, PreviewRenderer};
use crate::input::{EventKind, PlacementEvent};
use crate::placement::{PlacementAction, PlacementSession, PlacementState};
use crate::projection::{GroundPlane, Surface};
use crate::repository::ObjectRepository;
use crate::template::Template;
use std::collections::HashMap;

/// Token for a set of acquired listeners. Consumed on release.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    id: u64,
}

/// Something that delivers input events and can be subscribed to.
pub trait EventSource {
    /// Start listening for `kinds`.
    fn acquire(&mut self, kinds: &[EventKind]) -> ListenerHandle;
    /// Stop the listeners behind `handle`.
    fn release(&mut self, handle: ListenerHandle);
}

impl<T: EventSource + ?Sized> EventSource for &mut T {
    fn acquire(&mut self, kinds: &[EventKind]) -> ListenerHandle {
        (**self).acquire(kinds)
    }

    fn release(&mut self, handle: ListenerHandle) {
        (**self).release(handle)
    }
}

/// Bookkeeping for which event kinds currently have a listener.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    active: HashMap<u64, Vec<EventKind>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.active.values().any(|kinds| kinds.contains(&kind))
    }

    /// Number of outstanding handles.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether `event` should be delivered. Host updates always pass.
    pub fn accepts(&self, event: &PlacementEvent) -> bool {
        event.kind().is_none_or(|kind| self.is_listening(kind))
    }
}

impl EventSource for ListenerRegistry {
    fn acquire(&mut self, kinds: &[EventKind]) -> ListenerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(id, kinds.to_vec());
        ListenerHandle { id }
    }

    fn release(&mut self, handle: ListenerHandle) {
        self.active.remove(&handle.id);
    }
}

/// Inputs needed to enter placement mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub camera: Option<Camera>,
    pub ground: Option<GroundPlane>,
    pub surface: Surface,
    pub template: Option<Template>,
}

impl Activation {
    pub fn new(camera: Camera, ground: GroundPlane, surface: Surface) -> Self {
        Self {
            camera: Some(camera),
            ground: Some(ground),
            surface,
            template: None,
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }
}

#[derive(Debug)]
struct ActiveMode {
    session: PlacementSession,
    listeners: ListenerHandle,
}

/// Owns the placement session while placement mode is on.
pub struct PlacementController<S: EventSource> {
    source: S,
    config: PlacementConfig,
    active: Option<ActiveMode>,
}

impl<S: EventSource> PlacementController<S> {
    pub fn new(source: S, config: PlacementConfig) -> Self {
        Self {
            source,
            config,
            active: None,
        }
    }

    /// Enter placement mode, replacing any running session.
    pub fn activate(&mut self, activation: Activation) -> PlacementResult<()> {
        let Some(camera) = activation.camera else {
            log::warn!("Placement mode rejected: no camera");
            return Err(PlacementError::MissingCamera);
        };
        let Some(ground) = activation.ground else {
            log::warn!("Placement mode rejected: no ground plane");
            return Err(PlacementError::MissingGroundPlane);
        };

        self.deactivate();
        let session = PlacementSession::new(
            camera,
            ground,
            activation.surface,
            activation.template,
            self.config.probe_size,
        );
        let listeners = self.source.acquire(&EventKind::ALL);
        log::info!(
            "Placement mode activated with template {:?}",
            activation.template.map(|t| t.kind)
        );
        self.active = Some(ActiveMode { session, listeners });
        Ok(())
    }

    /// Leave placement mode. Safe to call when already inactive.
    pub fn deactivate(&mut self) {
        if let Some(mode) = self.active.take() {
            self.source.release(mode.listeners);
            log::info!("Placement mode deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Forward an event to the running session.
    pub fn handle<R>(&mut self, event: PlacementEvent, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        let Some(mode) = self.active.as_mut() else {
            log::trace!("Event ignored: placement mode inactive");
            return None;
        };
        mode.session.handle(event, repo)
    }

    pub fn state(&self) -> PlacementState {
        self.active
            .as_ref()
            .map_or(PlacementState::Inactive, |mode| mode.session.state())
    }

    pub fn session(&self) -> Option<&PlacementSession> {
        self.active.as_ref().map(|mode| &mode.session)
    }

    pub fn ghost(&self) -> Option<&GhostObject> {
        self.session().and_then(PlacementSession::ghost)
    }

    pub fn preview(&self) -> Option<GhostPreview> {
        self.ghost().map(GhostObject::preview)
    }

    /// Hand the current preview (or its absence) to `renderer`.
    pub fn render(&self, renderer: &mut impl PreviewRenderer) {
        renderer.draw_preview(self.preview().as_ref());
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: EventSource> Drop for PlacementController<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;
    use crate::objects::ObjectKind;
    use crate::repository::MemoryRepository;
    use glam::DVec3;
    use kurbo::Point;

    fn activation() -> Activation {
        Activation::new(
            Camera::orthographic(DVec3::new(0.0, 100.0, 0.0), DVec3::ZERO, 600.0),
            GroundPlane::default(),
            Surface::from_size(800.0, 600.0),
        )
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Option<GhostPreview>>,
    }

    impl PreviewRenderer for Recorder {
        fn draw_preview(&mut self, preview: Option<&GhostPreview>) {
            self.frames.push(preview.copied());
        }
    }

    #[test]
    fn test_missing_camera() {
        let mut controller = PlacementController::new(ListenerRegistry::new(), PlacementConfig::default());
        let mut activation = activation();
        activation.camera = None;

        assert_eq!(controller.activate(activation), Err(PlacementError::MissingCamera));
        assert!(!controller.is_active());
        assert_eq!(controller.source().active_count(), 0);
    }

    #[test]
    fn test_missing_ground() {
        let mut controller = PlacementController::new(ListenerRegistry::new(), PlacementConfig::default());
        let mut activation = activation();
        activation.ground = None;

        assert_eq!(controller.activate(activation), Err(PlacementError::MissingGroundPlane));
        assert_eq!(controller.state(), PlacementState::Inactive);
    }

    #[test]
    fn test_rejected_activation_keeps_running_session() {
        let mut controller = PlacementController::new(ListenerRegistry::new(), PlacementConfig::default());
        controller.activate(activation()).unwrap();

        let mut bad = activation();
        bad.camera = None;
        assert!(controller.activate(bad).is_err());
        assert!(controller.is_active());
        assert_eq!(controller.source().active_count(), 1);
    }

    #[test]
    fn test_listeners_acquired_and_released() {
        let mut controller = PlacementController::new(ListenerRegistry::new(), PlacementConfig::default());
        controller.activate(activation()).unwrap();
        for kind in EventKind::ALL {
            assert!(controller.source().is_listening(kind));
        }
        assert_eq!(controller.state(), PlacementState::Idle);

        controller.deactivate();
        assert_eq!(controller.source().active_count(), 0);
        assert!(!controller.source().is_listening(EventKind::PointerMove));

        controller.deactivate();
        assert_eq!(controller.state(), PlacementState::Inactive);
    }

    #[test]
    fn test_reactivate_replaces_session() {
        let mut controller = PlacementController::new(ListenerRegistry::new(), PlacementConfig::default());
        controller.activate(activation()).unwrap();
        controller.activate(activation()).unwrap();
        assert_eq!(controller.source().active_count(), 1);
    }

    #[test]
    fn test_drop_releases_listeners() {
        let mut registry = ListenerRegistry::new();
        {
            let mut controller = PlacementController::new(&mut registry, PlacementConfig::default());
            controller.activate(activation()).unwrap();
            assert_eq!(controller.source().active_count(), 1);
        }
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_inactive_ignores_events() {
        let mut controller = PlacementController::new(ListenerRegistry::new(), PlacementConfig::default());
        let mut repo = MemoryRepository::new();
        let click = PlacementEvent::DoubleClick {
            position: Point::new(405.0, 305.0),
        };
        assert_eq!(controller.handle(click, &mut repo), None);
        assert!(repo.is_empty());

        let mut recorder = Recorder::default();
        controller.render(&mut recorder);
        assert_eq!(recorder.frames, vec![None]);
    }

    #[test]
    fn test_preview_follows_session() {
        let mut controller = PlacementController::new(ListenerRegistry::new(), PlacementConfig::default());
        let mut repo = MemoryRepository::new();
        let floor = *controller.config().template(ObjectKind::Floor).unwrap();
        controller.activate(activation().with_template(floor)).unwrap();

        let mut recorder = Recorder::default();
        controller.render(&mut recorder);
        controller.handle(PlacementEvent::PointerMove { position: Point::new(405.0, 305.0) }, &mut repo);
        controller.render(&mut recorder);
        controller.handle(PlacementEvent::PointerDown { button: PointerButton::Primary }, &mut repo);
        controller.render(&mut recorder);

        assert_eq!(repo.len(), 1);
        assert_eq!(recorder.frames.len(), 3);
        assert!(recorder.frames[0].is_none());
        let valid = recorder.frames[1].unwrap();
        assert_eq!(valid.position, DVec3::new(10.0, 0.0, 10.0));
        assert!(!valid.not_allowed);
        assert!(recorder.frames[2].unwrap().not_allowed);

        controller.deactivate();
        assert!(controller.preview().is_none());
    }
}
