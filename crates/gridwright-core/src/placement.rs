//! Placement state machine.
//!
//! A [`PlacementSession`] owns the ghost object while placement mode is
//! active. Every pointer move runs projection, snapping and collision
//! detection in sequence, and insert/delete decisions are only taken on
//! freshly computed validity.
//!
//! ## Gestures
//!
//! - Primary button held, shift up: insert at every valid cell the pointer
//!   crosses (paint while dragging).
//! - Primary button held, shift down: remove the same-kind object under the
//!   ghost (erase while dragging).
//! - Double-click: one-shot insert if the ghost is valid, unless the press
//!   that completed it already inserted or removed something.
//! - Rotate key: toggle the ghost's yaw.

use crate::camera::Camera;
use crate::collision;
use crate::ghost::GhostObject;
use crate::input::{InputState, Key, PlacementEvent, PointerButton};
use crate::objects::{ObjectId, PlacedObject};
use crate::projection::{GroundPlane, Surface, project_pointer};
use crate::repository::ObjectRepository;
use crate::snap::snap_position;
use crate::template::Template;
use kurbo::Point;

/// Observable state of placement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    /// Placement mode is off; no ghost is rendered.
    Inactive,
    /// Mode is on but there is no template or no pointer data yet.
    Idle,
    /// The ghost can be placed.
    PreviewingValid,
    /// The ghost collides or sits on a delete target.
    PreviewingBlocked,
}

/// Repository mutation performed in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementAction {
    Inserted(PlacedObject),
    Removed(ObjectId),
}

/// Live placement state for one activation of placement mode.
#[derive(Debug, Clone)]
pub struct PlacementSession {
    camera: Camera,
    ground: GroundPlane,
    surface: Surface,
    template: Option<Template>,
    ghost: Option<GhostObject>,
    input: InputState,
    /// The last primary press changed the repository.
    press_consumed: bool,
    probe_size: f64,
}

impl PlacementSession {
    pub fn new(
        camera: Camera,
        ground: GroundPlane,
        surface: Surface,
        template: Option<Template>,
        probe_size: f64,
    ) -> Self {
        Self {
            camera,
            ground,
            surface,
            template,
            ghost: None,
            input: InputState::new(),
            press_consumed: false,
            probe_size,
        }
    }

    pub fn state(&self) -> PlacementState {
        match &self.ghost {
            None => PlacementState::Idle,
            Some(ghost) if ghost.not_allowed => PlacementState::PreviewingBlocked,
            Some(_) => PlacementState::PreviewingValid,
        }
    }

    pub fn ghost(&self) -> Option<&GhostObject> {
        self.ghost.as_ref()
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Process one event, mutating `repo` when a gesture qualifies.
    ///
    /// Button and modifier state is tracked even without a template, so a
    /// template selected mid-gesture sees the real key state.
    pub fn handle<R>(&mut self, event: PlacementEvent, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        self.input.apply(&event);
        let press_consumed = std::mem::take(&mut self.press_consumed);
        match event {
            PlacementEvent::PointerMove { position } => self.on_pointer_move(position, repo),
            PlacementEvent::PointerDown { button } => {
                let action = self.on_pointer_down(button, repo);
                self.press_consumed = action.is_some();
                action
            }
            PlacementEvent::DoubleClick { .. } if press_consumed => {
                log::trace!("Double-click ignored: its press already edited the scene");
                None
            }
            PlacementEvent::PointerUp { .. } => None,
            PlacementEvent::DoubleClick { position } => self.on_double_click(position, repo),
            PlacementEvent::KeyDown { key: Key::Rotate } => {
                self.rotate();
                None
            }
            PlacementEvent::KeyDown { .. } | PlacementEvent::KeyUp { .. } => None,
            PlacementEvent::SetTemplate { template } => {
                self.set_template(template, repo);
                None
            }
            PlacementEvent::CameraChanged { camera } => {
                self.camera = camera;
                None
            }
            PlacementEvent::SurfaceResized { surface } => {
                self.surface = surface;
                None
            }
        }
    }

    fn on_pointer_move<R>(&mut self, position: Point, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        if !self.reposition(position, repo) {
            return None;
        }
        self.apply_drag_rule(repo)
    }

    fn on_pointer_down<R>(&mut self, button: PointerButton, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        if button != PointerButton::Primary || self.template.is_none() {
            return None;
        }
        // The repository may have changed since the last move.
        self.revalidate(repo);
        self.apply_drag_rule(repo)
    }

    fn on_double_click<R>(&mut self, position: Point, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        if self.template.is_none() {
            return None;
        }
        if !self.reposition(position, repo) {
            self.revalidate(repo);
        }
        let valid = self.ghost.as_ref().is_some_and(|ghost| !ghost.not_allowed);
        if valid {
            self.insert(repo)
        } else {
            None
        }
    }

    /// Toggle yaw on the template and the live ghost.
    fn rotate(&mut self) {
        let Some(template) = self.template.as_mut() else {
            log::trace!("Rotate ignored: no active template");
            return;
        };
        template.yaw = template.yaw.toggle();
        if let Some(ghost) = self.ghost.as_mut() {
            ghost.yaw = template.yaw;
        }
    }

    fn set_template<R>(&mut self, template: Option<Template>, repo: &R)
    where
        R: ObjectRepository + ?Sized,
    {
        log::debug!("Placement template set to {:?}", template.map(|t| t.kind));
        self.template = template;
        self.ghost = None;
        if let Some(pointer) = self.input.pointer {
            self.reposition(pointer, repo);
        }
    }

    /// Move the ghost under `pointer` and validate it.
    ///
    /// Returns false when there is no template or the ray misses the ground,
    /// in which case the ghost is left untouched.
    fn reposition<R>(&mut self, pointer: Point, repo: &R) -> bool
    where
        R: ObjectRepository + ?Sized,
    {
        let Some(template) = self.template else {
            log::trace!("Pointer ignored: no active template");
            return false;
        };
        let Some(hit) = project_pointer(pointer, &self.surface, &self.camera, &self.ground) else {
            log::trace!("Pointer ray missed the ground plane at {pointer:?}");
            return false;
        };
        let position = snap_position(hit, &template.step, template.elevation);
        let ghost = self
            .ghost
            .get_or_insert_with(|| GhostObject::from_template(&template, position));
        ghost.position = position;
        self.revalidate(repo);
        true
    }

    /// Recompute the ghost's validity against the repository's current contents.
    fn revalidate<R>(&mut self, repo: &R)
    where
        R: ObjectRepository + ?Sized,
    {
        if let Some(ghost) = self.ghost.as_mut() {
            let placed = repo.placed();
            let report = collision::detect(ghost.position, ghost.kind, self.probe_size, &placed);
            ghost.apply_report(report);
        }
    }

    /// Insert or remove while the primary button is held.
    fn apply_drag_rule<R>(&mut self, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        if !self.input.primary_down {
            return None;
        }
        let ghost = self.ghost.as_ref()?;
        let (not_allowed, target) = (ghost.not_allowed, ghost.delete_target);

        match (not_allowed, self.input.delete_mode, target) {
            (false, false, _) => self.insert(repo),
            (true, true, Some(target)) => self.remove(target, repo),
            _ => None,
        }
    }

    fn insert<R>(&mut self, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        let object = self.ghost.as_ref()?.commit();
        log::debug!("Placed {:?} {} at {}", object.kind, object.id, object.position);
        repo.insert(object.clone());
        self.revalidate(repo);
        Some(PlacementAction::Inserted(object))
    }

    fn remove<R>(&mut self, id: ObjectId, repo: &mut R) -> Option<PlacementAction>
    where
        R: ObjectRepository + ?Sized,
    {
        let removed = repo.remove(id);
        self.revalidate(repo);
        let object = removed?;
        log::debug!("Removed {:?} {} at {}", object.kind, object.id, object.position);
        Some(PlacementAction::Removed(id))
    }
}
