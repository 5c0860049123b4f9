//! Scripted input scenarios replayed against a placement controller.
//!
//! A scenario describes the scene (camera, surface, initial template) and a
//! list of device-level inputs as winit would report them. Replaying runs
//! them through the [`InputBridge`] and the controller, the same path live
//! window input takes.

use crate::bridge::InputBridge;
use crate::error::AppError;
use gridwright_core::{
    Activation, Camera, MemoryRepository, ObjectKind, ObjectRepository, PlacedObject, PlacementAction,
    PlacementConfig, PlacementController, PlacementEvent, PreviewRenderer, Surface, Template,
};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonName {
    Left,
    Right,
    Middle,
}

impl From<ButtonName> for MouseButton {
    fn from(button: ButtonName) -> Self {
        match button {
            ButtonName::Left => MouseButton::Left,
            ButtonName::Right => MouseButton::Right,
            ButtonName::Middle => MouseButton::Middle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Press {
    Pressed,
    Released,
}

impl From<Press> for ElementState {
    fn from(press: Press) -> Self {
        match press {
            Press::Pressed => ElementState::Pressed,
            Press::Released => ElementState::Released,
        }
    }
}

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioInput {
    CursorMoved { x: f64, y: f64 },
    Mouse { button: ButtonName, state: Press },
    /// Physical key by its winit `KeyCode` name, e.g. `ShiftLeft`.
    Key {
        code: String,
        state: Press,
        /// Auto-repeat from a held key.
        #[serde(default)]
        repeat: bool,
    },
    /// Switch template; omit `kind` to clear it.
    Select {
        #[serde(default)]
        kind: Option<ObjectKind>,
    },
    Camera { camera: Camera },
    Resize { width: f64, height: f64 },
    /// Advance the replay clock.
    Wait { ms: u64 },
}

fn default_surface() -> Surface {
    Surface::from_size(800.0, 600.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default = "default_surface")]
    pub surface: Surface,
    /// Template active when placement mode starts.
    #[serde(default)]
    pub template: Option<ObjectKind>,
    pub inputs: Vec<ScenarioInput>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub inserted: usize,
    pub removed: usize,
    /// Repository contents after the last input, in insertion order.
    pub objects: Vec<PlacedObject>,
}

/// Key codes a scenario may name.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let code = match name {
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "KeyR" => KeyCode::KeyR,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "Escape" => KeyCode::Escape,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        _ => return None,
    };
    Some(code)
}

fn lookup_template(config: &PlacementConfig, kind: ObjectKind) -> Result<Template, AppError> {
    config.template(kind).copied().ok_or(AppError::UnknownTemplate(kind))
}

/// Run `scenario` from a fresh repository and return what happened.
pub fn replay(
    scenario: &Scenario,
    config: &PlacementConfig,
    renderer: &mut impl PreviewRenderer,
) -> Result<ReplaySummary, AppError> {
    let template = scenario
        .template
        .map(|kind| lookup_template(config, kind))
        .transpose()?;

    let bridge = InputBridge::new(config.double_click.tracker());
    let mut controller = PlacementController::new(bridge, config.clone());
    let mut repo = MemoryRepository::new();

    let mut activation = Activation::new(scenario.camera, config.ground_plane(), scenario.surface);
    activation.template = template;
    controller.activate(activation)?;

    let mut clock = Instant::now();
    let mut surface = scenario.surface;
    let mut summary = ReplaySummary::default();
    for input in &scenario.inputs {
        let events = translate(input, controller.source_mut(), config, &mut surface, &mut clock)?;
        for event in events {
            match controller.handle(event, &mut repo) {
                Some(PlacementAction::Inserted(_)) => summary.inserted += 1,
                Some(PlacementAction::Removed(_)) => summary.removed += 1,
                None => {}
            }
        }
        controller.render(renderer);
    }
    controller.deactivate();

    summary.objects = repo.placed().into_iter().cloned().collect();
    log::info!(
        "Replay finished: {} inserted, {} removed, {} objects",
        summary.inserted,
        summary.removed,
        summary.objects.len()
    );
    Ok(summary)
}

fn translate(
    input: &ScenarioInput,
    bridge: &mut InputBridge,
    config: &PlacementConfig,
    surface: &mut Surface,
    clock: &mut Instant,
) -> Result<Vec<PlacementEvent>, AppError> {
    let events = match input {
        ScenarioInput::CursorMoved { x, y } => bridge.cursor_moved(PhysicalPosition::new(*x, *y)).into_iter().collect(),
        ScenarioInput::Mouse { button, state } => bridge.mouse_input_at((*state).into(), (*button).into(), *clock),
        ScenarioInput::Key { code, state, repeat } => {
            let code = parse_key_code(code).ok_or_else(|| AppError::UnknownKey(code.clone()))?;
            bridge.keyboard_input((*state).into(), code, *repeat).into_iter().collect()
        }
        ScenarioInput::Select { kind } => {
            let template = kind.map(|kind| lookup_template(config, kind)).transpose()?;
            vec![PlacementEvent::SetTemplate { template }]
        }
        ScenarioInput::Camera { camera } => vec![PlacementEvent::CameraChanged { camera: *camera }],
        ScenarioInput::Resize { width, height } => {
            // Resizing keeps the surface anchored where it was.
            let origin = surface.bounds.abs().origin();
            *surface = Surface::new(Rect::from_origin_size(origin, (*width, *height)));
            vec![PlacementEvent::SurfaceResized { surface: *surface }]
        }
        ScenarioInput::Wait { ms } => {
            *clock += Duration::from_millis(*ms);
            Vec::new()
        }
    };
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::LogRenderer;
    use glam::DVec3;

    /// Top-down orthographic camera, one pixel per world unit.
    const HEADER: &str = r#"
        "camera": {
            "position": [0.0, 100.0, 0.0],
            "target": [0.0, 0.0, 0.0],
            "projection": { "type": "orthographic", "view_height": 600.0, "near": 1.0, "far": 10000.0 }
        },
        "surface": { "bounds": { "x0": 0.0, "y0": 0.0, "x1": 800.0, "y1": 600.0 } }
    "#;

    fn scenario(template: &str, inputs: &str) -> Scenario {
        let json = format!(r#"{{ {HEADER}, "template": {template}, "inputs": [{inputs}] }}"#);
        Scenario::from_json(&json).unwrap()
    }

    fn run(scenario: &Scenario) -> ReplaySummary {
        replay(scenario, &PlacementConfig::default(), &mut LogRenderer::new()).unwrap()
    }

    #[test]
    fn test_minimal_scenario_defaults() {
        let scenario = Scenario::from_json(r#"{ "inputs": [] }"#).unwrap();
        assert_eq!(scenario.camera, Camera::default());
        assert_eq!(scenario.surface, default_surface());
        assert_eq!(scenario.template, None);
        assert_eq!(run(&scenario), ReplaySummary::default());
    }

    #[test]
    fn test_drag_paints_floor() {
        let scenario = scenario(
            r#""FLOOR""#,
            r#"
            { "type": "cursor_moved", "x": 405.0, "y": 305.0 },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "cursor_moved", "x": 425.0, "y": 305.0 },
            { "type": "cursor_moved", "x": 445.0, "y": 305.0 },
            { "type": "mouse", "button": "left", "state": "released" },
            { "type": "cursor_moved", "x": 465.0, "y": 305.0 }
            "#,
        );
        let summary = run(&scenario);
        assert_eq!(summary.inserted, 3);
        let xs: Vec<_> = summary.objects.iter().map(|o| o.position.x).collect();
        assert_eq!(xs, vec![10.0, 30.0, 50.0]);
        assert!(summary.objects.iter().all(|o| o.kind == ObjectKind::Floor));
    }

    #[test]
    fn test_shift_click_removes_wall() {
        let scenario = scenario(
            r#""WALL""#,
            r#"
            { "type": "cursor_moved", "x": 405.0, "y": 305.0 },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "released" },
            { "type": "cursor_moved", "x": 425.0, "y": 305.0 },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "released" },
            { "type": "key", "code": "ShiftLeft", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "released" },
            { "type": "key", "code": "ShiftLeft", "state": "released" }
            "#,
        );
        let summary = run(&scenario);
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.objects.len(), 1);
        assert_eq!(summary.objects[0].position, DVec3::new(20.0, 15.0, 10.0));
    }

    #[test]
    fn test_double_click_does_not_duplicate() {
        let scenario = scenario(
            r#""FLOOR""#,
            r#"
            { "type": "cursor_moved", "x": 405.0, "y": 305.0 },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "released" },
            { "type": "wait", "ms": 100 },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "released" }
            "#,
        );
        let summary = run(&scenario);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.objects.len(), 1);
    }

    #[test]
    fn test_rotate_and_select() {
        let scenario = scenario(
            "null",
            r#"
            { "type": "cursor_moved", "x": 405.0, "y": 305.0 },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "released" },
            { "type": "select", "kind": "WINDOW" },
            { "type": "key", "code": "KeyR", "state": "pressed" },
            { "type": "key", "code": "KeyR", "state": "released" },
            { "type": "mouse", "button": "left", "state": "pressed" },
            { "type": "mouse", "button": "left", "state": "released" }
            "#,
        );
        let summary = run(&scenario);
        assert_eq!(summary.inserted, 1);
        let window = &summary.objects[0];
        assert_eq!(window.kind, ObjectKind::Window);
        assert_eq!(window.yaw, gridwright_core::Yaw::Deg90);
        assert_eq!(window.position, DVec3::new(20.0, 20.0, 10.0));
    }

    #[test]
    fn test_resize_keeps_surface_origin() {
        let json = r#"{
            "camera": {
                "position": [0.0, 100.0, 0.0],
                "target": [0.0, 0.0, 0.0],
                "projection": { "type": "orthographic", "view_height": 600.0, "near": 1.0, "far": 10000.0 }
            },
            "surface": { "bounds": { "x0": 200.0, "y0": 0.0, "x1": 1000.0, "y1": 600.0 } },
            "template": "FLOOR",
            "inputs": [
                { "type": "resize", "width": 800.0, "height": 600.0 },
                { "type": "cursor_moved", "x": 605.0, "y": 305.0 },
                { "type": "mouse", "button": "left", "state": "pressed" }
            ]
        }"#;
        let summary = run(&Scenario::from_json(json).unwrap());
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.objects[0].position, DVec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_held_rotate_key_toggles_once() {
        let scenario = scenario(
            r#""WALL""#,
            r#"
            { "type": "cursor_moved", "x": 405.0, "y": 305.0 },
            { "type": "key", "code": "KeyR", "state": "pressed" },
            { "type": "key", "code": "KeyR", "state": "pressed", "repeat": true },
            { "type": "key", "code": "KeyR", "state": "pressed", "repeat": true },
            { "type": "key", "code": "KeyR", "state": "released" },
            { "type": "mouse", "button": "left", "state": "pressed" }
            "#,
        );
        let summary = run(&scenario);
        assert_eq!(summary.objects[0].yaw, gridwright_core::Yaw::Deg90);
    }

    #[test]
    fn test_unknown_key() {
        let scenario = scenario(r#""FLOOR""#, r#"{ "type": "key", "code": "Hyper", "state": "pressed" }"#);
        let result = replay(&scenario, &PlacementConfig::default(), &mut LogRenderer::new());
        assert!(matches!(result, Err(AppError::UnknownKey(code)) if code == "Hyper"));
    }

    #[test]
    fn test_unconfigured_template() {
        let config = PlacementConfig {
            templates: vec![Template::default_for(ObjectKind::Floor)],
            ..PlacementConfig::default()
        };
        let scenario = scenario(r#""WALL""#, "");
        let result = replay(&scenario, &config, &mut LogRenderer::new());
        assert!(matches!(result, Err(AppError::UnknownTemplate(ObjectKind::Wall))));
    }

    #[test]
    fn test_renderer_sees_every_input() {
        let scenario = scenario(
            r#""FLOOR""#,
            r#"
            { "type": "cursor_moved", "x": 405.0, "y": 305.0 },
            { "type": "resize", "width": 800.0, "height": 600.0 }
            "#,
        );
        let mut renderer = LogRenderer::new();
        replay(&scenario, &PlacementConfig::default(), &mut renderer).unwrap();
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.last().unwrap().position, DVec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        std::fs::write(&path, r#"{ "template": "FLOOR", "inputs": [ { "type": "wait", "ms": 10 } ] }"#).unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.template, Some(ObjectKind::Floor));
        assert_eq!(scenario.inputs, vec![ScenarioInput::Wait { ms: 10 }]);

        assert!(matches!(Scenario::load(dir.path().join("missing.json")), Err(AppError::Io(_))));
    }
}
