use tracemark::Config;
use tracemark::host::StaticHost;
use tracemark::input::{InputEvent, Tool};
use tracemark::overlay::{Overlay, OverlayError};

fn mount(width: f64, height: f64, ratio: f64) -> Overlay<StaticHost> {
    let mut overlay = Overlay::new(Config::default());
    overlay
        .mount(StaticHost::new(width, height, ratio))
        .unwrap();
    overlay
}

fn stroke(overlay: &mut Overlay<StaticHost>, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    overlay.dispatch(InputEvent::PointerDown {
        x: first.0,
        y: first.1,
    });
    for &(x, y) in rest {
        overlay.dispatch(InputEvent::PointerMove { x, y });
    }
    overlay.dispatch(InputEvent::PointerUp);
}

fn pixels(overlay: &mut Overlay<StaticHost>) -> Vec<u8> {
    overlay
        .canvas_mut()
        .unwrap()
        .surface_mut()
        .pixels()
        .unwrap()
}

fn alpha(overlay: &mut Overlay<StaticHost>, x: f64, y: f64) -> u8 {
    overlay
        .canvas_mut()
        .unwrap()
        .surface_mut()
        .alpha_at(x, y)
        .unwrap()
}

fn resize(overlay: &mut Overlay<StaticHost>, width: f64, height: f64, ratio: f64) {
    let host = overlay.host_mut().unwrap();
    host.set_content_size(width, height);
    host.set_device_pixel_ratio(ratio);
    overlay.on_resize();
}

#[test]
fn resize_larger_then_back_restores_identical_pixels() {
    let mut overlay = mount(160.0, 120.0, 1.0);
    overlay.set_tool(Tool::Pencil);
    stroke(&mut overlay, &[(10.0, 10.0), (80.0, 60.0), (150.0, 20.0)]);
    overlay.set_tool(Tool::Erase);
    stroke(&mut overlay, &[(80.0, 0.0), (80.0, 120.0)]);
    let before = pixels(&mut overlay);

    resize(&mut overlay, 400.0, 300.0, 2.0);
    assert_eq!(
        overlay.canvas().unwrap().surface().backing_size(),
        Some((800, 600))
    );
    resize(&mut overlay, 160.0, 120.0, 1.0);

    assert_eq!(pixels(&mut overlay), before);
    assert!(overlay.can_undo());
}

#[test]
fn dense_display_keeps_logical_coordinates() {
    let mut overlay = mount(100.0, 100.0, 3.0);
    overlay.set_tool(Tool::Pencil);
    stroke(&mut overlay, &[(10.0, 50.0), (90.0, 50.0)]);

    let canvas = overlay.canvas().unwrap();
    assert_eq!(canvas.surface().backing_size(), Some((300, 300)));
    assert_eq!(alpha(&mut overlay, 50.0, 50.0), 255);
    assert_eq!(alpha(&mut overlay, 50.0, 80.0), 0);
}

#[test]
fn device_pixel_ratio_is_capped_by_config() {
    let mut config = Config::default();
    config.surface.max_scale = 2.0;
    let mut overlay = Overlay::new(config);
    overlay.mount(StaticHost::new(50.0, 40.0, 3.0)).unwrap();

    let canvas = overlay.canvas().unwrap();
    assert_eq!(canvas.surface().scale(), 2.0);
    assert_eq!(canvas.surface().backing_size(), Some((100, 80)));
}

#[test]
fn a_b_undo_redo_scenario() {
    let mut overlay = mount(200.0, 100.0, 1.0);
    overlay.set_tool(Tool::Pencil);
    stroke(&mut overlay, &[(20.0, 30.0), (180.0, 30.0)]);
    stroke(&mut overlay, &[(20.0, 70.0), (180.0, 70.0)]);

    overlay.undo();
    assert_eq!(alpha(&mut overlay, 100.0, 30.0), 255);
    assert_eq!(alpha(&mut overlay, 100.0, 70.0), 0);
    assert!(overlay.can_redo());

    overlay.redo();
    assert_eq!(alpha(&mut overlay, 100.0, 70.0), 255);
    assert!(!overlay.can_redo());
}

#[test]
fn tool_switch_mid_gesture_commits_nothing() {
    let mut overlay = mount(200.0, 100.0, 1.0);
    overlay.set_tool(Tool::Pencil);
    overlay.dispatch(InputEvent::PointerDown { x: 20.0, y: 50.0 });
    overlay.dispatch(InputEvent::PointerMove { x: 120.0, y: 50.0 });
    overlay.dispatch(InputEvent::SetTool { tool: Tool::Select });
    overlay.dispatch(InputEvent::PointerUp);

    assert!(!overlay.can_undo());
    assert_eq!(alpha(&mut overlay, 70.0, 50.0), 0);
}

#[test]
fn clear_then_undo_brings_strokes_back() {
    let mut overlay = mount(200.0, 100.0, 2.0);
    overlay.set_tool(Tool::Pencil);
    stroke(&mut overlay, &[(20.0, 50.0), (180.0, 50.0)]);

    assert!(overlay.dispatch(InputEvent::Clear));
    assert_eq!(alpha(&mut overlay, 100.0, 50.0), 0);

    overlay.dispatch(InputEvent::Undo);
    assert_eq!(alpha(&mut overlay, 100.0, 50.0), 255);
}

#[test]
fn delete_ignored_outside_select_tool() {
    let mut overlay = mount(200.0, 100.0, 1.0);
    overlay.set_tool(Tool::Pencil);
    stroke(&mut overlay, &[(20.0, 50.0), (180.0, 50.0)]);

    assert!(!overlay.delete_selection());
    assert_eq!(overlay.canvas().unwrap().scene().len(), 1);
}

#[test]
fn double_mount_is_rejected() {
    let mut overlay = mount(10.0, 10.0, 1.0);
    assert!(matches!(
        overlay.mount(StaticHost::new(10.0, 10.0, 1.0)),
        Err(OverlayError::AlreadyMounted)
    ));
}
