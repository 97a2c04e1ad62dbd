//! End-to-end scenarios: a host mounts a stage, scrubs through the whole
//! timeline, resizes mid-scrub, and unmounts. Exercises the acceptance
//! properties across module boundaries with a recording host.

use std::cell::RefCell;
use std::rc::Rc;

use scrollstage::{
    EffectTarget, EffectTargetRegistry, GeometryProbe, PanelDescriptor, PhaseKind,
    PortalVisibility, Rect, ScrollRegion, Stage, TransformSink, TransformState, VerticalReveal,
};

// ---------------------------------------------------------------------------
// Recording host
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Host {
    panels: Rc<RefCell<Vec<PanelDescriptor>>>,
    viewport: Rc<RefCell<Rect>>,
    nav_slot: Rc<RefCell<Option<Rect>>>,
}

impl Host {
    fn new(panels: Vec<PanelDescriptor>, viewport: Rect) -> Self {
        Self {
            panels: Rc::new(RefCell::new(panels)),
            viewport: Rc::new(RefCell::new(viewport)),
            nav_slot: Rc::new(RefCell::new(Some(Rect::new(1400.0, 12.0, 160.0, 48.0)))),
        }
    }
}

impl GeometryProbe for Host {
    fn panels(&self) -> Vec<PanelDescriptor> {
        self.panels.borrow().clone()
    }

    fn nav_slot(&self) -> Option<Rect> {
        *self.nav_slot.borrow()
    }

    fn viewport(&self) -> Rect {
        *self.viewport.borrow()
    }
}

#[derive(Debug, Clone, Default)]
struct Region {
    length: Rc<RefCell<f64>>,
    released: Rc<RefCell<bool>>,
}

impl ScrollRegion for Region {
    fn set_length(&mut self, px: f64) {
        *self.length.borrow_mut() = px;
    }

    fn release(&mut self) {
        *self.released.borrow_mut() = true;
    }
}

/// Keeps only the latest transform per layer, like a real style writer.
#[derive(Debug, Default)]
struct LayerStore {
    current: [Option<TransformState>; EffectTarget::COUNT],
}

impl LayerStore {
    fn get(&self, target: EffectTarget) -> TransformState {
        self.current[target.index()].expect("layer never written")
    }
}

impl TransformSink for LayerStore {
    type Handle = EffectTarget;

    fn apply(&mut self, handle: &Self::Handle, state: &TransformState) {
        self.current[handle.index()] = Some(*state);
    }
}

fn registry() -> EffectTargetRegistry<EffectTarget> {
    let mut registry = EffectTargetRegistry::new();
    for target in EffectTarget::ALL {
        registry.register(target, target);
    }
    registry
}

fn landing_panels() -> Vec<PanelDescriptor> {
    vec![
        PanelDescriptor::new(0, 0.0),
        PanelDescriptor::new(1, 800.0).with_vertical(VerticalReveal::new(1800.0).multiplier(1.5)),
        PanelDescriptor::new(2, 600.0),
        PanelDescriptor::new(3, 400.0),
    ]
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn full_scrub_forward_and_back() {
    let host = Host::new(landing_panels(), Rect::from_size(1600.0, 1000.0));
    let mut stage = Stage::mount(host, Region::default(), registry(), LayerStore::default());

    // 1000 intro + 1000 group + 1200 reveal + 800 + 600 = 4600.
    let total = stage.timeline().total_duration();
    assert_eq!(total, 4600.0);

    // Forward scrub in 10px steps: panel displacement magnitude never
    // shrinks, opacity stays in range, no panic anywhere.
    let mut prev_x = 0.0f64;
    let mut transitions = Vec::new();
    let mut offset = 0.0;
    while offset <= total {
        let update = stage.handle_scroll(offset);
        if let Some(state) = update.portal {
            transitions.push((offset, state));
        }
        let x = stage.sink().get(EffectTarget::PanelContainer).x;
        assert!(x.abs() >= prev_x - 1e-9);
        prev_x = x.abs();
        offset += 10.0;
    }
    assert_eq!(transitions.len(), 1, "exactly one hide on the way in");
    assert_eq!(transitions[0].1, PortalVisibility::Hidden);

    // End state: panels 0..=2 slid out.
    assert_eq!(stage.handle_scroll(total).progress.progress, 1.0);
    assert_eq!(stage.sink().get(EffectTarget::PanelContainer).x, -1400.0);
    assert_eq!(stage.sink().get(EffectTarget::VerticalContent).y, -800.0);

    // Scrub all the way back: everything returns to its rest state.
    let update = stage.handle_scroll(0.0);
    assert_eq!(update.portal, Some(PortalVisibility::Visible));
    assert_eq!(
        stage.sink().get(EffectTarget::PanelContainer),
        TransformState::IDENTITY
    );
    assert_eq!(
        stage.sink().get(EffectTarget::PortalFrontText),
        TransformState::scaled(1.0, 1.0)
    );
}

#[test]
fn spacer_scenario_phase_inventory() {
    let host = Host::new(
        vec![
            PanelDescriptor::new(0, 0.0),
            PanelDescriptor::new(1, 800.0),
            PanelDescriptor::new(2, 600.0),
        ],
        Rect::from_size(1600.0, 1000.0),
    );
    let stage = Stage::mount(host, Region::default(), registry(), LayerStore::default());

    let timeline = stage.timeline();
    assert_eq!(timeline.total_duration(), 2800.0);
    assert_eq!(timeline.count_of_kind(PhaseKind::Intro), 3);
    assert_eq!(timeline.count_of_kind(PhaseKind::LogoTransit), 1);
    assert_eq!(timeline.count_of_kind(PhaseKind::VerticalSlide), 0);

    let container_slides: Vec<_> = timeline
        .phases()
        .iter()
        .filter(|p| p.kind == PhaseKind::HorizontalSlide && p.target == EffectTarget::PanelContainer)
        .collect();
    assert_eq!(container_slides.len(), 2);
    assert_eq!(container_slides[0].duration, 0.0);
    assert_eq!(container_slides[1].duration, 800.0);
}

#[test]
fn resize_mid_scrub_keeps_visual_position() {
    let host = Host::new(landing_panels(), Rect::from_size(1600.0, 1000.0));
    let mut stage = Stage::mount(
        host.clone(),
        Region::default(),
        registry(),
        LayerStore::default(),
    );

    stage.handle_scroll(2300.0);
    let fraction = stage.progress();
    assert_eq!(fraction, 0.5);

    // Viewport shrinks; intro and transit shorten accordingly.
    *host.viewport.borrow_mut() = Rect::from_size(1200.0, 800.0);
    let update = stage.handle_resize();

    // 800 + 800 + (1800-800)*1.5 + 800 + 600 = 4500.
    assert_eq!(stage.timeline().total_duration(), 4500.0);
    assert_eq!(update.progress.progress, 0.5, "fractional continuity");
}

#[test]
fn region_tracks_rebuilds_and_releases_on_unmount() {
    let host = Host::new(landing_panels(), Rect::from_size(1600.0, 1000.0));
    let region = Region::default();
    let length = Rc::clone(&region.length);
    let released = Rc::clone(&region.released);

    {
        let mut stage = Stage::mount(host.clone(), region, registry(), LayerStore::default());
        assert_eq!(*length.borrow(), 4600.0);

        host.panels.borrow_mut().truncate(2);
        stage.handle_resize();
        // [spacer, vertical-800-last]: intro + group + reveal, no slide
        // for the (now last) vertical panel: 1000 + 1000 + 1200 = 3200.
        assert_eq!(*length.borrow(), 3200.0);
        assert!(!*released.borrow());
    }
    assert!(*released.borrow(), "unmount must release the pinned region");
}

#[test]
fn missing_layers_degrade_without_error() {
    // Host only wires the panel container; every other layer is absent.
    let host = Host::new(landing_panels(), Rect::from_size(1600.0, 1000.0));
    let registry =
        EffectTargetRegistry::new().with(EffectTarget::PanelContainer, EffectTarget::PanelContainer);
    let mut stage = Stage::mount(host, Region::default(), registry, LayerStore::default());

    let update = stage.handle_scroll(2300.0);
    assert_eq!(update.progress.progress, 0.5);
    assert_eq!(
        stage.sink().current[EffectTarget::Logo.index()],
        None,
        "unregistered layers receive no writes"
    );
    assert!(stage.sink().current[EffectTarget::PanelContainer.index()].is_some());
}

#[test]
fn logo_lands_in_the_nav_slot() {
    let host = Host::new(landing_panels(), Rect::from_size(1600.0, 1000.0));
    let mut stage = Stage::mount(host, Region::default(), registry(), LayerStore::default());

    // Transit spans [1000, 2000]; scrub to its end.
    stage.handle_scroll(2000.0);
    let logo = stage.sink().get(EffectTarget::Logo);
    // Nav slot (1400,12,160,48) center (1480,36); viewport center (800,500).
    assert!((logo.x - 680.0).abs() < 1e-6);
    assert!((logo.y - -464.0).abs() < 1e-6);
    assert!((logo.scale - 0.35).abs() < 1e-6);
}
