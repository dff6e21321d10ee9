use std::cell::RefCell;
use std::rc::Rc;

use chart_linkage::chart_set::WindowSelectionScope;
use chart_linkage::linkage::{FrameRequest, GROUP_DEFAULT, SelectionUpdate};
use chart_linkage::model::SeriesSpec;
use chart_linkage::render::{LinearAxis, RecordingRenderingService};
use chart_linkage::window::{MARKER_END_ID, MARKER_START_ID, WindowMarker};
use chart_linkage::{ChartError, ChartSet, ChartSetConfig};

fn series(points: usize) -> Vec<SeriesSpec> {
    let values: Vec<f64> = (0..points).map(|index| index as f64).collect();
    vec![SeriesSpec::from_values("pressure", &values)]
}

fn set_with_charts(config: ChartSetConfig, count: usize, points: usize) -> (ChartSet, RecordingRenderingService) {
    let mut set = ChartSet::new(config).expect("chart set");
    let mut service = RecordingRenderingService::new();
    for _ in 0..count {
        let id = set.add_chart(series(points)).expect("add chart");
        service.insert_instance(id, LinearAxis::new(60.0, 1.0), 300.0);
    }
    assert_eq!(set.render_all(&mut service), count);
    (set, service)
}

fn marker<'a>(set: &'a ChartSet, chart_id: &str, marker_id: &str) -> &'a WindowMarker {
    set.chart(chart_id)
        .and_then(|chart| chart.markers().pair())
        .and_then(|pair| pair.get(marker_id))
        .expect("placed marker")
}

#[test]
fn render_places_markers_at_domain_thirds() {
    let (set, _) = set_with_charts(ChartSetConfig::default(), 1, 9);
    assert_eq!(marker(&set, "echart1", MARKER_START_ID).axis_index, 3);
    assert_eq!(marker(&set, "echart1", MARKER_END_ID).axis_index, 6);
    assert_eq!(marker(&set, "echart1", MARKER_END_ID).axis_value, "7");
}

#[test]
fn drag_on_one_chart_moves_the_same_marker_everywhere() {
    let (mut set, mut service) = set_with_charts(ChartSetConfig::default(), 3, 1000);
    for id in ["echart1", "echart2", "echart3"] {
        set.place_markers(id, &mut service, [300, 500]).expect("place markers");
    }

    let request = set
        .on_marker_drag("echart1", MARKER_END_ID, 760.0)
        .expect("drag accepted");
    assert_eq!(request, FrameRequest::Schedule);
    let updates = set.run_frame(&mut service);
    assert_eq!(updates.len(), 1);

    let reference = marker(&set, "echart1", MARKER_END_ID).clone();
    assert_eq!(reference.axis_index, 700);
    assert_eq!(reference.axis_value, "701");
    for id in ["echart1", "echart2", "echart3"] {
        assert_eq!(marker(&set, id, MARKER_END_ID), &reference);
        assert_eq!(marker(&set, id, MARKER_START_ID).axis_index, 300);
    }

    let update = &updates[0];
    assert_eq!(update.entries.len(), 3);
    let source = update.entry("echart1").expect("source entry");
    assert!(source.is_source_of_this_update);
    assert!(!update.entry("echart2").expect("linked entry").is_source_of_this_update);
}

#[test]
fn drags_within_one_frame_emit_once_with_last_geometry() {
    let (mut set, mut service) = set_with_charts(ChartSetConfig::default(), 2, 100);

    let requests: Vec<FrameRequest> = [70.0, 80.0, 90.0, 95.0]
        .into_iter()
        .map(|pixel| {
            set.on_marker_drag("echart1", MARKER_START_ID, pixel)
                .expect("drag accepted")
        })
        .collect();
    assert_eq!(requests[0], FrameRequest::Schedule);
    assert!(requests[1..].iter().all(|request| *request == FrameRequest::Coalesced));

    let updates = set.run_frame(&mut service);
    assert_eq!(updates.len(), 1);
    assert_eq!(marker(&set, "echart1", MARKER_START_ID).axis_index, 35);
    assert_eq!(marker(&set, "echart2", MARKER_START_ID).axis_index, 35);

    assert!(set.run_frame(&mut service).is_empty());
}

#[test]
fn drag_beyond_the_axis_snaps_to_the_last_key() {
    let (mut set, mut service) = set_with_charts(ChartSetConfig::default(), 1, 10);
    set.on_marker_drag("echart1", MARKER_END_ID, 5000.0)
        .expect("drag accepted");
    set.run_frame(&mut service);

    let end = marker(&set, "echart1", MARKER_END_ID);
    assert_eq!(end.axis_index, 9);
    assert!((end.pixel_x - 69.0).abs() < f64::EPSILON);
}

#[test]
fn zoom_recomputes_markers_from_pixels() {
    let (mut set, mut service) = set_with_charts(ChartSetConfig::default(), 2, 1000);
    for id in ["echart1", "echart2"] {
        set.place_markers(id, &mut service, [300, 500]).expect("place markers");
    }
    for id in ["echart1", "echart2"] {
        service
            .set_axis(id, LinearAxis::new(60.0, 2.0))
            .expect("zoomed axis");
    }

    assert_eq!(set.on_zoom("echart2").expect("zoom accepted"), FrameRequest::Schedule);
    let updates = set.run_frame(&mut service);
    assert_eq!(updates.len(), 1);
    for id in ["echart1", "echart2"] {
        assert_eq!(marker(&set, id, MARKER_START_ID).axis_index, 150);
        assert_eq!(marker(&set, id, MARKER_END_ID).axis_index, 250);
    }
}

fn set_with_lengths(lengths: &[usize]) -> (ChartSet, RecordingRenderingService) {
    let mut set = ChartSet::new(ChartSetConfig::default()).expect("chart set");
    let mut service = RecordingRenderingService::new();
    for points in lengths {
        let id = set.add_chart(series(*points)).expect("add chart");
        service.insert_instance(id, LinearAxis::new(60.0, 1.0), 300.0);
    }
    set.render_all(&mut service);
    (set, service)
}

#[test]
fn linked_drag_is_clamped_into_a_shorter_domain() {
    let (mut set, mut service) = set_with_lengths(&[100, 10]);
    assert_eq!(marker(&set, "echart2", MARKER_START_ID).axis_index, 3);

    set.on_marker_drag("echart1", MARKER_END_ID, 140.0)
        .expect("drag accepted");
    set.run_frame(&mut service);

    assert_eq!(marker(&set, "echart1", MARKER_END_ID).axis_index, 80);
    let follower = marker(&set, "echart2", MARKER_END_ID);
    assert_eq!(follower.marker_id, MARKER_END_ID);
    assert_eq!(follower.axis_index, 9);
    assert_eq!(follower.axis_value, "10");
    assert!((follower.pixel_x - 69.0).abs() < f64::EPSILON);
    assert_eq!(marker(&set, "echart2", MARKER_START_ID).axis_index, 3);
}

#[test]
fn zoom_geometry_is_clamped_into_each_receiving_domain() {
    let (mut set, mut service) = set_with_lengths(&[100, 10]);
    set.place_markers("echart1", &mut service, [33, 80])
        .expect("place markers");

    set.on_zoom("echart2").expect("zoom accepted");
    set.run_frame(&mut service);

    assert_eq!(marker(&set, "echart1", MARKER_START_ID).axis_index, 33);
    assert_eq!(marker(&set, "echart1", MARKER_END_ID).axis_index, 80);
    for marker_id in [MARKER_START_ID, MARKER_END_ID] {
        let clamped = marker(&set, "echart2", marker_id);
        assert_eq!(clamped.axis_index, 9);
        assert_eq!(clamped.axis_value, "10");
        assert_eq!(clamped.marker_id, marker_id);
    }
}

#[test]
fn unlinked_set_only_updates_the_source() {
    let (mut set, mut service) =
        set_with_charts(ChartSetConfig::default().with_linkage(false), 2, 100);
    set.on_marker_drag("echart2", MARKER_END_ID, 100.0)
        .expect("drag accepted");
    set.run_frame(&mut service);

    assert_eq!(marker(&set, "echart2", MARKER_END_ID).axis_index, 40);
    assert_eq!(marker(&set, "echart1", MARKER_END_ID).axis_index, 66);
}

#[test]
fn groups_do_not_leak_into_each_other() {
    let config = ChartSetConfig::default().with_groups(vec![vec![1, 2], vec![3]]);
    let (mut set, mut service) = set_with_charts(config, 3, 100);
    assert_eq!(set.chart("echart3").map(|chart| chart.group()), Some("group2"));

    set.on_marker_drag("echart1", MARKER_START_ID, 70.0)
        .expect("drag accepted");
    let updates = set.run_frame(&mut service);

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].group, "group1");
    assert_eq!(marker(&set, "echart2", MARKER_START_ID).axis_index, 10);
    assert_eq!(marker(&set, "echart3", MARKER_START_ID).axis_index, 33);
}

#[test]
fn group_scope_hides_markers_outside_named_groups() {
    let config = ChartSetConfig::default()
        .with_groups(vec![vec![1]])
        .with_window_selection_scope(WindowSelectionScope::Groups);
    let (mut set, mut service) = set_with_charts(config, 2, 30);

    assert!(set.chart("echart1").and_then(|chart| chart.markers().pair()).is_some());
    let unscoped = set.chart("echart2").expect("second chart");
    assert_eq!(unscoped.group(), GROUP_DEFAULT);
    assert!(unscoped.markers().pair().is_none());

    let err = set
        .place_markers("echart2", &mut service, [1, 2])
        .unwrap_err();
    assert!(matches!(err, ChartError::Validation(_)));
}

#[test]
fn chart_without_named_series_gets_no_markers() {
    let mut set = ChartSet::new(ChartSetConfig::default()).expect("chart set");
    let mut service = RecordingRenderingService::new();
    let id = set
        .add_chart(vec![SeriesSpec::from_values("", &[1.0, 2.0, 3.0])])
        .expect("add chart");
    service.insert_instance(id.clone(), LinearAxis::default(), 300.0);

    set.render_chart(&id, &mut service).expect("render");
    assert!(set.chart(&id).and_then(|chart| chart.markers().pair()).is_none());
    assert_eq!(service.render_count(&id), 1);
}

#[test]
fn listener_receives_render_and_frame_emissions() {
    let received: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let mut set = ChartSet::new(ChartSetConfig::default()).expect("chart set");
    let sink = Rc::clone(&received);
    set.set_listener(move |update: &SelectionUpdate| {
        let payload = update.to_json().expect("payload json");
        sink.borrow_mut().push(payload);
    });

    let mut service = RecordingRenderingService::new();
    let id = set.add_chart(series(30)).expect("add chart");
    service.insert_instance(id.clone(), LinearAxis::default(), 300.0);
    set.render_all(&mut service);
    assert_eq!(received.borrow().len(), 1);

    set.on_marker_drag(&id, MARKER_START_ID, 100.0)
        .expect("drag accepted");
    set.run_frame(&mut service);
    let payloads = received.borrow();
    assert_eq!(payloads.len(), 2);
    assert!(payloads[1].contains("\"isSourceOfThisUpdate\":true"));
    assert!(payloads[1].contains("\"markerId\":\"window-marker-start\""));
}

#[test]
fn missing_instance_is_skipped_by_render_all() {
    let mut set = ChartSet::new(ChartSetConfig::default()).expect("chart set");
    let mut service = RecordingRenderingService::new();
    let first = set.add_chart(series(10)).expect("add chart");
    let second = set.add_chart(series(10)).expect("add chart");
    service.insert_instance(first.clone(), LinearAxis::default(), 300.0);

    assert_eq!(set.render_all(&mut service), 1);
    let err = set.render_chart(&second, &mut service).unwrap_err();
    assert!(matches!(err, ChartError::InstanceNotFound(id) if id == second));
}
