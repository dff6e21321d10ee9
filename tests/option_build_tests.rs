use approx::assert_relative_eq;
use chart_linkage::model::{
    CompareMode, MarkLineSpec, SeriesDataType, SeriesSpec, Theme, VisualMapBand, VisualMapSpec,
};
use chart_linkage::option::{ExtraTooltipRow, TickSegment, grid_left_for};
use chart_linkage::template::{BaseTemplate, FEATURE_DELETE};
use chart_linkage::{ChartOption, ChartOptionBuilder, ChartOptionParams};
use serde_json::{Value, json};

fn build(series: &[SeriesSpec]) -> ChartOption {
    ChartOptionBuilder::new(BaseTemplate::default(), ChartOptionParams::default())
        .build(series)
        .expect("option build")
}

fn y_axis_offsets(option: &ChartOption) -> Vec<f64> {
    option.json()["yAxis"]
        .as_array()
        .expect("yAxis array")
        .iter()
        .map(|axis| axis["offset"].as_f64().unwrap_or(0.0))
        .collect()
}

#[test]
fn domain_comes_from_first_non_empty_series() {
    let series = vec![
        SeriesSpec::from_values("empty", &[]),
        SeriesSpec::from_values("a", &[1.0, 2.0, 3.0]),
        SeriesSpec::from_values("b", &[4.0, 5.0, 6.0, 7.0]),
    ];
    let option = build(&series);

    let keys = option.x_axis_domain().keys().to_vec();
    assert_eq!(keys, vec!["1", "2", "3"]);
    assert_eq!(option.json()["xAxis"][0]["data"], json!(["1", "2", "3"]));
    assert_eq!(option.json()["xAxis"][0]["show"], json!(true));
}

#[test]
fn visible_pulse_axes_stack_by_forty_pixels() {
    let series: Vec<SeriesSpec> = (0..3)
        .map(|index| SeriesSpec::from_values(format!("s{index}"), &[1.0, 2.0]))
        .collect();
    let option = build(&series);

    let offsets = y_axis_offsets(&option);
    assert_eq!(offsets.len(), 3);
    for (index, offset) in offsets.iter().enumerate() {
        assert_relative_eq!(*offset, 40.0 * index as f64);
    }
    assert_eq!(option.visible_y_axis_count(), 3);
    assert_relative_eq!(option.json()["grid"]["left"].as_f64().expect("grid left"), 125.0);
    assert_relative_eq!(grid_left_for(3), 125.0);
}

#[test]
fn switch_series_do_not_count_toward_margin() {
    let series = vec![
        SeriesSpec::from_values("pulse", &[1.0, 2.0]),
        SeriesSpec::from_values("switch", &[0.0, 1.0]).with_data_type(SeriesDataType::Switch),
        SeriesSpec::from_values("pulse2", &[3.0, 4.0]),
    ];
    let option = build(&series);

    assert_eq!(option.visible_y_axis_count(), 2);
    assert_relative_eq!(option.json()["grid"]["left"].as_f64().expect("grid left"), 85.0);
    assert_eq!(option.json()["series"][1]["step"], json!("end"));
}

#[test]
fn hidden_axis_suppresses_its_mark_lines() {
    let series = vec![
        SeriesSpec::from_values("hidden", &[1.0, 2.0])
            .with_y_axis_show(false)
            .with_mark_lines(vec![MarkLineSpec::Value(50.0)]),
        SeriesSpec::from_values("visible", &[1.0, 2.0])
            .with_mark_lines(vec![MarkLineSpec::Descriptor(json!({ "yAxis": 50 }))]),
    ];
    let option = build(&series);

    let entries = option.series_entries();
    assert!(entries[0].get("markLine").is_none());
    assert_eq!(entries[1]["markLine"]["data"], json!([{ "yAxis": 50 }]));
}

#[test]
fn equal_mark_lines_are_drawn_once_per_chart() {
    let series = vec![
        SeriesSpec::from_values("first", &[1.0, 2.0])
            .with_mark_lines(vec![MarkLineSpec::Value(50.0), MarkLineSpec::Value(70.0)]),
        SeriesSpec::from_values("second", &[1.0, 2.0])
            .with_mark_lines(vec![MarkLineSpec::Descriptor(json!({ "yAxis": 50.0 }))]),
    ];
    let option = build(&series);

    let entries = option.series_entries();
    assert_eq!(entries[0]["markLine"]["data"].as_array().map(Vec::len), Some(2));
    assert!(entries[1].get("markLine").is_none());
    assert_eq!(entries[0]["markLine"]["lineStyle"]["type"], json!("dashed"));
}

#[test]
fn chart_mark_lines_need_a_series() {
    let err = build(&[])
        .with_chart_mark_lines(&[MarkLineSpec::Value(1.0)])
        .unwrap_err();
    assert!(matches!(err, chart_linkage::ChartError::Config(_)));
}

#[test]
fn baseline_alarm_becomes_visual_map_pieces() {
    let series = vec![
        SeriesSpec::from_values("s", &[5.0, 15.0, 15.0, 5.0]).with_visual_map(
            VisualMapSpec::Baseline {
                baseline: vec![10.0; 4],
                compare: CompareMode::Above,
                color: None,
                show_on_tooltip: false,
            },
        ),
    ];
    let option = build(&series);

    let pieces = option.json()["visualMap"][0]["pieces"]
        .as_array()
        .expect("visual map pieces");
    assert_eq!(pieces.len(), 1);
    assert_relative_eq!(pieces[0]["gte"].as_f64().expect("gte"), 1.0);
    assert_relative_eq!(pieces[0]["lte"].as_f64().expect("lte"), 2.0);
}

#[test]
fn hidden_series_keeps_entry_without_data() {
    let series = vec![SeriesSpec::from_values("s", &[1.0, 2.0]).with_series_show(false)];
    let option = build(&series);
    assert_eq!(option.series_entries()[0]["data"], json!([]));
    assert_eq!(option.series_count(), 1);
}

#[test]
fn percent_segment_blanks_tick_labels() {
    let values: Vec<f64> = (0..11).map(f64::from).collect();
    let series = vec![SeriesSpec::from_values("s", &values)];
    let option = ChartOptionBuilder::new(
        BaseTemplate::default(),
        ChartOptionParams::default().with_segment(TickSegment::Percent(10)),
    )
    .build(&series)
    .expect("option build");

    assert_eq!(option.tick_label(0).as_deref(), Some(""));
    assert_eq!(option.tick_label(9).as_deref(), Some("10"));
}

#[test]
fn dark_theme_sets_background() {
    let option = ChartOptionBuilder::new(
        BaseTemplate::default(),
        ChartOptionParams::default().with_theme(Theme::Dark),
    )
    .build(&[SeriesSpec::from_values("s", &[1.0])])
    .expect("option build");
    assert_eq!(option.json()["backgroundColor"], json!("#100C2A"));
    assert_eq!(option.theme(), Theme::Dark);
}

#[test]
fn building_twice_yields_identical_json() {
    let series = vec![
        SeriesSpec::from_values("a", &[1.0, 2.0]).with_mark_lines(vec![MarkLineSpec::Value(1.5)]),
        SeriesSpec::from_values("b", &[3.0, 4.0]),
    ];
    let builder = ChartOptionBuilder::new(BaseTemplate::default(), ChartOptionParams::default());
    let first = builder.build(&series).expect("first build");
    let second = builder.build(&series).expect("second build");
    assert_eq!(first.json(), second.json());

    let contract = first.to_json_contract_v1_pretty().expect("contract");
    let parsed: Value = serde_json::from_str(&contract).expect("contract json");
    assert_eq!(parsed["schema_version"], json!(1));
}

fn tooltip_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::from_values("temp", &[5.0, 15.0, 12.0]).with_visual_map(VisualMapSpec::Baseline {
            baseline: vec![10.0, 10.0, 11.0],
            compare: CompareMode::Above,
            color: None,
            show_on_tooltip: true,
        }),
        SeriesSpec::from_values("hidden", &[1.0, 2.0, 3.0]).with_series_show(false),
        SeriesSpec::from_values("flow", &[7.0, 20.0, 30.0]).with_visual_map(VisualMapSpec::Pieces {
            pieces: vec![VisualMapBand::new(18.0, 25.0, "#F56C6C")],
            show_on_tooltip: true,
        }),
    ]
}

#[test]
fn composite_tooltip_lists_label_series_then_extra_rows() {
    let params = ChartOptionParams::default()
        .with_theme(Theme::Light)
        .with_extra_tooltip(vec![ExtraTooltipRow::new("batch", ["b1", "b2"])]);
    let option = ChartOptionBuilder::new(BaseTemplate::default(), params)
        .build(&tooltip_series())
        .expect("option build");
    let tooltip = option.tooltip().expect("composite tooltip");

    let markup = tooltip.compose(1).expect("point in domain");
    let lines: Vec<&str> = markup.split("<br/>").collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "2");
    let suffix = |text: &str| {
        format!(" <span style=\"color:{}\">({text})</span>", Theme::Light.accent_color())
    };
    assert!(lines[1].contains("temp: 15"));
    assert!(lines[1].ends_with(&suffix("10")));
    assert!(lines[2].contains("flow: 20"));
    assert!(lines[2].ends_with(&suffix("18~25")));
    assert!(!markup.contains("hidden"));
    assert_eq!(lines[3], "batch: b2");

    let markup = tooltip.compose(2).expect("last point");
    let lines: Vec<&str> = markup.split("<br/>").collect();
    assert!(lines[2].ends_with("flow: 30"));
    assert_eq!(lines[3], "batch: -");
    assert!(tooltip.compose(3).is_none());
}

#[test]
fn default_tooltip_stays_without_comparison_or_extra_rows() {
    let option = build(&[SeriesSpec::from_values("s", &[1.0, 2.0])]);
    assert!(option.tooltip().is_none());
}

#[test]
fn missing_toolbox_feature_leaves_option_unchanged() {
    let option = build(&[SeriesSpec::from_values("s", &[1.0, 2.0])]);
    let before = option.json().clone();

    let untouched = option
        .clone()
        .with_toolbox_title("missingFeature", "x")
        .with_toolbox_feature_shown("missingFeature", false);
    assert_eq!(untouched.json(), &before);

    let hidden = option.with_toolbox_feature_shown(FEATURE_DELETE, false);
    assert_eq!(hidden.json()["toolbox"]["feature"][FEATURE_DELETE]["show"], json!(false));
}
