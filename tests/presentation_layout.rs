use legend_harmonizer::color::Rgb8;
use legend_harmonizer::dataset::sample_records;
use legend_harmonizer::presentation::{
    LegendContext, LegendPlacement, PxRect, Reserve, Swatch, presenter_for,
};
use legend_harmonizer::{GroupingMode, Record, group_legend_items};

fn ebitda_revenue() -> Vec<Record> {
    vec![
        Record::new("EBITDA", "Actuals", 1200.0, Rgb8::new(0x3b, 0x82, 0xf6)),
        Record::new("EBITDA", "Forecast", 1350.0, Rgb8::new(0x22, 0xc5, 0x5e)),
        Record::new("Revenue", "Actuals", 5000.0, Rgb8::new(0xf9, 0x73, 0x16)),
    ]
}

fn area() -> PxRect {
    PxRect::new(0, 0, 600, 400)
}

#[test]
fn every_placement_keeps_item_order() {
    let records = sample_records();
    for mode in GroupingMode::ALL {
        let items = group_legend_items(&records, mode);
        let expected: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
        for placement in LegendPlacement::ALL {
            let presenter = presenter_for(placement);
            assert_eq!(presenter.placement(), placement);
            let ctx = LegendContext {
                records: &records,
                mode,
                area: area(),
            };
            let layout = presenter.layout(&items, &ctx);
            let ids: Vec<_> = layout.items.iter().map(|i| i.item_id.clone()).collect();
            assert_eq!(ids, expected, "{placement} / {mode}");
            assert_eq!(layout.placement, placement);
        }
    }
}

#[test]
fn swatch_kind_depends_on_color_count() {
    let records = ebitda_revenue();
    let items = group_legend_items(&records, GroupingMode::ByVariable);
    let ctx = LegendContext {
        records: &records,
        mode: GroupingMode::ByVariable,
        area: area(),
    };
    for placement in LegendPlacement::ALL {
        let layout = presenter_for(placement).layout(&items, &ctx);
        match &layout.items[0].swatch {
            Swatch::Composite { cells } => assert_eq!(cells.len(), 2),
            other => panic!("expected composite swatch, got {other:?}"),
        }
        assert_eq!(layout.items[0].badge.as_ref().map(|b| b.count), Some(2));
        assert!(matches!(layout.items[1].swatch, Swatch::Dot { .. }));
        assert!(layout.items[1].badge.is_none());
    }
}

#[test]
fn tooltips_list_members_when_folded() {
    let records = ebitda_revenue();
    let items = group_legend_items(&records, GroupingMode::ByVersion);
    let ctx = LegendContext {
        records: &records,
        mode: GroupingMode::ByVersion,
        area: area(),
    };
    let layout = presenter_for(LegendPlacement::Panel).layout(&items, &ctx);
    assert_eq!(
        layout.items[0].tooltip,
        vec!["EBITDA • Actuals (#3B82F6)", "Revenue • Actuals (#F97316)"]
    );

    let pairs = group_legend_items(&records, GroupingMode::ByVariableAndVersion);
    let ctx = LegendContext {
        mode: GroupingMode::ByVariableAndVersion,
        ..ctx
    };
    let layout = presenter_for(LegendPlacement::Overlay).layout(&pairs, &ctx);
    assert_eq!(layout.items[2].tooltip, vec!["Revenue • Actuals"]);
}

#[test]
fn hit_test_finds_entry_under_pointer() {
    let records = sample_records();
    let items = group_legend_items(&records, GroupingMode::ByVersion);
    let ctx = LegendContext {
        records: &records,
        mode: GroupingMode::ByVersion,
        area: area(),
    };
    let layout = presenter_for(LegendPlacement::Panel).layout(&items, &ctx);
    let second = &layout.items[1].bounds;
    let hit = layout
        .hit_test(second.x + second.w / 2, second.y + second.h / 2)
        .unwrap();
    assert_eq!(hit.item_id, items[1].id);
    assert!(layout.hit_test(-5, -5).is_none());
}

#[test]
fn panel_has_heading_and_stacks_cards() {
    let records = sample_records();
    let items = group_legend_items(&records, GroupingMode::ByVariableAndVersion);
    let ctx = LegendContext {
        records: &records,
        mode: GroupingMode::ByVariableAndVersion,
        area: PxRect::new(0, 0, 280, 600),
    };
    let layout = presenter_for(LegendPlacement::Panel).layout(&items, &ctx);
    let (heading, _, _) = layout.heading.clone().unwrap();
    assert_eq!(heading, "Mode: VARIABLE & VERSION");
    for pair in layout.items.windows(2) {
        assert!(pair[1].bounds.y >= pair[0].bounds.bottom());
        assert_eq!(pair[0].bounds.w, pair[1].bounds.w);
    }
}

#[test]
fn overlay_stays_inside_plot_and_reserves_nothing() {
    let records = sample_records();
    let items = group_legend_items(&records, GroupingMode::ByVariableAndVersion);
    let plot = PxRect::new(60, 40, 500, 300);
    let ctx = LegendContext {
        records: &records,
        mode: GroupingMode::ByVariableAndVersion,
        area: plot,
    };
    let presenter = presenter_for(LegendPlacement::Overlay);
    assert_eq!(presenter.reserve(&items, 1000, 600), Reserve::None);
    let layout = presenter.layout(&items, &ctx);
    for item in &layout.items {
        assert!(item.bounds.x >= plot.x && item.bounds.right() <= plot.right());
    }
    assert!(layout.container.is_some());
}

#[test]
fn side_and_native_reserve_space() {
    let items = group_legend_items(&sample_records(), GroupingMode::ByVariable);
    assert!(matches!(
        presenter_for(LegendPlacement::Panel).reserve(&items, 1000, 600),
        Reserve::Right(w) if w > 0 && w <= 500
    ));
    assert!(matches!(
        presenter_for(LegendPlacement::Native).reserve(&items, 1000, 600),
        Reserve::Bottom(h) if h > 0 && h <= 360
    ));
}

#[test]
fn empty_items_give_empty_layout() {
    let ctx = LegendContext {
        records: &[],
        mode: GroupingMode::ByVariable,
        area: area(),
    };
    for placement in LegendPlacement::ALL {
        let layout = presenter_for(placement).layout(&[], &ctx);
        assert!(layout.items.is_empty());
        assert!(layout.hit_test(10, 10).is_none());
    }
}
