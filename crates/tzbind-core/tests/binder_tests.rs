mod common;

use std::cell::RefCell;

use common::{ctx, in_fold, sample_instants, to_minute, ts, ZONES};
use jiff::civil;
use tzbind_core::{
    convert, ClockTime, ClockTimeField, DateField, DateMode, DateTimeField, DateValue,
    FieldBinder, FieldOptions, InputPrecision, SharedTimezone, Timezone, TimezoneSource,
};

#[test]
fn test_round_trip_to_minute_precision() {
    for name in ZONES {
        let tz = Timezone::get(name).unwrap();
        for instant in sample_instants() {
            let local = convert::utc_to_local_input(instant, &tz, InputPrecision::Minute);
            let back = convert::local_input_to_utc(&local, &tz).unwrap();
            if in_fold(instant, &tz) {
                // The earlier offset wins without a hint; both candidates
                // render to the same local string.
                assert_eq!(
                    convert::utc_to_local_input(back, &tz, InputPrecision::Minute),
                    local
                );
            } else {
                assert_eq!(back, to_minute(instant), "{name}: {instant} via {local}");
            }
        }
    }
}

#[test]
fn test_round_trip_with_hint_covers_folds() {
    let field = DateTimeField::new("Exchange");
    for name in ZONES {
        let ctx = ctx(name);
        for instant in sample_instants() {
            let instant = to_minute(instant);
            let shown = field.render(Some(&instant), &ctx).value;
            let back = field.commit_near(&shown, &ctx, Some(instant)).unwrap();
            assert_eq!(back, Some(instant), "{name}: {instant} via {shown}");
        }
    }
}

#[test]
fn test_round_trip_to_second_precision() {
    let field = DateTimeField::new("Exchange").with_precision(InputPrecision::Second);
    let ctx = ctx("Asia/Kolkata");
    for instant in sample_instants() {
        let shown = field.render(Some(&instant), &ctx).value;
        assert_eq!(field.commit(&shown, &ctx).unwrap(), Some(instant));
    }
}

#[test]
fn test_null_renders_empty_for_every_binder() {
    for name in ZONES {
        let ctx = ctx(name);
        assert_eq!(DateTimeField::new("a").render(None, &ctx).value, "");
        assert_eq!(DateField::new("b").render(None, &ctx).value, "");
        assert_eq!(ClockTimeField::new("c").render(None, &ctx).value, "");
    }
}

#[test]
fn test_empty_commit_invokes_on_change_with_null() {
    let ctx = ctx("America/Los_Angeles");

    let calls = RefCell::new(Vec::new());
    DateTimeField::new("a")
        .edit("", &ctx, |v| calls.borrow_mut().push(v.is_none()))
        .unwrap();
    DateField::new("b")
        .edit("", &ctx, |v| calls.borrow_mut().push(v.is_none()))
        .unwrap();
    ClockTimeField::new("c")
        .edit("", &ctx, |v| calls.borrow_mut().push(v.is_none()))
        .unwrap();

    assert_eq!(calls.into_inner(), vec![true, true, true]);
}

#[test]
fn test_failed_commit_does_not_invoke_on_change() {
    let ctx = ctx("UTC");
    let mut called = false;
    let result = DateTimeField::new("a").edit("not a time", &ctx, |_| called = true);
    assert!(result.is_err());
    assert!(!called);
}

#[test]
fn test_bounds_preserve_order() {
    let min = ts("2024-02-01T05:00:00Z");
    let max = ts("2024-06-30T20:00:00Z");
    let field = DateTimeField::new("Exchange").with_min(min).with_max(max);

    for name in ZONES {
        let ctx = ctx(name);
        for instant in sample_instants() {
            let rendered = field.render(Some(&instant), &ctx);
            let (lo, hi) = (rendered.min.unwrap(), rendered.max.unwrap());
            if in_fold(instant, ctx.timezone()) {
                continue;
            }
            let inside_utc = min <= instant && instant <= max;
            let inside_local = lo <= rendered.value && rendered.value <= hi;
            // Local strings are truncated to the minute, so only compare
            // instants clear of the boundary minutes.
            if to_minute(instant) != to_minute(min) && to_minute(instant) != to_minute(max) {
                assert_eq!(inside_utc, inside_local, "{name}: {instant}");
            }
        }
    }
}

#[test]
fn test_clock_time_passthrough() {
    let field = ClockTimeField::new(FieldOptions::new("Pickup").zone_abbr(true));
    for name in ZONES {
        let mut received = None;
        field
            .edit("18:30", &ctx(name), |v| received = v)
            .unwrap();
        assert_eq!(received, Some(ClockTime::new("18:30")));
    }
}

#[test]
fn test_dual_mode_date_field() {
    let field = DateField::new("Date");

    let birthdate = DateValue::sniff("2015-04-02").unwrap();
    for name in ZONES {
        assert_eq!(field.render(Some(&birthdate), &ctx(name)).value, "2015-04-02");
    }

    let instant = DateValue::sniff("2024-01-16T02:30:00Z").unwrap();
    assert_eq!(
        field.render(Some(&instant), &ctx("America/Los_Angeles")).value,
        "2024-01-15"
    );
}

#[test]
fn test_date_field_instant_mode_round_trip() {
    let field = DateField::new("Exchange day").with_mode(DateMode::Instant);
    for name in ZONES {
        let ctx = ctx(name);
        let committed = field.commit("2024-03-10", &ctx).unwrap();
        assert!(matches!(committed, Some(DateValue::Instant(_))));
        assert_eq!(field.render(committed.as_ref(), &ctx).value, "2024-03-10");
    }
    assert_eq!(
        DateField::new("Birthdate").commit("2015-04-02", &ctx("UTC")).unwrap(),
        Some(DateValue::CivilDate(civil::date(2015, 4, 2)))
    );
}

#[test]
fn test_rerender_after_zone_change() {
    let shared = SharedTimezone::new(Timezone::get("America/Los_Angeles").unwrap());
    let field = DateTimeField::new(FieldOptions::new("Exchange").zone_abbr(true));
    let value = ts("2024-01-16T02:30:00Z");

    let first = field.render(Some(&value), &shared.context_at(value));
    assert_eq!(first.value, "2024-01-15T18:30");
    assert_eq!(first.label, "Exchange (PT)");

    shared.set_name("America/New_York").unwrap();
    let second = field.render(Some(&value), &shared.context_at(value));
    assert_eq!(second.value, "2024-01-15T21:30");
    assert_eq!(second.label, "Exchange (ET)");

    // Edits are read against the zone in effect at edit time too.
    assert_eq!(
        field.commit("2024-01-15T21:30", &shared.context()).unwrap(),
        Some(value)
    );
}

#[test]
fn test_unknown_zone_surfaces_as_configuration_error() {
    let shared = SharedTimezone::new(Timezone::utc());
    let err = shared.set_name("America/Gotham").unwrap_err();
    assert!(err.is_configuration());
}
