// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and keyboard scenarios for the stock gadgets.

use std::cell::RefCell;
use std::rc::Rc;

use gadgetry_gadgets::combo_box::{self, ComboBoxData};
use gadgetry_gadgets::list_box::{self, ListBoxData};
use gadgetry_gadgets::radio_button::{self, RadioButtonData};
use gadgetry_gadgets::slider::{self, SliderData};
use gadgetry_gadgets::tab_control::{self, TabControlData};
use gadgetry_gadgets::text_entry::{self, TextEntryData};
use gadgetry_gadgets::{GadgetData, check_box, create_gadget, push_button};
use gadgetry_tree::{
    InputMsg, InstanceData, Key, KeyState, MsgResult, Notice, SystemMsg, WindowId, WindowManager,
    WindowStatus, WindowStyle,
};
use kurbo::{Point, Rect, Size};
use peniko::Color;

type Log = Rc<RefCell<Vec<Notice>>>;

/// A full-screen owner window that records every notice it receives.
fn screen() -> (WindowManager, WindowId, Log) {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let log: Log = Rc::default();
    let sink = log.clone();
    let owner = wm
        .create(
            None,
            WindowStatus::ENABLED,
            Point::ZERO,
            Size::new(800.0, 600.0),
            Some(Rc::new(
                move |_: &mut WindowManager, _: WindowId, msg: &mut SystemMsg| {
                    if let SystemMsg::Notify(notice) = msg {
                        sink.borrow_mut().push(*notice);
                        return MsgResult::Handled;
                    }
                    MsgResult::Ignored
                },
            )),
            None,
        )
        .unwrap();
    (wm, owner, log)
}

fn gadget(
    wm: &mut WindowManager,
    owner: WindowId,
    rect: Rect,
    inst: InstanceData,
    data: GadgetData,
) -> WindowId {
    create_gadget(
        wm,
        Some(owner),
        WindowStatus::ENABLED,
        rect.origin(),
        rect.size(),
        inst,
        data,
    )
    .unwrap()
}

fn click(wm: &mut WindowManager, at: Point) {
    wm.process_mouse_event(InputMsg::LeftDown(at));
    wm.process_mouse_event(InputMsg::LeftUp(at));
}

fn selected_notices(log: &Log) -> Vec<WindowId> {
    log.borrow()
        .iter()
        .filter_map(|n| match n {
            Notice::Selected { from } => Some(*from),
            _ => None,
        })
        .collect()
}

#[test]
fn check_box_click_toggles_and_notifies_once() {
    let (mut wm, owner, log) = screen();
    let check = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 10.0, 110.0, 26.0),
        InstanceData::default(),
        GadgetData::CheckBox,
    );

    click(&mut wm, Point::new(15.0, 15.0));
    assert!(check_box::is_checked(&wm, check), "first click checks");
    assert_eq!(selected_notices(&log), [check]);

    click(&mut wm, Point::new(15.0, 15.0));
    assert!(!check_box::is_checked(&wm, check), "second click unchecks");
    assert_eq!(selected_notices(&log), [check, check]);
}

#[test]
fn check_box_release_without_hilite_is_ignored() {
    let (mut wm, owner, log) = screen();
    let check = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 10.0, 110.0, 26.0),
        InstanceData::default(),
        GadgetData::CheckBox,
    );

    let result = wm.send_input(check, InputMsg::LeftUp(Point::new(15.0, 15.0)));
    assert_eq!(result, MsgResult::Ignored);
    assert!(!check_box::is_checked(&wm, check), "state unchanged");
    assert!(selected_notices(&log).is_empty(), "no notice");
}

#[test]
fn push_button_fires_on_release_and_cancels_when_left() {
    let (mut wm, owner, log) = screen();
    let button = gadget(
        &mut wm,
        owner,
        Rect::new(100.0, 100.0, 180.0, 120.0),
        InstanceData::default(),
        GadgetData::PushButton,
    );

    wm.process_mouse_event(InputMsg::LeftDown(Point::new(110.0, 110.0)));
    assert!(push_button::is_selected(&wm, button), "held down");
    wm.process_mouse_event(InputMsg::LeftUp(Point::new(110.0, 110.0)));
    assert!(!push_button::is_selected(&wm, button), "released");
    assert_eq!(selected_notices(&log), [button]);

    // Press, slide off, release elsewhere: no activation.
    wm.process_mouse_event(InputMsg::LeftDown(Point::new(110.0, 110.0)));
    wm.process_mouse_event(InputMsg::MousePos(Point::new(300.0, 300.0)));
    wm.process_mouse_event(InputMsg::LeftUp(Point::new(300.0, 300.0)));
    assert!(!push_button::is_selected(&wm, button), "press cancelled");
    assert_eq!(selected_notices(&log), [button]);
}

#[test]
fn check_like_push_button_latches() {
    let (mut wm, owner, log) = screen();
    let button = create_gadget(
        &mut wm,
        Some(owner),
        WindowStatus::ENABLED | WindowStatus::CHECK_LIKE,
        Point::new(100.0, 100.0),
        Size::new(80.0, 20.0),
        InstanceData::default(),
        GadgetData::PushButton,
    )
    .unwrap();

    click(&mut wm, Point::new(110.0, 110.0));
    assert!(push_button::is_selected(&wm, button), "latched");
    click(&mut wm, Point::new(110.0, 110.0));
    assert!(!push_button::is_selected(&wm, button), "unlatched");
    assert_eq!(selected_notices(&log).len(), 2);
}

#[test]
fn radio_buttons_exclude_within_their_group() {
    let (mut wm, owner, log) = screen();
    let radio = |wm: &mut WindowManager, y: f64, group: i32| {
        gadget(
            wm,
            owner,
            Rect::new(10.0, y, 110.0, y + 16.0),
            InstanceData::default(),
            GadgetData::RadioButton(RadioButtonData { group }),
        )
    };
    let a = radio(&mut wm, 10.0, 1);
    let b = radio(&mut wm, 30.0, 1);
    let other = radio(&mut wm, 50.0, 2);
    radio_button::select(&mut wm, other);

    click(&mut wm, Point::new(15.0, 15.0));
    assert!(radio_button::is_selected(&wm, a));
    click(&mut wm, Point::new(15.0, 35.0));
    assert!(radio_button::is_selected(&wm, b));
    assert!(!radio_button::is_selected(&wm, a), "same group cleared");
    assert!(radio_button::is_selected(&wm, other), "other group untouched");
    assert_eq!(selected_notices(&log), [a, b]);
}

#[test]
fn slider_tracks_drag_and_reports_release() {
    let (mut wm, owner, log) = screen();
    let s = gadget(
        &mut wm,
        owner,
        Rect::new(0.0, 0.0, 110.0, 10.0),
        InstanceData::default(),
        GadgetData::Slider(SliderData::new(0, 10)),
    );
    assert_eq!(
        slider::thumb_rect(&wm, s),
        Some(Rect::new(0.0, 0.0, 10.0, 10.0))
    );

    wm.process_mouse_event(InputMsg::LeftDown(Point::new(55.0, 5.0)));
    assert_eq!(slider::get_value(&wm, s), Some(5));
    assert_eq!(wm.capture(), Some(s), "slider holds capture while dragging");

    // Far outside the slider still drives it through capture.
    wm.process_mouse_event(InputMsg::LeftDrag(Point::new(500.0, 300.0)));
    assert_eq!(slider::get_value(&wm, s), Some(10));
    wm.process_mouse_event(InputMsg::LeftUp(Point::new(500.0, 300.0)));
    assert_eq!(wm.capture(), None);

    assert_eq!(
        log.borrow()
            .iter()
            .filter(|n| matches!(n, Notice::SliderTrack { .. } | Notice::SliderDone { .. }))
            .copied()
            .collect::<Vec<_>>(),
        [
            Notice::SliderTrack { from: s, value: 5 },
            Notice::SliderTrack { from: s, value: 10 },
            Notice::SliderDone { from: s, value: 10 },
        ]
    );
    assert_eq!(
        slider::thumb_rect(&wm, s),
        Some(Rect::new(100.0, 0.0, 110.0, 10.0))
    );
}

#[test]
fn slider_keys_step_within_range() {
    let (mut wm, owner, _log) = screen();
    let s = gadget(
        &mut wm,
        owner,
        Rect::new(0.0, 0.0, 110.0, 10.0),
        InstanceData::default(),
        GadgetData::Slider(SliderData::new(-2, 2)),
    );
    wm.set_focus(Some(s));
    for _ in 0..5 {
        wm.process_key(Key::Left, KeyState::DOWN);
    }
    assert_eq!(slider::get_value(&wm, s), Some(-2));
    wm.process_key(Key::Right, KeyState::DOWN);
    assert_eq!(slider::get_value(&wm, s), Some(-1));
    slider::set_range(&mut wm, s, 0, 4);
    assert_eq!(slider::get_value(&wm, s), Some(0), "value clamped into the new range");
}

#[test]
fn full_range_slider_does_not_overflow() {
    let (mut wm, owner, _log) = screen();
    let s = gadget(
        &mut wm,
        owner,
        Rect::new(0.0, 0.0, 110.0, 10.0),
        InstanceData::default(),
        GadgetData::Slider(SliderData::new(i32::MIN, i32::MAX)),
    );
    let data = wm.user_data::<SliderData>(s).unwrap();
    assert!(data.ticks > 0.0);
    assert_eq!(
        slider::thumb_rect(&wm, s),
        Some(Rect::new(0.0, 0.0, 10.0, 10.0))
    );

    wm.process_mouse_event(InputMsg::LeftDown(Point::new(105.0, 5.0)));
    assert_eq!(slider::get_value(&wm, s), Some(i32::MAX));
    let thumb = slider::thumb_rect(&wm, s).unwrap();
    assert!((thumb.x0 - 100.0).abs() < 1e-6, "thumb at the far end, got {thumb:?}");

    wm.process_mouse_event(InputMsg::LeftDrag(Point::new(55.0, 5.0)));
    let middle = slider::get_value(&wm, s).unwrap();
    assert!((-1..=0).contains(&middle), "middle of the range, got {middle}");
    wm.process_mouse_event(InputMsg::LeftUp(Point::new(55.0, 5.0)));

    slider::set_value(&mut wm, s, i32::MAX);
    wm.process_key(Key::Right, KeyState::DOWN);
    assert_eq!(slider::get_value(&wm, s), Some(i32::MAX));
    slider::set_value(&mut wm, s, i32::MIN);
    wm.process_key(Key::Left, KeyState::DOWN);
    assert_eq!(slider::get_value(&wm, s), Some(i32::MIN));
}

#[test]
fn keys_reach_button_gadgets_only_through_focus() {
    let (mut wm, owner, log) = screen();
    let check = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 10.0, 110.0, 26.0),
        InstanceData::default(),
        GadgetData::CheckBox,
    );
    let button = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 40.0, 110.0, 60.0),
        InstanceData::default(),
        GadgetData::PushButton,
    );
    let radio = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 70.0, 110.0, 86.0),
        InstanceData::default(),
        GadgetData::RadioButton(RadioButtonData { group: 1 }),
    );
    let space = InputMsg::Char {
        key: Key::Space,
        state: KeyState::DOWN,
    };

    // Unfocused, the key passes through and the owner has no input handler either.
    assert_eq!(wm.send_input_bubbling(check, space), MsgResult::Ignored);
    assert_eq!(wm.send_input_bubbling(button, space), MsgResult::Ignored);
    assert_eq!(wm.send_input_bubbling(radio, space), MsgResult::Ignored);
    assert!(!check_box::is_checked(&wm, check));
    assert!(!radio_button::is_selected(&wm, radio));
    assert!(selected_notices(&log).is_empty());

    assert_eq!(wm.set_focus(Some(check)), Some(check));
    assert_eq!(wm.process_key(Key::Space, KeyState::DOWN), MsgResult::Handled);
    assert!(check_box::is_checked(&wm, check));
    assert_eq!(wm.send_input_bubbling(button, space), MsgResult::Ignored);
    assert_eq!(selected_notices(&log), [check]);
}

#[test]
fn list_box_purges_and_selects_by_click() {
    let (mut wm, owner, log) = screen();
    let list = gadget(
        &mut wm,
        owner,
        Rect::new(0.0, 0.0, 200.0, 64.0),
        InstanceData::default(),
        GadgetData::ListBox(ListBoxData {
            auto_purge: true,
            ..ListBoxData::new(3)
        }),
    );
    for text in ["one", "two", "three", "four"] {
        list_box::add_entry(&mut wm, list, text, Color::WHITE);
    }
    assert_eq!(list_box::len(&wm, list), 3);
    assert_eq!(list_box::cell_text(&wm, list, 0, 0), Some("two"));

    // Second row: y in 16..32.
    wm.process_mouse_event(InputMsg::LeftDown(Point::new(20.0, 20.0)));
    assert_eq!(list_box::selected(&wm, list), [1]);
    wm.process_key(Key::Down, KeyState::DOWN);
    assert_eq!(list_box::selected(&wm, list), [2]);

    let rows: Vec<_> = log
        .borrow()
        .iter()
        .filter_map(|n| match n {
            Notice::ListSelected { row, .. } => Some(*row),
            _ => None,
        })
        .collect();
    assert_eq!(rows, [Some(1), Some(2)]);
}

#[test]
fn full_list_without_purge_refuses_rows() {
    let (mut wm, owner, _log) = screen();
    let list = gadget(
        &mut wm,
        owner,
        Rect::new(0.0, 0.0, 200.0, 64.0),
        InstanceData::default(),
        GadgetData::ListBox(ListBoxData::new(1)),
    );
    assert_eq!(list_box::add_entry(&mut wm, list, "a", Color::WHITE), Some(0));
    assert_eq!(list_box::add_entry(&mut wm, list, "b", Color::WHITE), None);
    assert!(list_box::remove_row(&mut wm, list, 0));
    assert_eq!(list_box::len(&wm, list), 0);
}

#[test]
fn combo_box_drops_and_picks_an_entry() {
    let (mut wm, owner, log) = screen();
    let combo = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 10.0, 110.0, 30.0),
        InstanceData::default(),
        GadgetData::ComboBox(ComboBoxData::default()),
    );
    for entry in ["red", "green", "blue"] {
        combo_box::add_entry(&mut wm, combo, entry);
    }

    click(&mut wm, Point::new(15.0, 15.0));
    assert!(combo_box::is_dropped(&wm, combo));
    assert_eq!(wm.capture(), Some(combo));

    // The list starts at y = 30 with 16 pixel rows.
    wm.process_mouse_event(InputMsg::LeftDown(Point::new(15.0, 50.0)));
    assert!(!combo_box::is_dropped(&wm, combo));
    assert_eq!(wm.capture(), None);
    assert_eq!(combo_box::selected(&wm, combo), Some(1));
    assert_eq!(wm.window(combo).unwrap().text(), "green");
    assert!(log.borrow().contains(&Notice::ComboSelected {
        from: combo,
        index: Some(1)
    }));
}

#[test]
fn combo_box_keys_walk_the_list() {
    let (mut wm, owner, log) = screen();
    let combo = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 10.0, 110.0, 30.0),
        InstanceData::default(),
        GadgetData::ComboBox(ComboBoxData::default()),
    );
    for entry in ["red", "green", "blue"] {
        combo_box::add_entry(&mut wm, combo, entry);
    }
    click(&mut wm, Point::new(15.0, 15.0));
    assert_eq!(wm.focus(), Some(combo));
    assert!(combo_box::is_dropped(&wm, combo));

    wm.process_key(Key::Down, KeyState::DOWN);
    assert_eq!(combo_box::selected(&wm, combo), Some(0));
    for _ in 0..4 {
        wm.process_key(Key::Down, KeyState::DOWN);
    }
    assert_eq!(combo_box::selected(&wm, combo), Some(2), "stops at the last entry");
    wm.process_key(Key::Up, KeyState::DOWN);
    assert_eq!(combo_box::selected(&wm, combo), Some(1));
    assert_eq!(wm.window(combo).unwrap().text(), "green");

    // Releases are swallowed without moving.
    wm.process_key(Key::Up, KeyState::empty());
    assert_eq!(combo_box::selected(&wm, combo), Some(1));

    wm.process_key(Key::Return, KeyState::DOWN);
    assert!(!combo_box::is_dropped(&wm, combo));
    assert_eq!(wm.capture(), None);

    let picks: Vec<Option<usize>> = log
        .borrow()
        .iter()
        .filter_map(|n| match n {
            Notice::ComboSelected { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(picks, [Some(0), Some(1), Some(2), Some(1)]);
}

#[test]
fn tab_control_creates_panes_and_switches() {
    let (mut wm, owner, log) = screen();
    let tabs = gadget(
        &mut wm,
        owner,
        Rect::new(0.0, 0.0, 300.0, 200.0),
        InstanceData::default(),
        GadgetData::TabControl(TabControlData {
            tab_count: 3,
            tab_width: 50.0,
            tab_height: 20.0,
            ..TabControlData::default()
        }),
    );
    let panes: Vec<WindowId> = (0..3)
        .map(|i| tab_control::pane(&wm, tabs, i).unwrap())
        .collect();
    for &p in &panes {
        assert!(wm.window(p).unwrap().style().contains(WindowStyle::TAB_PANE));
        assert_eq!(wm.parent(p), Some(tabs));
    }
    assert!(!wm.is_hidden(panes[0]));
    assert!(wm.is_hidden(panes[1]));

    click(&mut wm, Point::new(75.0, 10.0));
    assert_eq!(tab_control::active_tab(&wm, tabs), Some(1));
    assert!(wm.is_hidden(panes[0]));
    assert!(!wm.is_hidden(panes[1]));

    tab_control::enable_tab(&mut wm, tabs, 2, false);
    click(&mut wm, Point::new(125.0, 10.0));
    assert_eq!(tab_control::active_tab(&wm, tabs), Some(1), "disabled tab refused");

    let switches: Vec<usize> = log
        .borrow()
        .iter()
        .filter_map(|n| match n {
            Notice::TabSelected { tab, .. } => Some(*tab),
            _ => None,
        })
        .collect();
    assert_eq!(switches, [1]);
}

#[test]
fn text_entry_filters_typed_keys() {
    let (mut wm, owner, log) = screen();
    let entry = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 10.0, 210.0, 30.0),
        InstanceData::default(),
        GadgetData::TextEntry(TextEntryData {
            max_len: 4,
            numerical: true,
            secret: true,
            ..TextEntryData::default()
        }),
    );
    click(&mut wm, Point::new(20.0, 20.0));
    assert_eq!(wm.focus(), Some(entry));

    for c in ['1', 'x', '2', '3', '4', '5'] {
        wm.process_key(Key::Char(c), KeyState::DOWN);
    }
    assert_eq!(text_entry::text(&wm, entry), "1234");
    assert_eq!(text_entry::display_text(&wm, entry), "****");

    wm.process_key(Key::Backspace, KeyState::DOWN);
    wm.process_key(Key::Return, KeyState::DOWN);
    assert_eq!(text_entry::text(&wm, entry), "123");
    assert_eq!(
        log.borrow().last(),
        Some(&Notice::EditDone { from: entry })
    );
}

#[test]
fn text_entry_stops_at_max_length() {
    let (mut wm, owner, log) = screen();
    let entry = gadget(
        &mut wm,
        owner,
        Rect::new(10.0, 10.0, 210.0, 30.0),
        InstanceData::default(),
        GadgetData::TextEntry(TextEntryData {
            max_len: 3,
            alpha_numerical: true,
            ..TextEntryData::default()
        }),
    );
    wm.set_focus(Some(entry));
    let updates = |log: &Log| {
        log.borrow()
            .iter()
            .filter(|n| matches!(n, Notice::UpdateText { .. }))
            .count()
    };

    // The limit counts characters, not bytes.
    for c in ['\u{e9}', 'b', '-', '\u{e7}', 'd', 'e'] {
        wm.process_key(Key::Char(c), KeyState::DOWN);
    }
    assert_eq!(text_entry::text(&wm, entry), "\u{e9}b\u{e7}");
    assert_eq!(updates(&log), 3, "no update once full");

    wm.process_key(Key::Backspace, KeyState::DOWN);
    wm.process_key(Key::Char('z'), KeyState::DOWN);
    assert_eq!(text_entry::text(&wm, entry), "\u{e9}bz");
    assert_eq!(updates(&log), 5);

    text_entry::set_text(&mut wm, entry, "a-bcdef");
    assert_eq!(text_entry::text(&wm, entry), "abc");
}
