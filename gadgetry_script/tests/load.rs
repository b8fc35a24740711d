// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading whole scripts into a live window manager.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gadgetry_gadgets::list_box::ListBoxData;
use gadgetry_gadgets::slider::SliderData;
use gadgetry_gadgets::tab_control;
use gadgetry_script::{CallbackRegistry, LoadErrorKind, LoadOptions, load_layout};
use gadgetry_tree::{
    FontDesc, InputMsg, MsgResult, Notice, SystemMsg, TextColors, WindowId, WindowLayout,
    WindowManager, WindowStatus, WindowStyle, make_color,
};
use kurbo::{Point, Rect, Size};

fn manager() -> WindowManager {
    WindowManager::new(Size::new(800.0, 600.0))
}

fn load(
    wm: &mut WindowManager,
    registry: &CallbackRegistry,
    script: &str,
) -> Result<WindowLayout, gadgetry_script::LoadError> {
    load_layout(wm, registry, script, "Test.wnd", &LoadOptions::default())
}

fn name(wm: &WindowManager, w: WindowId) -> String {
    wm.window(w).unwrap().instance().name.clone()
}

const NESTED: &str = r#"
FILE_VERSION = 2;
WINDOW
  WINDOWTYPE = USER;
  SCREENRECT = UPPERLEFT: 100 50, BOTTOMRIGHT: 500 350, CREATIONRESOLUTION: 800 600;
  NAME = "Test.wnd:Parent";
  STATUS = ENABLED;
  SYSTEMCALLBACK = Recorder;
  CHILD
  WINDOW
    WINDOWTYPE = USER;
    SCREENRECT = UPPERLEFT: 110 60, BOTTOMRIGHT: 210 90, CREATIONRESOLUTION: 800 600;
    NAME = "Test.wnd:First";
    STATUS = ENABLED;
    SYSTEMCALLBACK = Recorder;
  END
  WINDOW
    WINDOWTYPE = PUSHBUTTON;
    SCREENRECT = UPPERLEFT: 110 100, BOTTOMRIGHT: 210 130, CREATIONRESOLUTION: 800 600;
    NAME = "Test.wnd:Second";
    STATUS = ENABLED+TABSTOP;
    TEXT = "Go";
  END
  ENDALLCHILDREN
END
WINDOW
  WINDOWTYPE = USER;
  SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 10 10, CREATIONRESOLUTION: 800 600;
  NAME = "Test.wnd:Other";
  STATUS = ENABLED;
END
"#;

#[test]
fn nested_blocks_build_a_tree() {
    let mut wm = manager();
    let created: Rc<RefCell<Vec<WindowId>>> = Rc::default();
    let sink = created.clone();
    let mut registry = CallbackRegistry::new();
    registry.register_system(
        "Recorder",
        Rc::new(
            move |_: &mut WindowManager, w: WindowId, msg: &mut SystemMsg| {
                if matches!(msg, SystemMsg::ScriptCreate) {
                    sink.borrow_mut().push(w);
                }
                MsgResult::Ignored
            },
        ),
    );

    let layout = load(&mut wm, &registry, NESTED).unwrap();
    let members: Vec<String> = layout.windows(&wm).into_iter().map(|w| name(&wm, w)).collect();
    assert_eq!(
        members,
        [
            "Test.wnd:Parent",
            "Test.wnd:First",
            "Test.wnd:Second",
            "Test.wnd:Other"
        ]
    );
    let top: Vec<WindowId> = wm.top_level().collect();
    assert_eq!(top.len(), 2);

    let parent = layout.first_window(&wm).unwrap();
    assert_eq!(
        layout
            .find_window(&wm, "Test.wnd:Second")
            .and_then(|w| wm.parent(w)),
        Some(parent)
    );

    let mut kids: Vec<String> = wm.children(parent).map(|c| name(&wm, c)).collect();
    kids.sort();
    assert_eq!(kids, ["Test.wnd:First", "Test.wnd:Second"]);

    let first = wm.find_by_name(Some(parent), "Test.wnd:First").unwrap();
    assert_eq!(wm.position(first), Some(Point::new(10.0, 10.0)));
    assert_eq!(
        wm.screen_region(first),
        Some(Rect::new(110.0, 60.0, 210.0, 90.0))
    );

    let second = wm.find_by_name(None, "Test.wnd:Second").unwrap();
    let node = wm.window(second).unwrap();
    assert!(node.style().contains(WindowStyle::PUSH_BUTTON));
    assert!(node.status().contains(WindowStatus::TAB_STOP));
    assert_eq!(node.text(), "Go");

    // Children finish before their parent.
    assert_eq!(*created.borrow(), [first, parent]);
}

#[test]
fn layout_block_resolves_lifecycle_callbacks() {
    let mut wm = manager();
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    let mut registry = CallbackRegistry::new();
    registry.register_layout(
        "MenuInit",
        Rc::new(move |_: &mut WindowLayout, _: &mut WindowManager| {
            counter.set(counter.get() + 1);
        }),
    );

    let mut layout = load(
        &mut wm,
        &registry,
        "FILE_VERSION = 1;\nSTARTLAYOUTBLOCK\n  LAYOUTINIT = MenuInit;\n  LAYOUTUPDATE = [None];\n  LAYOUTSHUTDOWN = MenuGone;\nENDLAYOUTBLOCK\n",
    )
    .unwrap();
    assert!(layout.init.is_some());
    assert!(layout.update.is_none());
    assert!(layout.shutdown.is_none());
    assert!(layout.is_empty(&wm));
    layout.run_init(&mut wm);
    assert_eq!(runs.get(), 1);
}

#[test]
fn screen_rects_rescale_per_axis() {
    let script = r#"
        WINDOW
          WINDOWTYPE = USER;
          SCREENRECT = UPPERLEFT: 333 100, BOTTOMRIGHT: 433 150, CREATIONRESOLUTION: 800 600;
          STATUS = ENABLED;
        END
    "#;

    let mut wm = manager();
    let layout = load(&mut wm, &CallbackRegistry::new(), script).unwrap();
    let w = layout.first_window(&wm).unwrap();
    assert_eq!(
        wm.screen_region(w),
        Some(Rect::new(333.0, 100.0, 433.0, 150.0))
    );

    let mut wm = manager();
    let options = LoadOptions {
        display_size: Some(Size::new(1024.0, 768.0)),
        ..LoadOptions::default()
    };
    let layout = load_layout(&mut wm, &CallbackRegistry::new(), script, "Big.wnd", &options)
        .unwrap();
    let w = layout.first_window(&wm).unwrap();
    assert_eq!(
        wm.screen_region(w),
        Some(Rect::new(426.0, 128.0, 554.0, 192.0))
    );
}

#[test]
fn unresolved_callbacks_keep_stock_behavior() {
    let mut wm = manager();
    let notices: Rc<RefCell<Vec<Notice>>> = Rc::default();
    let sink = notices.clone();
    let owner = wm
        .create(
            None,
            WindowStatus::ENABLED,
            Point::ZERO,
            Size::new(800.0, 600.0),
            Some(Rc::new(
                move |_: &mut WindowManager, _: WindowId, msg: &mut SystemMsg| {
                    if let SystemMsg::Notify(n) = msg {
                        sink.borrow_mut().push(*n);
                        return MsgResult::Handled;
                    }
                    MsgResult::Ignored
                },
            )),
            None,
        )
        .unwrap();

    let script = r#"
        WINDOW
          WINDOWTYPE = PUSHBUTTON;
          SCREENRECT = UPPERLEFT: 20 20, BOTTOMRIGHT: 120 50, CREATIONRESOLUTION: 800 600;
          NAME = "Test.wnd:Ok";
          STATUS = ENABLED;
          SYSTEMCALLBACK = NobodyRegisteredThis;
          INPUTCALLBACK = "[NONE]";
          TOOLTIPCALLBACK = [None];
        END
    "#;
    let options = LoadOptions {
        parent: Some(owner),
        ..LoadOptions::default()
    };
    let layout = load_layout(&mut wm, &CallbackRegistry::new(), script, "Test.wnd", &options)
        .unwrap();
    let button = layout.first_window(&wm).unwrap();
    assert_eq!(wm.parent(button), Some(owner));

    wm.process_mouse_event(InputMsg::LeftDown(Point::new(30.0, 30.0)));
    wm.process_mouse_event(InputMsg::LeftUp(Point::new(30.0, 30.0)));
    assert!(
        notices
            .borrow()
            .contains(&Notice::Selected { from: button })
    );
}

#[test]
fn malformed_field_aborts_and_reports_partial_windows() {
    let script = "WINDOW\n\
                  WINDOWTYPE = USER;\n\
                  SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 10 10, CREATIONRESOLUTION: 800 600;\n\
                  END\n\
                  WINDOW\n\
                  SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 50 50, CREATIONRESOLUTION: 800 600;\n\
                  CHILD\n\
                  WINDOW\n\
                  TOOLTIPDELAY = later;\n";
    let mut wm = manager();
    let err = load(&mut wm, &CallbackRegistry::new(), script).unwrap_err();
    assert_eq!(err.line, 9);
    assert_eq!(err.kind, LoadErrorKind::BadNumber("later".into()));
    assert_eq!(err.partial.len(), 2);
    for w in &err.partial {
        assert!(wm.is_alive(*w));
        assert_eq!(wm.window(*w).unwrap().layout(), None);
    }
    assert_eq!(wm.children(err.partial[1]).count(), 0);
}

#[test]
fn statements_out_of_place_are_errors() {
    let registry = CallbackRegistry::new();
    let mut wm = manager();

    let err = load(&mut wm, &registry, "NAME = \"Loose\";").unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::Misplaced("field outside a window"));

    let err = load(&mut wm, &registry, "END").unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::Misplaced("END"));

    let err = load(&mut wm, &registry, "WINDOW\nWINDOW").unwrap_err();
    assert_eq!(err.line, 2);

    let err = load(&mut wm, &registry, "WINDOW\nNAME = x;\n").unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::UnexpectedEof);

    let err = load(&mut wm, &registry, "FILE_VERSION = 3;").unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::UnsupportedVersion(3));

    let err = load(&mut wm, &registry, "WINDOW\nSTATUS = ENABLED+SHINY;\nEND").unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::UnknownFlag("SHINY".into()));

    let err = load(&mut wm, &registry, "WINDOW\nEND").unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::Expected("SCREENRECT"));
}

#[test]
fn nesting_past_the_parent_stack_fails() {
    let mut script = String::new();
    for _ in 0..11 {
        script.push_str(
            "WINDOW\nSCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 10 10, CREATIONRESOLUTION: 800 600;\nCHILD\n",
        );
    }
    let mut wm = manager();
    let err = load(&mut wm, &CallbackRegistry::new(), &script).unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::NestingTooDeep);
    assert_eq!(err.partial.len(), 1);
    assert_eq!(wm.len(), 10);
}

#[test]
fn data_blocks_configure_gadgets() {
    let script = r#"
        WINDOW
          WINDOWTYPE = HORZSLIDER;
          SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 110 10, CREATIONRESOLUTION: 800 600;
          NAME = "Test.wnd:Volume";
          STATUS = ENABLED;
          SLIDERDATA = MINVALUE: 0, MAXVALUE: 10;
        END
        WINDOW
          WINDOWTYPE = SCROLLLISTBOX;
          SCREENRECT = UPPERLEFT: 0 100, BOTTOMRIGHT: 200 300, CREATIONRESOLUTION: 800 600;
          NAME = "Test.wnd:Players";
          STATUS = ENABLED;
          LISTBOXDATA = LENGTH: 5, AUTOPURGE: 1, COLUMNS: 2, COLUMNSWIDTH: 25 75;
        END
        WINDOW
          WINDOWTYPE = TABCONTROL;
          SCREENRECT = UPPERLEFT: 300 0, BOTTOMRIGHT: 700 400, CREATIONRESOLUTION: 800 600;
          NAME = "Test.wnd:Tabs";
          STATUS = ENABLED;
          TABCONTROLDATA = TABORIENTATION: 1, TABEDGE: 0, TABWIDTH: 60, TABHEIGHT: 20,
                           TABCOUNT: 3, PANEBORDER: 4, PANEDISABLED: 0 0 1;
        END
        WINDOW
          WINDOWTYPE = PUSHBUTTON;
          SCREENRECT = UPPERLEFT: 0 400, BOTTOMRIGHT: 50 420, CREATIONRESOLUTION: 800 600;
          NAME = "Test.wnd:Odd";
          STATUS = ENABLED;
          TEXTENTRYDATA = MAXLEN: 4;
        END
    "#;
    let mut wm = manager();
    let layout = load(&mut wm, &CallbackRegistry::new(), script).unwrap();
    assert_eq!(layout.len(&wm), 4);

    let slider = wm.find_by_name(None, "Test.wnd:Volume").unwrap();
    let data = wm.user_data::<SliderData>(slider).unwrap();
    assert_eq!((data.min_val, data.max_val, data.position), (0, 10, 0));
    assert!(data.ticks > 0.0);

    let list = wm.find_by_name(None, "Test.wnd:Players").unwrap();
    let data = wm.user_data::<ListBoxData>(list).unwrap();
    assert_eq!(data.length, 5);
    assert!(data.auto_purge);
    assert_eq!(data.column_width_pct, [25, 75]);
    assert_eq!(data.column_widths, [50.0, 150.0]);

    let tabs = wm.find_by_name(None, "Test.wnd:Tabs").unwrap();
    let panes: Vec<WindowId> = (0..3)
        .map(|i| tab_control::pane(&wm, tabs, i).unwrap())
        .collect();
    assert!(!wm.is_hidden(panes[0]));
    assert!(wm.is_hidden(panes[1]) && wm.is_hidden(panes[2]));
    assert_eq!(tab_control::pane(&wm, tabs, 3), None);

    let odd = wm.find_by_name(None, "Test.wnd:Odd").unwrap();
    assert!(wm.window(odd).unwrap().style().contains(WindowStyle::PUSH_BUTTON));
}

#[test]
fn defaults_apply_until_a_window_overrides_them() {
    let script = r#"
        ENABLEDTEXTCOLOR = COLOR: 1 1 1 255, BORDERCOLOR: 2 2 2 255;
        FONT = NAME: "Times", SIZE: 12, BOLD: 1;
        WINDOW
          SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 10 10, CREATIONRESOLUTION: 800 600;
          NAME = "Test.wnd:Plain";
        END
        DISABLEDCOLOR = COLOR: 5 5 5 255, BORDERCOLOR: 6 6 6 255;
        WINDOW
          SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 10 10, CREATIONRESOLUTION: 800 600;
          NAME = "Test.wnd:Own";
          ENABLEDTEXTCOLOR = COLOR: 9 9 9 255, BORDERCOLOR: 2 2 2 255;
        END
    "#;
    let mut wm = manager();
    load(&mut wm, &CallbackRegistry::new(), script).unwrap();

    let times = FontDesc {
        name: "Times".into(),
        size: 12,
        bold: true,
    };
    let plain = wm.find_by_name(None, "Test.wnd:Plain").unwrap();
    let inst = wm.window(plain).unwrap().instance();
    assert_eq!(inst.text_colors.enabled, make_color(1, 1, 1, 255));
    assert_eq!(inst.text_colors.disabled, TextColors::default().disabled);
    assert_eq!(inst.font.as_ref(), Some(&times));
    assert!(inst.disabled_draw.is_empty());

    let own = wm.find_by_name(None, "Test.wnd:Own").unwrap();
    let inst = wm.window(own).unwrap().instance();
    assert_eq!(inst.text_colors.enabled, make_color(9, 9, 9, 255));
    assert_eq!(inst.font.as_ref(), Some(&times));
    assert_eq!(inst.disabled_draw[0].color, make_color(5, 5, 5, 255));
    assert_eq!(inst.disabled_draw[0].border_color, make_color(6, 6, 6, 255));
}

#[test]
fn missing_file_is_an_io_error() {
    let mut wm = manager();
    let err = gadgetry_script::load_layout_file(
        &mut wm,
        &CallbackRegistry::new(),
        "/definitely/not/here/Menu.wnd",
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::Io(std::io::ErrorKind::NotFound));
    assert_eq!(err.line, 0);
}

#[test]
fn loaded_fields_land_on_the_windows() {
    let script = r#"
        FILE_VERSION = 2;
        WINDOW
          WINDOWTYPE = USER;
          SCREENRECT = UPPERLEFT: 200 100, BOTTOMRIGHT: 600 500, CREATIONRESOLUTION: 800 600;
          NAME = "Options.wnd:Frame";
          STATUS = ENABLED+DRAGABLE;
          TOOLTIPTEXT = "Drag me";
          TOOLTIPDELAY = 250;
          HEADERTEMPLATE = "Title";
          FONT = NAME: "Arial", SIZE: 10, BOLD: 0;
          ENABLEDDRAWDATA = IMAGE: Frame, COLOR: 10 20 30 255, BORDERCOLOR: 0 0 0 255;
          TEXTCOLOR = ENABLED: 250 250 250 255, HILITE: 3 3 3 255;
          CHILD
          WINDOW
            WINDOWTYPE = HORZSLIDER;
            SCREENRECT = UPPERLEFT: 210 110, BOTTOMRIGHT: 320 120, CREATIONRESOLUTION: 800 600;
            NAME = "Options.wnd:Gamma";
            STATUS = ENABLED+TABSTOP;
            SLIDERDATA = MINVALUE: -2147483648, MAXVALUE: 2147483647;
          END
          WINDOW
            WINDOWTYPE = CHECKBOX;
            SCREENRECT = UPPERLEFT: 210 130, BOTTOMRIGHT: 310 146, CREATIONRESOLUTION: 800 600;
            NAME = "Options.wnd:Subtitles";
            STATUS = ENABLED+TABSTOP+HIDDEN;
            TEXT = "Subtitles";
          END
          ENDALLCHILDREN
        END
    "#;
    let mut wm = manager();
    let layout = load_layout(
        &mut wm,
        &CallbackRegistry::new(),
        script,
        "Options.wnd",
        &LoadOptions::default(),
    )
    .unwrap();
    assert_eq!(layout.name(), "Options.wnd");

    let members = layout.windows(&wm);
    assert_eq!(members.len(), 3);
    for &w in &members {
        assert_eq!(wm.window(w).unwrap().layout(), Some(layout.id()));
    }
    let [frame, gamma, subtitles] = members.as_slice() else {
        panic!("unexpected members {members:?}");
    };
    let (frame, gamma, subtitles) = (*frame, *gamma, *subtitles);

    let node = wm.window(frame).unwrap();
    assert_eq!(node.parent(), None);
    assert_eq!(node.region(), Rect::new(200.0, 100.0, 600.0, 500.0));
    assert!(node.status().contains(WindowStatus::ENABLED | WindowStatus::DRAGABLE));
    let inst = node.instance();
    assert_eq!(inst.name, "Options.wnd:Frame");
    assert_eq!(inst.tooltip.as_deref(), Some("Drag me"));
    assert_eq!(inst.tooltip_delay, 250);
    assert_eq!(inst.header_template.as_deref(), Some("Title"));
    assert_eq!(
        inst.font,
        Some(FontDesc {
            name: "Arial".into(),
            size: 10,
            bold: false,
        })
    );
    assert_eq!(inst.enabled_draw[0].image.as_deref(), Some("Frame"));
    assert_eq!(inst.enabled_draw[0].color, make_color(10, 20, 30, 255));
    assert_eq!(inst.text_colors.enabled, make_color(250, 250, 250, 255));
    assert_eq!(inst.text_colors.hilite, make_color(3, 3, 3, 255));
    assert_eq!(inst.text_colors.disabled, TextColors::default().disabled);

    assert_eq!(wm.parent(gamma), Some(frame));
    assert_eq!(wm.window(gamma).unwrap().owner(), Some(frame));
    assert_eq!(wm.position(gamma), Some(Point::new(10.0, 10.0)));
    let data = wm.user_data::<SliderData>(gamma).unwrap();
    assert_eq!((data.min_val, data.max_val, data.position), (i32::MIN, i32::MAX, i32::MIN));
    assert!(data.ticks > 0.0);

    assert_eq!(wm.parent(subtitles), Some(frame));
    assert!(wm.is_hidden(subtitles));
    let node = wm.window(subtitles).unwrap();
    assert!(node.style().contains(WindowStyle::CHECK_BOX));
    assert!(node.status().contains(WindowStatus::TAB_STOP));
    assert_eq!(node.text(), "Subtitles");
}

#[test]
fn oversized_column_count_is_rejected() {
    let script = "WINDOW\n\
                  WINDOWTYPE = SCROLLLISTBOX;\n\
                  SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 50 50, CREATIONRESOLUTION: 800 600;\n\
                  LISTBOXDATA = LENGTH: 5, COLUMNS: 4000000, COLUMNSWIDTH: 100;\n\
                  END\n";
    let mut wm = manager();
    let err = load(&mut wm, &CallbackRegistry::new(), script).unwrap_err();
    assert_eq!(err.line, 4);
    assert_eq!(err.kind, LoadErrorKind::TooManyColumns(4_000_000));
    assert!(err.partial.is_empty());
    assert!(wm.is_empty());
}
