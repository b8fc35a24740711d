// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario tests for the window tree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gadgetry_tree::{
    InputMsg, MsgResult, Notice, SystemMsg, WindowId, WindowManager, WindowStatus,
};
use kurbo::{Point, Size};

fn window(wm: &mut WindowManager, parent: Option<WindowId>, x: f64, y: f64) -> WindowId {
    wm.create(
        parent,
        WindowStatus::ENABLED,
        Point::new(x, y),
        Size::new(100.0, 100.0),
        None,
        None,
    )
    .unwrap()
}

fn count_input(wm: &mut WindowManager, id: WindowId) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    wm.set_input_handler(
        id,
        Some(Rc::new(move |_: &mut WindowManager, _: WindowId, msg: InputMsg| {
            if let InputMsg::LeftDown(_) = msg {
                h.set(h.get() + 1);
            }
            MsgResult::Handled
        })),
    );
    hits
}

fn check_list(wm: &WindowManager, ids: &[WindowId], parent: Option<WindowId>) {
    for (i, &id) in ids.iter().enumerate() {
        let node = wm.window(id).unwrap();
        assert_eq!(node.parent(), parent, "parent link of {id:?}");
        assert_eq!(
            node.prev_sibling(),
            i.checked_sub(1).map(|p| ids[p]),
            "prev link of {id:?}"
        );
        assert_eq!(node.next_sibling(), ids.get(i + 1).copied(), "next link of {id:?}");
        let children: Vec<_> = wm.children(id).collect();
        check_list(wm, &children, Some(id));
    }
}

#[test]
fn lists_stay_doubly_linked_under_random_churn() {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let mut live: Vec<WindowId> = Vec::new();
    let mut seed: u32 = 0x2545_f491;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed
    };

    for round in 0..400 {
        let roll = next();
        if live.is_empty() || roll % 3 != 0 {
            let parent = if live.is_empty() || roll % 2 == 0 {
                None
            } else {
                Some(live[(next() as usize) % live.len()])
            };
            live.push(window(&mut wm, parent, 0.0, 0.0));
        } else {
            let victim = live[(next() as usize) % live.len()];
            wm.destroy(victim);
            live.retain(|&w| wm.is_alive(w));
        }
        if round % 7 == 0 {
            wm.process_destroy_list();
        }
        let tops: Vec<_> = wm.top_level().collect();
        check_list(&wm, &tops, None);
        assert_eq!(wm.first_window(), tops.first().copied(), "head");
        assert_eq!(wm.last_window(), tops.last().copied(), "tail");
    }
}

#[test]
fn modal_window_blocks_siblings_until_unset() {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let sibling = window(&mut wm, None, 0.0, 0.0);
    let modal = window(&mut wm, None, 300.0, 300.0);
    let sibling_hits = count_input(&mut wm, sibling);
    let modal_hits = count_input(&mut wm, modal);
    let over_sibling = InputMsg::LeftDown(Point::new(50.0, 50.0));

    assert!(wm.set_modal(modal));
    assert_eq!(wm.process_mouse_event(over_sibling), MsgResult::Ignored);
    assert_eq!(sibling_hits.get(), 0);

    wm.process_mouse_event(InputMsg::LeftDown(Point::new(350.0, 350.0)));
    assert_eq!(modal_hits.get(), 1);

    assert!(wm.unset_modal(modal));
    assert_eq!(wm.process_mouse_event(over_sibling), MsgResult::Handled);
    assert_eq!(sibling_hits.get(), 1);
}

#[test]
fn modal_blocks_siblings_in_front_of_it() {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let modal = window(&mut wm, None, 0.0, 0.0);
    let front = window(&mut wm, None, 0.0, 0.0);
    let front_hits = count_input(&mut wm, front);
    let modal_hits = count_input(&mut wm, modal);

    wm.set_modal(modal);
    wm.process_mouse_event(InputMsg::LeftDown(Point::new(50.0, 50.0)));
    assert_eq!(front_hits.get(), 0);
    assert_eq!(modal_hits.get(), 1);

    // A popup opened by the modal dialog sits above it and is reachable.
    let popup = window(&mut wm, None, 0.0, 0.0);
    let popup_hits = count_input(&mut wm, popup);
    wm.process_mouse_event(InputMsg::LeftDown(Point::new(50.0, 50.0)));
    assert_eq!(popup_hits.get(), 1);
    assert_eq!(wm.top_level().collect::<Vec<_>>(), [front, popup, modal]);
}

#[test]
fn nested_modal_blocks_its_siblings_and_parent() {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let dialog = wm
        .create(
            None,
            WindowStatus::ENABLED,
            Point::ZERO,
            Size::new(400.0, 300.0),
            None,
            None,
        )
        .unwrap();
    let sibling = window(&mut wm, Some(dialog), 0.0, 0.0);
    let modal = window(&mut wm, Some(dialog), 200.0, 0.0);
    let inner = window(&mut wm, Some(modal), 10.0, 10.0);
    let dialog_hits = count_input(&mut wm, dialog);
    let sibling_hits = count_input(&mut wm, sibling);
    let modal_hits = count_input(&mut wm, modal);
    let over_sibling = InputMsg::LeftDown(Point::new(50.0, 50.0));

    assert!(wm.set_modal(modal));
    assert!(wm.in_modal_scope(inner));
    assert!(!wm.in_modal_scope(sibling));
    assert!(!wm.in_modal_scope(dialog));

    assert_eq!(wm.process_mouse_event(over_sibling), MsgResult::Ignored);
    wm.process_mouse_event(InputMsg::LeftDown(Point::new(350.0, 250.0)));
    assert_eq!(sibling_hits.get(), 0);
    assert_eq!(dialog_hits.get(), 0);

    // `inner` has no handler; the click climbs to `modal` and stops there.
    wm.process_mouse_event(InputMsg::LeftDown(Point::new(215.0, 15.0)));
    assert_eq!(modal_hits.get(), 1);
    assert_eq!(dialog_hits.get(), 0);

    assert!(wm.unset_modal(modal));
    wm.process_mouse_event(over_sibling);
    assert_eq!(sibling_hits.get(), 1);
}

#[test]
fn handler_can_destroy_its_own_window() {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let parent = window(&mut wm, None, 0.0, 0.0);
    let child = window(&mut wm, Some(parent), 0.0, 0.0);
    let parent_hits = count_input(&mut wm, parent);
    wm.set_input_handler(
        child,
        Some(Rc::new(|wm: &mut WindowManager, me: WindowId, _: InputMsg| {
            wm.destroy(me);
            // Nothing is freed while this handler is on the stack.
            assert_eq!(wm.process_destroy_list(), 0);
            assert!(wm.window(me).is_some());
            MsgResult::Ignored
        })),
    );

    wm.process_mouse_event(InputMsg::LeftDown(Point::new(5.0, 5.0)));
    assert!(!wm.is_alive(child));
    // The destroyed child had no parent left to climb to.
    assert_eq!(parent_hits.get(), 0);
    assert_eq!(wm.process_destroy_list(), 1);

    wm.process_mouse_event(InputMsg::LeftDown(Point::new(5.0, 5.0)));
    assert_eq!(parent_hits.get(), 1);
}

#[test]
fn notices_go_to_owner_not_parent() {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let parent = window(&mut wm, None, 0.0, 0.0);
    let owner = window(&mut wm, None, 0.0, 0.0);
    let child = window(&mut wm, Some(parent), 0.0, 0.0);
    wm.set_owner(child, Some(owner));

    let seen: Rc<RefCell<Vec<(WindowId, Notice)>>> = Rc::default();
    for w in [parent, owner] {
        let seen = seen.clone();
        wm.set_system_handler(
            w,
            Some(Rc::new(
                move |_: &mut WindowManager, me: WindowId, msg: &mut SystemMsg| {
                    if let SystemMsg::Notify(n) = msg {
                        seen.borrow_mut().push((me, n.clone()));
                        return MsgResult::Handled;
                    }
                    MsgResult::Ignored
                },
            )),
        );
    }
    wm.notify_owner(child, Notice::Selected { from: child });
    assert_eq!(
        seen.borrow().as_slice(),
        &[(owner, Notice::Selected { from: child })]
    );
}

#[test]
fn destroy_notifies_focus_loss_and_children() {
    let mut wm = WindowManager::new(Size::new(800.0, 600.0));
    let log: Rc<RefCell<Vec<(WindowId, &'static str)>>> = Rc::default();
    let handler = {
        let log = log.clone();
        Rc::new(
            move |_: &mut WindowManager, me: WindowId, msg: &mut SystemMsg| {
                match msg {
                    SystemMsg::Destroy => log.borrow_mut().push((me, "destroy")),
                    SystemMsg::InputFocus {
                        gained: false, ..
                    } => log.borrow_mut().push((me, "blur")),
                    SystemMsg::InputFocus { accepted, .. } => *accepted = true,
                    _ => {}
                }
                MsgResult::Handled
            },
        )
    };
    let dialog = wm
        .create(
            None,
            WindowStatus::ENABLED,
            Point::ZERO,
            Size::new(10.0, 10.0),
            Some(handler.clone()),
            None,
        )
        .unwrap();
    let field = wm
        .create(
            Some(dialog),
            WindowStatus::ENABLED,
            Point::ZERO,
            Size::new(10.0, 10.0),
            Some(handler),
            None,
        )
        .unwrap();
    assert_eq!(wm.set_focus(Some(field)), Some(field));

    wm.destroy(dialog);
    assert_eq!(
        log.borrow().as_slice(),
        &[(dialog, "destroy"), (field, "destroy"), (field, "blur")]
    );
    assert_eq!(wm.focus(), None);
}
