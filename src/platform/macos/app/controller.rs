//! The ObjC controller object.
//!
//! A plain NSObject subclass that AppKit can call back into: the dispatch
//! timer fires `drainEvents:`, and presented menu rows target
//! `menuItemClicked:` / `validateMenuItem:`.

use std::ffi::CStr;

use objc2::runtime::{AnyClass, ClassBuilder};

use crate::model::constants::DISPATCH_INTERVAL_SECS;
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, sel, AnyObject, Sel, YES,
};
use crate::platform::macos::handlers::dispatch_events;
use crate::platform::macos::ui::context_menu::{menu_item_clicked, validate_menu_item};

const CONTROLLER_CLASS: &CStr = c"MenubarPopupController";

/// Register the controller class (once) and create an instance.
///
/// The instance is never released; it lives as long as the process.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn register_and_create_controller() -> id {
    let class = if let Some(cls) = AnyClass::get(CONTROLLER_CLASS) {
        cls
    } else {
        let mut builder = ClassBuilder::new(CONTROLLER_CLASS, get_class("NSObject"))
            .unwrap_or_else(|| panic!("cannot declare {:?}", CONTROLLER_CLASS));
        register_methods(&mut builder);
        builder.register()
    };
    let controller: id = msg_send![class, alloc];
    msg_send![controller, init]
}

/// # Safety
/// Must be called during class registration.
unsafe fn register_methods(builder: &mut ClassBuilder) {
    builder.add_method(
        sel!(drainEvents:),
        drain_events as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(menuItemClicked:),
        menu_item_clicked as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(validateMenuItem:),
        validate_menu_item as unsafe extern "C-unwind" fn(_, _, _) -> _,
    );
}

unsafe extern "C-unwind" fn drain_events(_this: &mut AnyObject, _cmd: Sel, _timer: id) {
    dispatch_events();
}

/// Drain the event bus from an AppKit timer that also fires during
/// menu tracking and modal alerts.
///
/// # Safety
/// `controller` must come from [`register_and_create_controller`].
pub unsafe fn start_dispatch_timer(controller: id) -> id {
    let timer: id = msg_send![
        get_class("NSTimer"),
        timerWithTimeInterval: DISPATCH_INTERVAL_SECS,
        target: controller,
        selector: sel!(drainEvents:),
        userInfo: nil,
        repeats: YES
    ];
    let run_loop: id = msg_send![get_class("NSRunLoop"), currentRunLoop];
    let common_modes = nsstring_id("kCFRunLoopCommonModes");
    let _: () = msg_send![run_loop, addTimer: timer, forMode: common_modes];
    timer
}
