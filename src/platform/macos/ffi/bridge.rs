//! Thin objc2 layer for the dynamic `msg_send!` style used across the
//! macOS module.
//!
//! Objects are passed around as raw `id` pointers; helpers here cover
//! class lookup, NSString conversion and the shared application.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::ffi::{CStr, CString};

pub use objc2::runtime::{AnyClass, AnyObject, Bool, Sel};
pub use objc2::{msg_send, sel, ClassType};

pub use block2::RcBlock;
pub use objc2::rc::Retained;
pub use objc2_foundation::{NSPoint, NSString};

use objc2_app_kit::NSApplication;

/// Objective-C object pointer.
pub type id = *mut AnyObject;

pub const nil: id = std::ptr::null_mut();

pub const YES: Bool = Bool::YES;
pub const NO: Bool = Bool::NO;

/// `NSApplicationActivationPolicyAccessory`: no Dock icon, no menu bar.
pub const ACTIVATION_POLICY_ACCESSORY: isize = 1;

/// The shared NSApplication instance.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![NSApplication::class(), sharedApplication] }
}

/// Autoreleased NSString as a raw pointer, for `msg_send!` arguments.
///
/// Valid until the enclosing autorelease pool drains.
#[inline]
pub fn nsstring_id(s: &str) -> id {
    let ns = NSString::from_str(s);
    Retained::autorelease_ptr(ns) as id
}

/// Hand a +1 reference (from `alloc`/`init`) to the current autorelease pool.
///
/// # Safety
/// `obj` must be `nil` or an object the caller owns.
pub unsafe fn autorelease(obj: id) -> id {
    match Retained::from_raw(obj) {
        Some(obj) => Retained::autorelease_ptr(obj),
        None => nil,
    }
}

/// Give up a +1 reference.
///
/// # Safety
/// `obj` must be `nil` or an object the caller owns.
pub unsafe fn release(obj: id) {
    drop(Retained::from_raw(obj));
}

/// Copy an NSString into a Rust `String`. `nil` gives `None`.
///
/// # Safety
/// `ns` must be `nil` or point to an NSString.
pub unsafe fn nsstring_to_string(ns: id) -> Option<String> {
    if ns.is_null() {
        return None;
    }
    let utf8: *const std::ffi::c_char = msg_send![ns, UTF8String];
    if utf8.is_null() {
        return None;
    }
    Some(CStr::from_ptr(utf8).to_string_lossy().into_owned())
}

/// Look up a class by name. Panics if the runtime does not know it.
#[inline]
pub fn get_class(name: &str) -> &'static AnyClass {
    let c_name = CString::new(name).unwrap_or_default();
    AnyClass::get(&c_name).unwrap_or_else(|| panic!("Class '{}' not found", name))
}

/// Run a closure inside an autorelease pool.
#[inline]
pub fn autoreleasepool<R, F: FnOnce() -> R>(f: F) -> R {
    objc2::rc::autoreleasepool(|_| f())
}
