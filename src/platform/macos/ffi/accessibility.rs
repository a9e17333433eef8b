//! AXUIElement access for another process's menu bar.
//!
//! [`AxService`] implements the library's accessibility traits on top of
//! `accessibility-sys`; values come back as CoreFoundation objects and are
//! type-checked before conversion.

use std::ffi::c_void;
use std::fmt;
use std::ptr;

use accessibility_sys::{
    kAXErrorSuccess, kAXTrustedCheckOptionPrompt, AXIsProcessTrusted,
    AXIsProcessTrustedWithOptions, AXUIElementCopyAttributeValue, AXUIElementCreateApplication,
    AXUIElementGetTypeID, AXUIElementPerformAction, AXUIElementRef,
    AXUIElementSetMessagingTimeout,
};
use core_foundation::array::{CFArray, CFArrayRef};
use core_foundation::base::{CFRelease, CFRetain, CFType, CFTypeRef, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::CFDictionary;
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use tracing::{debug, warn};

use crate::accessibility::{AccessibilityService, FrontmostApp, PermissionGate};
use crate::error::AxError;
use crate::model::{TriggerSettings, AX_CHILDREN, AX_MENU_BAR, AX_PRESS_ACTION};
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, nsstring_to_string};

/// `kAXErrorFailure`, reported when no AX call was possible at all.
const AX_ERROR_FAILURE: i32 = -25200;

/// Owned reference to an AXUIElement. Clone retains, drop releases.
pub struct AxElement(AXUIElementRef);

impl AxElement {
    /// Take ownership of a +1 reference (`Create`/`Copy` rule).
    ///
    /// # Safety
    /// `raw` must be null or a valid AXUIElement the caller owns.
    unsafe fn from_create_rule(raw: AXUIElementRef) -> Option<Self> {
        (!raw.is_null()).then_some(Self(raw))
    }

    /// Retain a borrowed reference (`Get` rule).
    ///
    /// # Safety
    /// `raw` must be null or a valid AXUIElement.
    unsafe fn from_get_rule(raw: AXUIElementRef) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        CFRetain(raw as CFTypeRef);
        Some(Self(raw))
    }

    pub fn as_ptr(&self) -> AXUIElementRef {
        self.0
    }
}

impl Clone for AxElement {
    fn clone(&self) -> Self {
        unsafe { CFRetain(self.0 as CFTypeRef) };
        Self(self.0)
    }
}

impl Drop for AxElement {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0 as CFTypeRef) };
    }
}

impl fmt::Debug for AxElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AxElement").field(&self.0).finish()
    }
}

/// The live accessibility service.
#[derive(Debug, Default)]
pub struct AxService {
    /// Per-application messaging timeout in seconds; 0 keeps the OS default.
    messaging_timeout: f32,
}

impl AxService {
    pub fn new(settings: &TriggerSettings) -> Self {
        let mut service = Self::default();
        service.apply_settings(settings);
        service
    }

    pub fn apply_settings(&mut self, settings: &TriggerSettings) {
        self.messaging_timeout = settings.ax_messaging_timeout as f32;
    }

    fn copy_attribute(&self, element: &AxElement, attribute: &'static str) -> Result<CFType, AxError> {
        let name = CFString::from_static_string(attribute);
        let mut value: CFTypeRef = ptr::null();
        let code = unsafe {
            AXUIElementCopyAttributeValue(element.as_ptr(), name.as_concrete_TypeRef(), &mut value)
        };
        if code != kAXErrorSuccess || value.is_null() {
            return Err(AxError::AttributeFailed { attribute, code });
        }
        Ok(unsafe { CFType::wrap_under_create_rule(value) })
    }

    fn element_value(value: &CFType, attribute: &'static str) -> Result<AxElement, AxError> {
        if value.type_of() != unsafe { AXUIElementGetTypeID() } {
            return Err(AxError::UnexpectedType { attribute });
        }
        unsafe { AxElement::from_get_rule(value.as_CFTypeRef() as AXUIElementRef) }
            .ok_or(AxError::UnexpectedType { attribute })
    }
}

impl AccessibilityService for AxService {
    type Element = AxElement;

    fn frontmost_application(&self) -> Option<FrontmostApp> {
        unsafe {
            let workspace: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
            let app: id = msg_send![workspace, frontmostApplication];
            if app == nil {
                return None;
            }
            let pid: i32 = msg_send![app, processIdentifier];
            let name: id = msg_send![app, localizedName];
            Some(FrontmostApp {
                pid,
                name: nsstring_to_string(name),
            })
        }
    }

    fn menu_bar(&self, app: &FrontmostApp) -> Result<AxElement, AxError> {
        let app_element = unsafe { AxElement::from_create_rule(AXUIElementCreateApplication(app.pid)) }
            .ok_or(AxError::AttributeFailed {
                attribute: AX_MENU_BAR,
                code: AX_ERROR_FAILURE,
            })?;
        if self.messaging_timeout > 0.0 {
            let code =
                unsafe { AXUIElementSetMessagingTimeout(app_element.as_ptr(), self.messaging_timeout) };
            if code != kAXErrorSuccess {
                warn!(code, pid = app.pid, "failed to set AX messaging timeout");
            }
        }
        let value = self.copy_attribute(&app_element, AX_MENU_BAR)?;
        Self::element_value(&value, AX_MENU_BAR)
    }

    fn children(&self, element: &AxElement) -> Result<Vec<AxElement>, AxError> {
        let attribute = AX_CHILDREN;
        let value = self.copy_attribute(element, attribute)?;
        if value.type_of() != CFArray::<*const c_void>::type_id() {
            return Err(AxError::UnexpectedType { attribute });
        }
        let array: CFArray<*const c_void> =
            unsafe { CFArray::wrap_under_get_rule(value.as_CFTypeRef() as CFArrayRef) };
        let ax_type = unsafe { AXUIElementGetTypeID() };
        let children = array
            .get_all_values()
            .into_iter()
            .filter(|raw| !raw.is_null())
            .filter_map(|raw| {
                let child = unsafe { CFType::wrap_under_get_rule(raw) };
                if child.type_of() != ax_type {
                    debug!("skipping non-element child");
                    return None;
                }
                unsafe { AxElement::from_get_rule(raw as AXUIElementRef) }
            })
            .collect();
        Ok(children)
    }

    fn string_attribute(&self, element: &AxElement, attribute: &'static str) -> Result<String, AxError> {
        self.copy_attribute(element, attribute)?
            .downcast::<CFString>()
            .map(|s| s.to_string())
            .ok_or(AxError::UnexpectedType { attribute })
    }

    fn bool_attribute(&self, element: &AxElement, attribute: &'static str) -> Result<bool, AxError> {
        self.copy_attribute(element, attribute)?
            .downcast::<CFBoolean>()
            .map(bool::from)
            .ok_or(AxError::UnexpectedType { attribute })
    }

    fn integer_attribute(&self, element: &AxElement, attribute: &'static str) -> Result<i64, AxError> {
        self.copy_attribute(element, attribute)?
            .downcast::<CFNumber>()
            .and_then(|n| n.to_i64())
            .ok_or(AxError::UnexpectedType { attribute })
    }

    fn press(&self, element: &AxElement) -> Result<(), AxError> {
        let action = CFString::from_static_string(AX_PRESS_ACTION);
        let code = unsafe { AXUIElementPerformAction(element.as_ptr(), action.as_concrete_TypeRef()) };
        if code == kAXErrorSuccess {
            Ok(())
        } else {
            Err(AxError::ActionFailed {
                action: AX_PRESS_ACTION,
                code,
            })
        }
    }
}

impl PermissionGate for AxService {
    fn is_trusted(&self) -> bool {
        unsafe { AXIsProcessTrusted() }
    }
}

/// Ask the OS to show its accessibility prompt if the process is not trusted.
///
/// Returns the current trust status. The prompt is asynchronous; the user
/// still has to relaunch after granting access.
pub fn ensure_accessibility_prompt() -> bool {
    let key = unsafe { CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt) };
    let options = CFDictionary::from_CFType_pairs(&[(key, CFBoolean::true_value().as_CFType())]);
    let trusted = unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) };
    debug!(trusted, "accessibility trust checked");
    trusted
}
