//! Outside-click monitor backed by a Core Graphics event tap.
//!
//! The tap is listen-only, so pointer events reach their target untouched.
//! It runs on its own thread with its own run loop, created on the first
//! `start`. `stop` disables the tap and a later `start` re-enables the same
//! one, so there is never more than one observation stream.

use std::ffi::c_void;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};

use core_foundation::base::TCFType;
use core_foundation::mach_port::CFMachPort;
use core_foundation::runloop::{CFRunLoop, kCFRunLoopCommonModes};

use crate::monitor::{ClickMonitor, OBSERVED_BUTTONS, PointerButton};
use crate::popover::Point;
use crate::utils::thread::spawn_named_thread;

// FFI declarations for Core Graphics event tap and mouse location
type CGEventRef = *mut c_void;
type CGEventTapProxy = *mut c_void;
type CFMachPortRef = *mut c_void;

type CGEventTapCallBack = extern "C" fn(
    proxy: CGEventTapProxy,
    event_type: u32,
    event: CGEventRef,
    user_info: *mut c_void,
) -> CGEventRef;

#[repr(C)]
#[derive(Clone, Copy)]
struct CGPoint {
    x: f64,
    y: f64,
}

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGEventTapCreate(
        tap: u32,
        place: u32,
        options: u32,
        events_of_interest: u64,
        callback: CGEventTapCallBack,
        user_info: *mut c_void,
    ) -> CFMachPortRef;

    fn CGEventTapEnable(tap: CFMachPortRef, enable: bool);
    fn CGEventGetLocation(event: CGEventRef) -> CGPoint;
}

// Constants for event tap configuration
const K_CG_HID_EVENT_TAP: u32 = 0;
const K_CG_HEAD_INSERT_EVENT_TAP: u32 = 0;
const K_CG_EVENT_TAP_OPTION_LISTEN_ONLY: u32 = 1;

// Mouse event types
const K_CG_EVENT_LEFT_MOUSE_DOWN: u32 = 1;
const K_CG_EVENT_RIGHT_MOUSE_DOWN: u32 = 3;

// Delivered when the system disables the tap
const K_CG_EVENT_TAP_DISABLED_BY_TIMEOUT: u32 = 0xFFFF_FFFE;
const K_CG_EVENT_TAP_DISABLED_BY_USER_INPUT: u32 = 0xFFFF_FFFF;

const fn button_down_event(button: PointerButton) -> u32 {
    match button {
        PointerButton::Left => K_CG_EVENT_LEFT_MOUSE_DOWN,
        PointerButton::Right => K_CG_EVENT_RIGHT_MOUSE_DOWN,
    }
}

const fn event_mask() -> u64 {
    let mut mask = 0u64;
    let mut index = 0;
    while index < OBSERVED_BUTTONS.len() {
        mask |= 1u64 << button_down_event(OBSERVED_BUTTONS[index]);
        index += 1;
    }
    mask
}

const EVENT_MASK: u64 = event_mask();

/// Receives the screen location of every observed pointer-down.
///
/// Runs on the event tap thread.
pub type PointerDownHandler = Arc<dyn Fn(Point) + Send + Sync>;

struct TapState {
    active: AtomicBool,
    tap: AtomicPtr<c_void>,
    on_pointer_down: PointerDownHandler,
}

impl TapState {
    fn set_tap_enabled(&self, enabled: bool) {
        let tap = self.tap.load(Ordering::SeqCst);
        if !tap.is_null() {
            unsafe { CGEventTapEnable(tap, enabled) };
        }
    }
}

/// Global left/right pointer-down observer.
pub struct EventTapMonitor {
    state: Arc<TapState>,
    spawned: bool,
}

impl EventTapMonitor {
    pub fn new(on_pointer_down: PointerDownHandler) -> Self {
        Self {
            state: Arc::new(TapState {
                active: AtomicBool::new(false),
                tap: AtomicPtr::new(std::ptr::null_mut()),
                on_pointer_down,
            }),
            spawned: false,
        }
    }
}

impl ClickMonitor for EventTapMonitor {
    fn start(&mut self) {
        if self.state.active.swap(true, Ordering::SeqCst) {
            return;
        }

        if self.spawned {
            self.state.set_tap_enabled(true);
            return;
        }

        let state = Arc::clone(&self.state);
        self.spawned = spawn_named_thread("event-tap", move || run_event_tap(&state));
        if !self.spawned {
            self.state.active.store(false, Ordering::SeqCst);
        }
    }

    fn stop(&mut self) {
        if self.state.active.swap(false, Ordering::SeqCst) {
            self.state.set_tap_enabled(false);
        }
    }

    fn is_running(&self) -> bool { self.state.active.load(Ordering::SeqCst) }
}

/// Installs the event tap on the current thread and runs its run loop.
fn run_event_tap(state: &Arc<TapState>) {
    // The tap callback borrows this reference for as long as the tap exists.
    let user_info = Arc::into_raw(Arc::clone(state)).cast_mut().cast::<c_void>();

    unsafe {
        let tap = CGEventTapCreate(
            K_CG_HID_EVENT_TAP,
            K_CG_HEAD_INSERT_EVENT_TAP,
            K_CG_EVENT_TAP_OPTION_LISTEN_ONLY,
            EVENT_MASK,
            pointer_down_callback,
            user_info,
        );

        if tap.is_null() {
            drop(Arc::from_raw(user_info.cast::<TapState>()));
            tracing::warn!(
                "failed to create mouse event tap, the popover will not close on outside clicks - check accessibility permissions"
            );
            return;
        }

        let tap_port = CFMachPort::wrap_under_create_rule(tap.cast());
        let Ok(run_loop_source) = tap_port.create_runloop_source(0) else {
            drop(tap_port);
            drop(Arc::from_raw(user_info.cast::<TapState>()));
            tracing::warn!("failed to create run loop source for mouse event tap");
            return;
        };

        let run_loop = CFRunLoop::get_current();
        run_loop.add_source(&run_loop_source, kCFRunLoopCommonModes);

        state.tap.store(tap, Ordering::SeqCst);
        CGEventTapEnable(tap, state.active.load(Ordering::SeqCst));

        tracing::debug!("outside-click event tap installed");

        // Run the run loop (this blocks)
        CFRunLoop::run_current();
    }
}

/// Callback function for the mouse event tap.
extern "C" fn pointer_down_callback(
    _proxy: CGEventTapProxy,
    event_type: u32,
    event: CGEventRef,
    user_info: *mut c_void,
) -> CGEventRef {
    if user_info.is_null() {
        return event;
    }

    let state = unsafe { &*user_info.cast::<TapState>() };

    match event_type {
        K_CG_EVENT_TAP_DISABLED_BY_TIMEOUT | K_CG_EVENT_TAP_DISABLED_BY_USER_INPUT => {
            if state.active.load(Ordering::SeqCst) {
                state.set_tap_enabled(true);
            }
        }
        K_CG_EVENT_LEFT_MOUSE_DOWN | K_CG_EVENT_RIGHT_MOUSE_DOWN => {
            if !event.is_null() && state.active.load(Ordering::SeqCst) {
                let location = unsafe { CGEventGetLocation(event) };
                (state.on_pointer_down)(Point::new(location.x, location.y));
            }
        }
        _ => {}
    }

    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constants_are_valid() {
        assert_eq!(K_CG_EVENT_LEFT_MOUSE_DOWN, 1);
        assert_eq!(K_CG_EVENT_RIGHT_MOUSE_DOWN, 3);
        assert_eq!(K_CG_EVENT_TAP_OPTION_LISTEN_ONLY, 1);
    }

    #[test]
    fn test_event_mask_covers_left_and_right_down_only() {
        assert_eq!(EVENT_MASK, 0b1010);
    }

    #[test]
    fn test_new_monitor_is_stopped() {
        let monitor = EventTapMonitor::new(Arc::new(|_| {}));
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let mut monitor = EventTapMonitor::new(Arc::new(|_| {}));
        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_callback_ignores_events_while_inactive() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let monitor = EventTapMonitor::new(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let user_info = Arc::as_ptr(&monitor.state).cast_mut().cast::<c_void>();

        // A null event is never dereferenced, even for a mouse-down type.
        pointer_down_callback(
            std::ptr::null_mut(),
            K_CG_EVENT_LEFT_MOUSE_DOWN,
            std::ptr::null_mut(),
            user_info,
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
